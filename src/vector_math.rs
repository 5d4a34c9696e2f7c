//! Basic vector math helper functions.
//! Small helpers for bearings and headings on the 2D plane.
use std::f64::consts::{PI, TAU};

use glam::DVec2;

/// Returns the bearing in radians from `from` towards `to`.
///
/// Coincident points have no defined bearing; this returns `0.0` for them
/// rather than relying on the sign of zero inside `atan2`.
///
/// # Examples
/// ```
/// use glam::DVec2;
/// use contrail::vector_math::bearing;
/// let angle = bearing(DVec2::ZERO, DVec2::new(0.0, 5.0));
/// assert!((angle - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// assert_eq!(bearing(DVec2::ONE, DVec2::ONE), 0.0);
/// ```
#[must_use]
pub fn bearing(from: DVec2, to: DVec2) -> f64 {
    let delta = to - from;
    if delta == DVec2::ZERO {
        return 0.0;
    }
    delta.y.atan2(delta.x)
}

/// Returns the displacement covered in one tick along `heading` at `speed`.
///
/// # Examples
/// ```
/// use contrail::vector_math::heading_vector;
/// let step = heading_vector(0.0, 2.0);
/// assert!((step.x - 2.0).abs() < 1e-12);
/// assert!(step.y.abs() < 1e-12);
/// ```
#[must_use]
pub fn heading_vector(heading: f64, speed: f64) -> DVec2 {
    let (sin, cos) = heading.sin_cos();
    DVec2::new(cos, sin) * speed
}

/// Returns the angle of a vector, `atan2(y, x)`.
#[must_use]
pub fn vec_angle(vector: DVec2) -> f64 {
    vector.y.atan2(vector.x)
}

/// Absolute angular distance between two angles, wrapped into `[0, π]`.
///
/// # Examples
/// ```
/// use std::f64::consts::PI;
/// use contrail::vector_math::wrapped_angle_distance;
/// let d = wrapped_angle_distance(-PI + 0.1, PI - 0.1);
/// assert!((d - 0.2).abs() < 1e-12);
/// ```
#[must_use]
pub fn wrapped_angle_distance(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(TAU);
    if diff > PI {
        TAU - diff
    } else {
        diff
    }
}
