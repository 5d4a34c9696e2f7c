//! Utility helpers for tests.

pub mod fixtures;

use std::f64::consts::{PI, TAU};

/// Assert that two headings point the same way within `tolerance` radians.
///
/// Headings are compared modulo a full turn, so `-π` and `π` match.
///
/// # Panics
/// Panics with both headings when they differ by more than `tolerance`.
pub fn assert_heading_near(actual: f64, expected: f64, tolerance: f64) {
    let diff = (actual - expected).rem_euclid(TAU);
    let distance = if diff > PI { TAU - diff } else { diff };
    assert!(
        distance <= tolerance,
        "heading {actual} differs from {expected} by {distance} (tolerance {tolerance})"
    );
}
