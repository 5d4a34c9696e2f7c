//! Static cloud obstacles.
//!
//! Every cloud shares the same 24-point silhouette. An [`Obstacle`] stores
//! only its anchor; absolute vertices are produced on demand by offsetting
//! [`CLOUD_OUTLINE`] from that anchor.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Number of vertices in the cloud silhouette.
pub const CLOUD_VERTEX_COUNT: usize = 24;

/// Cloud silhouette as offsets from an obstacle's anchor, in drawing order.
pub const CLOUD_OUTLINE: [DVec2; CLOUD_VERTEX_COUNT] = [
    DVec2::new(5.0, 2.0),
    DVec2::new(15.0, 2.0),
    DVec2::new(20.0, 8.0),
    DVec2::new(30.0, 8.0),
    DVec2::new(35.0, 15.0),
    DVec2::new(45.0, 15.0),
    DVec2::new(50.0, 20.0),
    DVec2::new(55.0, 15.0),
    DVec2::new(65.0, 15.0),
    DVec2::new(70.0, 8.0),
    DVec2::new(80.0, 8.0),
    DVec2::new(85.0, 2.0),
    DVec2::new(95.0, 2.0),
    DVec2::new(85.0, -8.0),
    DVec2::new(75.0, -15.0),
    DVec2::new(65.0, -8.0),
    DVec2::new(55.0, -15.0),
    DVec2::new(50.0, -8.0),
    DVec2::new(40.0, -15.0),
    DVec2::new(35.0, -8.0),
    DVec2::new(25.0, -8.0),
    DVec2::new(20.0, -15.0),
    DVec2::new(10.0, -8.0),
    DVec2::new(5.0, -8.0),
];

/// A static cloud anchored at its top-left reference point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    anchor: DVec2,
}

impl Obstacle {
    /// Creates a cloud anchored at `anchor`.
    #[must_use]
    pub const fn new(anchor: DVec2) -> Self {
        Self { anchor }
    }

    /// The reference point the outline is offset from.
    #[must_use]
    pub const fn anchor(&self) -> DVec2 {
        self.anchor
    }

    /// Absolute outline vertices in drawing order.
    ///
    /// # Examples
    /// ```
    /// use glam::DVec2;
    /// use contrail::Obstacle;
    /// let cloud = Obstacle::new(DVec2::new(100.0, 200.0));
    /// let first = cloud.vertices().next();
    /// assert_eq!(first, Some(DVec2::new(105.0, 202.0)));
    /// assert_eq!(cloud.vertices().count(), 24);
    /// ```
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = DVec2> {
        let anchor = self.anchor;
        CLOUD_OUTLINE.into_iter().map(move |offset| anchor + offset)
    }
}
