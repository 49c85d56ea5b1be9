//! The landmark point record.

use serde::{Deserialize, Serialize};

/// A single face landmark in normalized image space.
///
/// `x` and `y` are in `[0, 1]` relative to the frame; `z` is the detector's
/// relative depth. Detectors that only report 2D positions get `z = 0.0` at
/// the ingestion boundary via [`Landmark::from_xy`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// A 2D-only detection; depth defaults to zero.
    pub fn from_xy(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Planar (x/y) distance to another landmark.
    pub fn planar_distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
