//! Coordinate-system description consumed at draw time.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The active coordinate system a mesh is drawn in.
///
/// Only the per-axis data scaling (data aspect) matters for drawing: each
/// negative factor mirrors one axis and flips the handedness of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSystem {
    /// Per-axis data scaling factors.
    pub daspect: Vec3,
}

impl Default for CoordinateSystem {
    fn default() -> Self {
        Self { daspect: Vec3::ONE }
    }
}

impl CoordinateSystem {
    /// Creates a coordinate system with the given data aspect.
    pub fn new(daspect: Vec3) -> Self {
        Self { daspect }
    }

    /// Sign of the product of the scaling factors: `1` for the unmirrored
    /// handedness, `-1` when an odd number of axes are mirrored.
    pub fn handedness(&self) -> i32 {
        self.daspect
            .to_array()
            .iter()
            .filter(|&&s| s < 0.0)
            .fold(1, |sign, _| -sign)
    }
}
