//! Ray picking against grid membership.
//!
//! Samples the ray at a fixed increment and returns the first occupied cell.
//! Cells use the min-corner convention: a sample at (0.7, 2.1, -0.2) lies in
//! cell (0, 2, -1). Read-only; safe to call between ticks.

use glam::{IVec3, Vec3};
use verdant_core::constants::{PICK_MAX_DISTANCE, PICK_STEP};
use verdant_core::types::VoxelCoord;

use crate::grid::VoxelGrid;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickParams {
    /// Maximum ray length in voxels.
    pub max_distance: f32,
    /// Distance between samples in voxels.
    pub step: f32,
}

impl Default for PickParams {
    fn default() -> Self {
        Self {
            max_distance: PICK_MAX_DISTANCE,
            step: PICK_STEP,
        }
    }
}

/// Cell containing a world-space point.
pub fn containing_cell(point: Vec3) -> VoxelCoord {
    IVec3::new(
        point.x.floor() as i32,
        point.y.floor() as i32,
        point.z.floor() as i32,
    )
}

/// First occupied cell along `origin + t * direction`, or None.
///
/// `direction` is used as given (not normalized), matching a camera forward
/// vector. Non-positive `step` yields no samples.
pub fn pick_voxel(
    grid: &VoxelGrid,
    origin: Vec3,
    direction: Vec3,
    params: PickParams,
) -> Option<VoxelCoord> {
    if params.step <= 0.0 {
        return None;
    }
    let samples = (params.max_distance / params.step) as u32;
    (0..samples)
        .map(|i| containing_cell(origin + direction * (i as f32 * params.step)))
        .find(|cell| grid.contains(*cell))
}
