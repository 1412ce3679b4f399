use glam::IVec3;

use crate::constants::{DEGREES_PER_METER_LAT, DEGREES_PER_METER_LON, VOXEL_EDGE_M};

/// Voxel coordinate in grid space. Identity is purely the coordinate triple.
pub type VoxelCoord = IVec3;

/// Geographic reference derived from a voxel coordinate.
///
/// Not stored anywhere: recompute with [`GeoRef::from_coord`] when needed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoRef {
    /// Degrees north of the reference origin (+z).
    pub latitude: f64,
    /// Degrees east of the reference origin (+x).
    pub longitude: f64,
    /// Meters above the reference plane (y = 0).
    pub height: f64,
}

impl GeoRef {
    /// Project a voxel coordinate (min corner) onto the reference frame.
    pub fn from_coord(coord: VoxelCoord) -> Self {
        Self {
            latitude: coord.z as f64 * VOXEL_EDGE_M * DEGREES_PER_METER_LAT,
            longitude: coord.x as f64 * VOXEL_EDGE_M * DEGREES_PER_METER_LON,
            height: coord.y as f64 * VOXEL_EDGE_M,
        }
    }
}
