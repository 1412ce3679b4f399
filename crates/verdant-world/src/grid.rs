use std::collections::HashSet;

use verdant_core::direction::FACE_DIRECTIONS;
use verdant_core::types::VoxelCoord;

/// Sparse set of occupied voxel coordinates.
///
/// Presence means solid/occupied, absence means air. The grid is the only
/// authority on what exists; property records never imply occupancy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoxelGrid {
    cells: HashSet<VoxelCoord>,
}

impl VoxelGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, coord: VoxelCoord) -> bool {
        self.cells.contains(&coord)
    }

    /// Occupy a cell. Returns false if it was already occupied.
    pub fn insert(&mut self, coord: VoxelCoord) -> bool {
        self.cells.insert(coord)
    }

    /// Clear a cell. Returns false if it was already empty.
    pub fn remove(&mut self, coord: VoxelCoord) -> bool {
        self.cells.remove(&coord)
    }

    pub fn iter(&self) -> impl Iterator<Item = VoxelCoord> + '_ {
        self.cells.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Owned copy of every occupied coordinate, sorted by (y, z, x).
    ///
    /// Passes scan this instead of the live set so that staged writes can
    /// never be observed mid-scan, and so scan order is reproducible.
    pub fn snapshot(&self) -> Vec<VoxelCoord> {
        let mut coords: Vec<VoxelCoord> = self.cells.iter().copied().collect();
        coords.sort_unstable_by_key(|c| (c.y, c.z, c.x));
        coords
    }

    /// Occupied face-adjacent neighbors of `coord`.
    pub fn face_neighbors(&self, coord: VoxelCoord) -> impl Iterator<Item = VoxelCoord> + '_ {
        FACE_DIRECTIONS
            .into_iter()
            .map(move |dir| dir.step(coord))
            .filter(move |n| self.contains(*n))
    }
}

impl FromIterator<VoxelCoord> for VoxelGrid {
    fn from_iter<I: IntoIterator<Item = VoxelCoord>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
