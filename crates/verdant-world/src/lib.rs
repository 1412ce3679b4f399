pub mod grid;
pub mod pick;
pub mod store;

use glam::Vec3;
use grid::VoxelGrid;
use pick::PickParams;
use store::PropertyStore;
use verdant_core::types::{GeoRef, VoxelCoord};

/// Primary public struct for the verdant-world crate.
/// Owns the voxel grid and its property store as one unit handed to the tick.
///
/// Readers (renderers, picking) must only borrow it between ticks.
#[derive(Debug, Clone, Default)]
pub struct World {
    grid: VoxelGrid,
    store: PropertyStore,
}

impl World {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an externally generated grid and store. Keys need not match:
    /// orphan records and record-less voxels are both tolerated.
    pub fn from_parts(grid: VoxelGrid, store: PropertyStore) -> Self {
        let world = Self { grid, store };
        let orphans = world.orphan_count();
        if orphans > 0 {
            log::debug!(
                "World: {} voxels, {} records ({} orphaned)",
                world.grid.len(),
                world.store.len(),
                orphans
            );
        }
        world
    }

    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut VoxelGrid {
        &mut self.grid
    }

    pub fn store(&self) -> &PropertyStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut PropertyStore {
        &mut self.store
    }

    /// Both halves mutably at once, for passes that touch topology and properties.
    pub fn split_mut(&mut self) -> (&mut VoxelGrid, &mut PropertyStore) {
        (&mut self.grid, &mut self.store)
    }

    pub fn into_parts(self) -> (VoxelGrid, PropertyStore) {
        (self.grid, self.store)
    }

    pub fn voxel_count(&self) -> usize {
        self.grid.len()
    }

    pub fn orphan_count(&self) -> usize {
        self.store.orphan_count(&self.grid)
    }

    /// Geographic reference of a coordinate (pure projection).
    pub fn geo_reference(&self, coord: VoxelCoord) -> GeoRef {
        GeoRef::from_coord(coord)
    }

    /// First occupied voxel along a ray with default pick parameters.
    pub fn pick(&self, origin: Vec3, direction: Vec3) -> Option<VoxelCoord> {
        pick::pick_voxel(&self.grid, origin, direction, PickParams::default())
    }
}
