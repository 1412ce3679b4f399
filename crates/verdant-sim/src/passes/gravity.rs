//! Structural settling: unsupported voxels drop one cell per tick.
//!
//! Support is judged against the grid as it was when the pass started, and
//! every fall is applied at once afterwards. In a floating column only the
//! bottom voxel falls in a given pass, and reaching the ground takes several
//! ticks. y = 0 is implicit ground.

use verdant_core::direction::Direction;
use verdant_core::types::VoxelCoord;
use verdant_world::grid::VoxelGrid;
use verdant_world::store::PropertyStore;

use crate::staging::StructuralBatch;

/// Outcome of one gravity pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GravityReport {
    /// (from, to) for every voxel that fell, in scan order.
    pub moves: Vec<(VoxelCoord, VoxelCoord)>,
}

impl GravityReport {
    /// Whether any voxel moved (topology changed).
    pub fn changed(&self) -> bool {
        !self.moves.is_empty()
    }
}

/// Drop every voxel above y = 0 whose cell below is empty by one cell.
///
/// `dt` does not scale displacement: the fall rate is fixed at one cell per tick.
pub fn gravity(grid: &mut VoxelGrid, dt: f64) -> GravityReport {
    let mut batch = StructuralBatch::new();
    let mut moves = Vec::new();

    for coord in grid.snapshot() {
        if coord.y <= 0 {
            continue;
        }
        let below = Direction::Down.step(coord);
        if !grid.contains(below) {
            batch.remove(coord);
            batch.insert(below);
            moves.push((coord, below));
        }
    }

    if batch.is_empty() {
        return GravityReport::default();
    }

    let (removed, inserted) = batch.apply_to_grid(grid);
    log::trace!("gravity: dt={dt} removed={removed} inserted={inserted}");

    GravityReport { moves }
}

/// Move each fallen voxel's record to its new cell.
///
/// Without this, a fallen voxel reads as neutral soil and its old record is
/// left behind as an orphan.
pub fn carry_records(store: &mut PropertyStore, report: &GravityReport) -> usize {
    let mut carried = 0;
    for &(from, to) in &report.moves {
        if let Some(record) = store.remove(from) {
            store.insert(to, record);
            carried += 1;
        }
    }
    carried
}
