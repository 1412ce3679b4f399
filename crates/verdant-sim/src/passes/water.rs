//! Liquid handling for water voxels: fill height, evaporation and downward spill.
//!
//! Every decision reads the start-of-pass grid and records. Removals,
//! new voxels and water transfers are staged and applied after the scan.

use verdant_core::direction::Direction;
use verdant_core::material::VoxelType;
use verdant_core::params::WaterParams;
use verdant_core::properties::{Property, PropertyRecord};
use verdant_core::types::VoxelCoord;
use verdant_world::grid::VoxelGrid;
use verdant_world::store::PropertyStore;

use crate::staging::{DeltaBatch, StructuralBatch};

/// Outcome of one spill pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpillReport {
    /// Water voxels removed for falling below the evaporation threshold.
    pub evaporated: Vec<VoxelCoord>,
    /// New water voxels created below an existing one.
    pub created: Vec<VoxelCoord>,
    /// Spills into an existing lower water voxel.
    pub transfers: usize,
    /// Total water moved by those spills.
    pub transferred: f64,
}

impl SpillReport {
    /// Whether the pass added or removed any voxel.
    pub fn changed(&self) -> bool {
        !self.evaporated.is_empty() || !self.created.is_empty()
    }
}

/// Record for a water voxel spawned below a spilling one.
fn spawned_water(water: f64, params: &WaterParams) -> PropertyRecord {
    let mut record = PropertyRecord {
        kind: VoxelType::Water,
        water,
        humidity: 1.0,
        heat: 0.5,
        nutrient: 0.5,
        height: water.clamp(params.min_height, params.max_height),
        ..PropertyRecord::neutral()
    };
    record.refresh_mass();
    record
}

/// Run the spill rules over every water voxel.
///
/// Per water voxel with amount `w`:
/// - height = clamp(w, min_height, max_height)
/// - w below the evaporation threshold: the voxel is removed
/// - lower neighbor is water holding less: move min(max_transfer, w - w_below) down
/// - otherwise, open cell below (y > 0) and w above the create threshold:
///   spawn a water voxel holding w/2 there and keep w/2
///
/// Non-water voxels are untouched.
pub fn spill(grid: &mut VoxelGrid, store: &mut PropertyStore, params: &WaterParams) -> SpillReport {
    let mut structure = StructuralBatch::new();
    let mut water = DeltaBatch::new();
    let mut heights: Vec<(VoxelCoord, f64)> = Vec::new();
    let mut report = SpillReport::default();

    for coord in grid.snapshot() {
        let record = store.record(coord);
        if !record.kind.is_liquid() {
            continue;
        }
        let w = record.water;
        heights.push((coord, w.clamp(params.min_height, params.max_height)));

        if w < params.evaporation_threshold {
            structure.remove(coord);
            report.evaporated.push(coord);
        }

        let below = Direction::Down.step(coord);
        if grid.contains(below) {
            let lower = store.record(below);
            if lower.kind.is_liquid() && lower.water < w {
                let amount = params.max_transfer.min(w - lower.water);
                water.transfer(coord, below, amount);
                report.transfers += 1;
                report.transferred += amount;
            }
        } else if coord.y > 0 && w > params.create_threshold {
            let half = w * 0.5;
            structure.insert_with_record(below, spawned_water(half, params));
            water.add(coord, -half);
            report.created.push(below);
        }
    }

    for (coord, height) in heights {
        store.entry(coord).height = height;
    }
    water.apply(store, Property::Water);
    let (removed, inserted) = structure.apply(grid, store);

    if removed > 0 || inserted > 0 {
        log::debug!(
            "spill: evaporated={removed} created={inserted} transfers={}",
            report.transfers
        );
    }

    report
}
