//! Deferred write batches.
//!
//! Every pass scans a snapshot and records its writes here; nothing touches
//! the live grid or store until the scan has finished. Applying a batch is
//! the only mutation a pass performs.

use std::collections::HashMap;

use verdant_core::properties::{Property, PropertyRecord};
use verdant_core::types::VoxelCoord;
use verdant_world::grid::VoxelGrid;
use verdant_world::store::PropertyStore;

/// Staged voxel removals and insertions.
///
/// Applied as all removals first, then all insertions, so a batch that moves
/// voxels never loses one to ordering.
#[derive(Debug, Default)]
pub(crate) struct StructuralBatch {
    removals: Vec<VoxelCoord>,
    insertions: Vec<(VoxelCoord, Option<PropertyRecord>)>,
}

impl StructuralBatch {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn remove(&mut self, coord: VoxelCoord) {
        self.removals.push(coord);
    }

    /// Stage an insertion that leaves the store untouched.
    pub(crate) fn insert(&mut self, coord: VoxelCoord) {
        self.insertions.push((coord, None));
    }

    /// Stage an insertion together with the record the new voxel starts with.
    pub(crate) fn insert_with_record(&mut self, coord: VoxelCoord, record: PropertyRecord) {
        self.insertions.push((coord, Some(record)));
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.removals.is_empty() && self.insertions.is_empty()
    }

    /// Apply to the grid only. Records attached to insertions are dropped.
    /// Returns (removed, inserted) counts of cells whose occupancy changed.
    pub(crate) fn apply_to_grid(self, grid: &mut VoxelGrid) -> (usize, usize) {
        let removed = self.removals.iter().filter(|c| grid.remove(**c)).count();
        let inserted = self
            .insertions
            .iter()
            .filter(|(c, _)| grid.insert(*c))
            .count();
        (removed, inserted)
    }

    /// Apply to the grid, then write attached records into the store.
    pub(crate) fn apply(self, grid: &mut VoxelGrid, store: &mut PropertyStore) -> (usize, usize) {
        let removed = self.removals.iter().filter(|c| grid.remove(**c)).count();
        let mut inserted = 0;
        for (coord, record) in self.insertions {
            if grid.insert(coord) {
                inserted += 1;
            }
            if let Some(record) = record {
                store.insert(coord, record);
            }
        }
        (removed, inserted)
    }
}

/// Staged additive changes to one scalar property.
#[derive(Debug, Default)]
pub(crate) struct DeltaBatch {
    deltas: HashMap<VoxelCoord, f64>,
}

impl DeltaBatch {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, coord: VoxelCoord, delta: f64) {
        *self.deltas.entry(coord).or_insert(0.0) += delta;
    }

    /// Move `amount` from `from` to `to`. Nets to zero across the pair.
    pub(crate) fn transfer(&mut self, from: VoxelCoord, to: VoxelCoord, amount: f64) {
        self.add(from, -amount);
        self.add(to, amount);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.deltas.len()
    }

    /// Sum of all staged deltas. Zero (up to rounding) for transfer-only batches.
    #[cfg(test)]
    pub(crate) fn net(&self) -> f64 {
        self.deltas.values().sum()
    }

    /// Add each delta to its record, synthesizing neutral records where
    /// missing, and refresh the mass of every written record.
    /// Returns the number of records written.
    pub(crate) fn apply(self, store: &mut PropertyStore, property: Property) -> usize {
        let written = self.deltas.len();
        for (coord, delta) in self.deltas {
            let record = store.entry(coord);
            let value = record.get(property) + delta;
            record.set(property, value);
            record.refresh_mass();
        }
        written
    }
}
