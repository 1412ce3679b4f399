use std::collections::HashMap;

use verdant_core::properties::{Property, PropertyRecord};
use verdant_core::types::VoxelCoord;

use crate::grid::VoxelGrid;

/// Per-voxel property records keyed by coordinate.
///
/// Lookups never fail: a coordinate without a record reads as the neutral
/// record. Records may outlive their voxel (orphans); they are tolerated
/// and never purged here.
#[derive(Debug, Clone)]
pub struct PropertyStore {
    records: HashMap<VoxelCoord, PropertyRecord>,
    neutral: PropertyRecord,
}

impl Default for PropertyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyStore {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            neutral: PropertyRecord::neutral(),
        }
    }

    /// The stored record, if one exists.
    pub fn get(&self, coord: VoxelCoord) -> Option<&PropertyRecord> {
        self.records.get(&coord)
    }

    /// The stored record, or the neutral record when absent.
    pub fn record(&self, coord: VoxelCoord) -> &PropertyRecord {
        self.records.get(&coord).unwrap_or(&self.neutral)
    }

    /// One scalar, defaulting to the neutral value.
    pub fn value(&self, coord: VoxelCoord, property: Property) -> f64 {
        self.record(coord).get(property)
    }

    /// Mutable record, synthesized from the neutral record on first write.
    pub fn entry(&mut self, coord: VoxelCoord) -> &mut PropertyRecord {
        let neutral = &self.neutral;
        self.records.entry(coord).or_insert_with(|| neutral.clone())
    }

    /// Insert or replace a record, returning the previous one.
    pub fn insert(&mut self, coord: VoxelCoord, record: PropertyRecord) -> Option<PropertyRecord> {
        self.records.insert(coord, record)
    }

    pub fn remove(&mut self, coord: VoxelCoord) -> Option<PropertyRecord> {
        self.records.remove(&coord)
    }

    pub fn contains(&self, coord: VoxelCoord) -> bool {
        self.records.contains_key(&coord)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VoxelCoord, &PropertyRecord)> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&VoxelCoord, &mut PropertyRecord)> {
        self.records.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose coordinate is not occupied in `grid`.
    pub fn orphan_count(&self, grid: &VoxelGrid) -> usize {
        self.records.keys().filter(|c| !grid.contains(**c)).count()
    }
}

impl FromIterator<(VoxelCoord, PropertyRecord)> for PropertyStore {
    fn from_iter<I: IntoIterator<Item = (VoxelCoord, PropertyRecord)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
            neutral: PropertyRecord::neutral(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;
    use verdant_core::material::VoxelType;
    use verdant_core::properties::DIFFUSED_PROPERTIES;

    #[test]
    fn test_missing_record_reads_neutral() {
        let store = PropertyStore::new();
        let c = IVec3::new(4, 4, 4);
        assert!(store.get(c).is_none());
        let r = store.record(c);
        assert_eq!(r.kind, VoxelType::Soil);
        for p in DIFFUSED_PROPERTIES {
            assert_eq!(store.value(c, p), 0.5);
        }
        assert_eq!(r.minerals, 0.5);
        assert_eq!(r.organic, 0.5);
        // Reading never creates a record
        assert!(store.is_empty());
    }

    #[test]
    fn test_entry_synthesizes_neutral() {
        let mut store = PropertyStore::new();
        let c = IVec3::new(0, 1, 0);
        store.entry(c).heat = 0.8;
        assert_eq!(store.len(), 1);
        assert_eq!(store.value(c, Property::Heat), 0.8);
        assert_eq!(store.value(c, Property::Water), 0.5);
    }

    #[test]
    fn test_insert_replaces() {
        let mut store = PropertyStore::new();
        let c = IVec3::ZERO;
        assert!(store.insert(c, PropertyRecord::of_kind(VoxelType::Rock)).is_none());
        let prev = store.insert(c, PropertyRecord::of_kind(VoxelType::Water));
        assert_eq!(prev.map(|r| r.kind), Some(VoxelType::Rock));
        assert_eq!(store.record(c).kind, VoxelType::Water);
    }

    #[test]
    fn test_orphan_count() {
        let grid: VoxelGrid = [IVec3::new(0, 0, 0)].into_iter().collect();
        let store: PropertyStore = [
            (IVec3::new(0, 0, 0), PropertyRecord::neutral()),
            (IVec3::new(0, 1, 0), PropertyRecord::neutral()),
            (IVec3::new(0, 2, 0), PropertyRecord::neutral()),
        ]
        .into_iter()
        .collect();
        assert_eq!(store.orphan_count(&grid), 2);
    }
}
