use serde::{Deserialize, Serialize};

use crate::constants::{DRY_SOIL_DENSITY, ORGANIC_DENSITY, ROCK_DENSITY, WATER_DENSITY};

/// Bulk material of a voxel. Selects the mass model and the spill behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoxelType {
    #[default]
    Soil,
    Rock,
    Water,
    Organic,
}

impl VoxelType {
    /// Parse a lowercase type tag. Unknown tags are treated as soil.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "rock" => VoxelType::Rock,
            "water" => VoxelType::Water,
            "organic" => VoxelType::Organic,
            _ => VoxelType::Soil,
        }
    }

    /// Lowercase tag for debug display and data files.
    pub fn tag(self) -> &'static str {
        match self {
            VoxelType::Soil => "soil",
            VoxelType::Rock => "rock",
            VoxelType::Water => "water",
            VoxelType::Organic => "organic",
        }
    }

    pub fn is_liquid(self) -> bool {
        self == VoxelType::Water
    }
}

/// Per-type densities in kg/m^3 used when recomputing mass after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityTable {
    /// Dry soil (solid phase) density.
    pub soil: f64,
    pub rock: f64,
    /// Liquid water density, also the pore-water density in soil.
    pub water: f64,
    pub organic: f64,
}

impl Default for DensityTable {
    fn default() -> Self {
        Self {
            soil: DRY_SOIL_DENSITY,
            rock: ROCK_DENSITY,
            water: WATER_DENSITY,
            organic: ORGANIC_DENSITY,
        }
    }
}

impl DensityTable {
    /// Bulk density for a type. Soil returns the dry density.
    pub fn density(&self, kind: VoxelType) -> f64 {
        match kind {
            VoxelType::Soil => self.soil,
            VoxelType::Rock => self.rock,
            VoxelType::Water => self.water,
            VoxelType::Organic => self.organic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_known() {
        assert_eq!(VoxelType::from_tag("rock"), VoxelType::Rock);
        assert_eq!(VoxelType::from_tag("water"), VoxelType::Water);
        assert_eq!(VoxelType::from_tag("organic"), VoxelType::Organic);
        assert_eq!(VoxelType::from_tag("soil"), VoxelType::Soil);
    }

    #[test]
    fn test_from_tag_unknown_is_soil() {
        assert_eq!(VoxelType::from_tag("lava"), VoxelType::Soil);
        assert_eq!(VoxelType::from_tag(""), VoxelType::Soil);
        assert_eq!(VoxelType::from_tag("Water"), VoxelType::Soil);
    }

    #[test]
    fn test_tag_roundtrip() {
        for kind in [VoxelType::Soil, VoxelType::Rock, VoxelType::Water, VoxelType::Organic] {
            assert_eq!(VoxelType::from_tag(kind.tag()), kind);
        }
    }

    #[test]
    fn test_only_water_is_liquid() {
        assert!(VoxelType::Water.is_liquid());
        for kind in [VoxelType::Soil, VoxelType::Rock, VoxelType::Organic] {
            assert!(!kind.is_liquid(), "{kind:?}");
        }
    }

    #[test]
    fn test_default_is_soil() {
        assert_eq!(VoxelType::default(), VoxelType::Soil);
    }

    #[test]
    fn test_density_table_defaults() {
        let table = DensityTable::default();
        assert_eq!(table.density(VoxelType::Water), 1000.0);
        assert_eq!(table.density(VoxelType::Rock), 2600.0);
        assert_eq!(table.density(VoxelType::Soil), 1600.0);
        assert_eq!(table.density(VoxelType::Organic), 1300.0);
    }
}
