//! Tunable simulation parameters, deserialized from `data/sim.ron`.
//! Every field has a default so partial files are valid.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::material::DensityTable;

/// How per-voxel conductivity coefficients are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConductivityMode {
    /// Composition model for voxels that carry composition data,
    /// uniform coefficient for voxels that don't.
    #[default]
    Auto,
    /// Uniform coefficient for every voxel.
    Uniform,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffusionParams {
    pub rate: f64,
    pub uniform_coefficient: f64,
    pub mode: ConductivityMode,
}

impl Default for DiffusionParams {
    fn default() -> Self {
        Self {
            rate: DIFFUSION_RATE,
            uniform_coefficient: UNIFORM_CONDUCTIVITY,
            mode: ConductivityMode::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterParams {
    pub evaporation_threshold: f64,
    pub max_transfer: f64,
    pub create_threshold: f64,
    pub min_height: f64,
    pub max_height: f64,
}

impl Default for WaterParams {
    fn default() -> Self {
        Self {
            evaporation_threshold: EVAPORATION_THRESHOLD,
            max_transfer: SPILL_MAX_TRANSFER,
            create_threshold: SPILL_CREATE_THRESHOLD,
            min_height: WATER_MIN_HEIGHT,
            max_height: WATER_MAX_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GravityParams {
    /// Move a falling voxel's property record along with it.
    /// Off by default: the record stays behind as an orphan.
    pub carry_records: bool,
}

/// Inclusive range a scalar property is clamped into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const UNIT: Bounds = Bounds { min: 0.0, max: 1.0 };

    pub fn clamp(self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::UNIT
    }
}

/// Per-property bounds applied by the clamp/recompute pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClampTable {
    pub humidity: Bounds,
    pub heat: Bounds,
    pub water: Bounds,
    pub nutrient: Bounds,
    pub minerals: Bounds,
    pub organic: Bounds,
}

impl ClampTable {
    /// All bounds with their names, for validation messages.
    pub fn named(&self) -> [(&'static str, Bounds); 6] {
        [
            ("humidity", self.humidity),
            ("heat", self.heat),
            ("water", self.water),
            ("nutrient", self.nutrient),
            ("minerals", self.minerals),
            ("organic", self.organic),
        ]
    }
}

/// Everything the tick loop and its driver need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// Logical tick length in seconds.
    pub dt: f64,
    pub diffusion: DiffusionParams,
    pub water: WaterParams,
    pub gravity: GravityParams,
    pub clamp: ClampTable,
    pub densities: DensityTable,
    /// Voxel volume in m^3 used for mass recomputation.
    pub voxel_volume: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            diffusion: DiffusionParams::default(),
            water: WaterParams::default(),
            gravity: GravityParams::default(),
            clamp: ClampTable::default(),
            densities: DensityTable::default(),
            voxel_volume: VOXEL_VOLUME_M3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let p = SimParams::default();
        assert_eq!(p.dt, 3600.0);
        assert_eq!(p.diffusion.rate, 0.1);
        assert_eq!(p.diffusion.mode, ConductivityMode::Auto);
        assert_eq!(p.water.evaporation_threshold, 0.01);
        assert_eq!(p.water.max_transfer, 0.1);
        assert_eq!(p.water.create_threshold, 0.1);
        assert!(!p.gravity.carry_records);
        assert_eq!(p.clamp.heat, Bounds::UNIT);
    }

    #[test]
    fn test_bounds_clamp() {
        let b = Bounds { min: 0.2, max: 0.8 };
        assert_eq!(b.clamp(0.0), 0.2);
        assert_eq!(b.clamp(1.0), 0.8);
        assert_eq!(b.clamp(0.5), 0.5);
    }
}
