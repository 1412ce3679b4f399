use crate::constants::{DRY_SOIL_DENSITY, ROCK_DENSITY, SOIL_POROSITY, WATER_DENSITY};
use crate::material::{DensityTable, VoxelType};

/// Two-phase soil density: solid fraction plus pores split between air-dry
/// soil and water by `humidity`. Not range-checked; values outside [0, 1]
/// extrapolate linearly.
fn two_phase_soil(dry: f64, water: f64, humidity: f64) -> f64 {
    dry * (1.0 - SOIL_POROSITY)
        + (dry * SOIL_POROSITY) * (1.0 - humidity)
        + water * SOIL_POROSITY * humidity
}

/// Mass in kilograms of one voxel of `kind` at `humidity`.
///
/// Rock and water are constant. Soil uses the two-phase model with 50%
/// porosity. Organic has no dedicated model and takes the dry soil density.
pub fn voxel_mass(kind: VoxelType, humidity: f64) -> f64 {
    match kind {
        VoxelType::Rock => ROCK_DENSITY,
        VoxelType::Water => WATER_DENSITY,
        VoxelType::Soil => two_phase_soil(DRY_SOIL_DENSITY, WATER_DENSITY, humidity),
        VoxelType::Organic => DRY_SOIL_DENSITY,
    }
}

/// Mass recomputed from a configurable density table and voxel volume.
/// Soil keeps the two-phase model; every other type is density * volume.
pub fn mass_from_table(kind: VoxelType, humidity: f64, table: &DensityTable, volume: f64) -> f64 {
    let density = match kind {
        VoxelType::Soil => two_phase_soil(table.soil, table.water, humidity),
        other => table.density(other),
    };
    density * volume
}

/// Harmonic mean of two non-negative coefficients; 0 when both are 0.
pub fn harmonic_mean(a: f64, b: f64) -> f64 {
    let sum = a + b;
    if sum > 0.0 {
        2.0 * a * b / sum
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_masses() {
        assert_eq!(voxel_mass(VoxelType::Rock, 0.0), 2600.0);
        assert_eq!(voxel_mass(VoxelType::Rock, 0.9), 2600.0);
        assert_eq!(voxel_mass(VoxelType::Water, 0.3), 1000.0);
    }

    #[test]
    fn test_soil_mass_endpoints() {
        // Dry: 800 + 800 = 1600
        assert!((voxel_mass(VoxelType::Soil, 0.0) - 1600.0).abs() < 1e-9);
        // Saturated: 800 + 500 = 1300
        assert!((voxel_mass(VoxelType::Soil, 1.0) - 1300.0).abs() < 1e-9);
        // Neutral: 800 + 400 + 250 = 1450
        assert!((voxel_mass(VoxelType::Soil, 0.5) - 1450.0).abs() < 1e-9);
    }

    #[test]
    fn test_soil_mass_extrapolates() {
        // humidity 2.0: 800 + 800*(-1) + 500*2 = 1000
        assert!((voxel_mass(VoxelType::Soil, 2.0) - 1000.0).abs() < 1e-9);
        // humidity -1.0: 800 + 1600 - 500 = 1900
        assert!((voxel_mass(VoxelType::Soil, -1.0) - 1900.0).abs() < 1e-9);
    }

    #[test]
    fn test_organic_uses_dry_soil_density() {
        assert_eq!(voxel_mass(VoxelType::Organic, 0.7), 1600.0);
    }

    #[test]
    fn test_mass_from_default_table_matches_model_for_soil() {
        let table = DensityTable::default();
        for h in [0.0, 0.25, 0.5, 1.0] {
            let a = mass_from_table(VoxelType::Soil, h, &table, 1.0);
            let b = voxel_mass(VoxelType::Soil, h);
            assert!((a - b).abs() < 1e-9, "humidity {h}: {a} vs {b}");
        }
    }

    #[test]
    fn test_mass_from_table_scales_with_volume() {
        let table = DensityTable::default();
        assert_eq!(mass_from_table(VoxelType::Organic, 0.5, &table, 2.0), 2600.0);
        assert_eq!(mass_from_table(VoxelType::Water, 0.5, &table, 0.5), 500.0);
    }

    #[test]
    fn test_harmonic_mean() {
        assert_eq!(harmonic_mean(1.0, 1.0), 1.0);
        assert_eq!(harmonic_mean(0.0, 0.0), 0.0);
        assert_eq!(harmonic_mean(0.0, 5.0), 0.0);
        assert!((harmonic_mean(1.0, 3.0) - 1.5).abs() < 1e-12);
    }
}
