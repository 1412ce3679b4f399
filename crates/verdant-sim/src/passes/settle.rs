//! Clamp/recompute pass run by the driver between ticks.
//!
//! The tick itself never clamps: diffusion may overshoot and spills may
//! leave water above 1. This pass pulls every scalar back into its bounds
//! and recomputes mass from the configured densities.

use verdant_core::material::DensityTable;
use verdant_core::math::mass_from_table;
use verdant_core::params::ClampTable;
use verdant_world::store::PropertyStore;

/// Clamp every record into `table` and recompute its mass.
/// Returns the number of records that had at least one value out of bounds.
pub fn settle(
    store: &mut PropertyStore,
    table: &ClampTable,
    densities: &DensityTable,
    volume: f64,
) -> usize {
    let mut clamped = 0;
    for (_, record) in store.iter_mut() {
        let before = [
            record.humidity,
            record.heat,
            record.water,
            record.nutrient,
            record.minerals,
            record.organic,
        ];
        record.humidity = table.humidity.clamp(record.humidity);
        record.heat = table.heat.clamp(record.heat);
        record.water = table.water.clamp(record.water);
        record.nutrient = table.nutrient.clamp(record.nutrient);
        record.minerals = table.minerals.clamp(record.minerals);
        record.organic = table.organic.clamp(record.organic);
        let after = [
            record.humidity,
            record.heat,
            record.water,
            record.nutrient,
            record.minerals,
            record.organic,
        ];
        if before != after {
            clamped += 1;
        }
        record.mass = mass_from_table(record.kind, record.humidity, densities, volume);
    }
    if clamped > 0 {
        log::debug!("settle: clamped {clamped} of {} records", store.len());
    }
    clamped
}
