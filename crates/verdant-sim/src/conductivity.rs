//! Per-voxel transfer coefficients.
//!
//! Voxels carrying composition data derive a coefficient from their quartz,
//! clay, water and humus fractions; voxels without it (or every voxel in
//! `ConductivityMode::Uniform`) use the configured uniform coefficient.

use verdant_core::catalog::{CLAY, HUMUS, QUARTZ, WATER};
use verdant_core::params::{ConductivityMode, DiffusionParams};
use verdant_core::properties::{CompositionSet, Property, PropertyRecord};

/// Coefficient used by the composition model for properties it has no
/// tuned weights for.
const UNTUNED_COEFFICIENT: f64 = 0.1;

/// Composition-derived coefficient.
///
/// Heat conducts best through quartz, then water, clay, humus. Humidity
/// moves through water, clay, humus, quartz. Nutrients through water,
/// humus, clay, quartz.
pub fn composition_conductivity(property: Property, composition: &CompositionSet) -> f64 {
    let quartz = composition.minerals.fraction(QUARTZ);
    let clay = composition.minerals.fraction(CLAY);
    let water = composition.inorganic.fraction(WATER);
    let humus = composition.organic.fraction(HUMUS);

    match property {
        Property::Heat => 0.2 + 0.6 * quartz + 0.4 * water + 0.2 * clay + 0.05 * humus,
        Property::Humidity => 0.1 + 0.5 * water + 0.3 * clay + 0.2 * humus + 0.05 * quartz,
        Property::Nutrient => 0.1 + 0.5 * water + 0.3 * humus + 0.2 * clay + 0.05 * quartz,
        Property::Water => UNTUNED_COEFFICIENT,
    }
}

/// Coefficient of one voxel for one property. Never negative.
pub fn conductivity(property: Property, record: &PropertyRecord, params: &DiffusionParams) -> f64 {
    let coeff = match (params.mode, &record.composition) {
        (ConductivityMode::Auto, Some(composition)) => {
            composition_conductivity(property, composition)
        }
        _ => params.uniform_coefficient,
    };
    coeff.max(0.0)
}
