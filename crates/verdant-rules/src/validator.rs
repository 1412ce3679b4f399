use std::collections::HashSet;

use thiserror::Error;
use verdant_core::catalog::{SubstanceCatalog, CLAY, HUMUS, QUARTZ, WATER};
use verdant_core::constants::{DIFFUSION_STABILITY_LIMIT, MAX_COMPOSITION_CONDUCTIVITY};
use verdant_core::params::{ConductivityMode, SimParams};
use verdant_core::properties::CompositionSet;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Tick length dt must be positive, got {0}")]
    NonPositiveDt(f64),
    #[error("Diffusion rate must be non-negative, got {0}")]
    NegativeRate(f64),
    #[error("Uniform conductivity must be non-negative, got {0}")]
    NegativeConductivity(f64),
    #[error("Clamp bounds for '{name}' are inverted: min {min} > max {max}")]
    InvertedBounds { name: &'static str, min: f64, max: f64 },
    #[error("Water height range is inverted: min {min} > max {max}")]
    InvertedHeight { min: f64, max: f64 },
    #[error("Density for '{name}' must be positive, got {value}")]
    NonPositiveDensity { name: &'static str, value: f64 },
    #[error("Voxel volume must be positive, got {0}")]
    NonPositiveVolume(f64),
    #[error("Diffusion step is unstable: rate*dt*max_coeff*6 = {factor:.3} (limit {limit})")]
    UnstableDiffusion { factor: f64, limit: f64 },
    #[error("Duplicate substance id '{0}' in catalog")]
    DuplicateSubstance(String),
    #[error("Substance '{id}' in {category} composition is not in the catalog")]
    UnknownSubstance { category: &'static str, id: String },
}

/// Validate simulation parameters for values the tick cannot run with.
/// Stability is checked separately by [`check_stability`].
pub fn validate_params(params: &SimParams) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if params.dt <= 0.0 {
        errors.push(ValidationError::NonPositiveDt(params.dt));
    }
    if params.diffusion.rate < 0.0 {
        errors.push(ValidationError::NegativeRate(params.diffusion.rate));
    }
    if params.diffusion.uniform_coefficient < 0.0 {
        errors.push(ValidationError::NegativeConductivity(
            params.diffusion.uniform_coefficient,
        ));
    }

    for (name, bounds) in params.clamp.named() {
        if bounds.min > bounds.max {
            errors.push(ValidationError::InvertedBounds {
                name,
                min: bounds.min,
                max: bounds.max,
            });
        }
    }

    if params.water.min_height > params.water.max_height {
        errors.push(ValidationError::InvertedHeight {
            min: params.water.min_height,
            max: params.water.max_height,
        });
    }

    let d = &params.densities;
    for (name, value) in [
        ("soil", d.soil),
        ("rock", d.rock),
        ("water", d.water),
        ("organic", d.organic),
    ] {
        if value <= 0.0 {
            errors.push(ValidationError::NonPositiveDensity { name, value });
        }
    }

    if params.voxel_volume <= 0.0 {
        errors.push(ValidationError::NonPositiveVolume(params.voxel_volume));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Explicit-step stability factor: rate * dt * largest coefficient * 6 neighbors.
pub fn stability_factor(params: &SimParams) -> f64 {
    let max_coeff = match params.diffusion.mode {
        ConductivityMode::Auto => params
            .diffusion
            .uniform_coefficient
            .max(MAX_COMPOSITION_CONDUCTIVITY),
        ConductivityMode::Uniform => params.diffusion.uniform_coefficient,
    };
    params.diffusion.rate * params.dt * max_coeff * 6.0
}

/// Returns `UnstableDiffusion` when a single diffusion pass can overshoot.
/// Callers treat this as a warning: the clamp pass keeps unstable runs bounded.
pub fn check_stability(params: &SimParams) -> Option<ValidationError> {
    let factor = stability_factor(params);
    if factor >= DIFFUSION_STABILITY_LIMIT {
        Some(ValidationError::UnstableDiffusion {
            factor,
            limit: DIFFUSION_STABILITY_LIMIT,
        })
    } else {
        None
    }
}

/// Validate catalog id uniqueness. Logs a warning for each substance the
/// conductivity model reads that the catalog lacks.
pub fn validate_catalog(catalog: &SubstanceCatalog) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for id in catalog
        .minerals
        .iter()
        .chain(&catalog.inorganic)
        .chain(&catalog.organic)
    {
        if !seen.insert(id.as_str()) {
            errors.push(ValidationError::DuplicateSubstance(id.clone()));
        }
    }

    for (present, id) in [
        (catalog.has_mineral(QUARTZ), QUARTZ),
        (catalog.has_mineral(CLAY), CLAY),
        (catalog.has_inorganic(WATER), WATER),
        (catalog.has_organic(HUMUS), HUMUS),
    ] {
        if !present {
            log::warn!("Catalog lacks '{id}'; its conductivity term will always be zero");
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate that every composition key appears in the matching catalog category.
pub fn validate_composition(
    composition: &CompositionSet,
    catalog: &SubstanceCatalog,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for id in composition.minerals.ids() {
        if !catalog.has_mineral(id) {
            errors.push(ValidationError::UnknownSubstance {
                category: "minerals",
                id: id.to_string(),
            });
        }
    }
    for id in composition.inorganic.ids() {
        if !catalog.has_inorganic(id) {
            errors.push(ValidationError::UnknownSubstance {
                category: "inorganic",
                id: id.to_string(),
            });
        }
    }
    for id in composition.organic.ids() {
        if !catalog.has_organic(id) {
            errors.push(ValidationError::UnknownSubstance {
                category: "organic",
                id: id.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
