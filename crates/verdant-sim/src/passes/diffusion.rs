//! Lossless neighbor-to-neighbor transfer of one scalar property.
//!
//! Jacobi-style: all values and coefficients are read before any delta is
//! written. Each unordered pair of occupied face neighbors is evaluated once
//! by looking only in the +x, +y and +z directions, and its flux is
//! subtracted from one side and added to the other, so a pass never creates
//! or destroys the property. Results are not clamped.

use std::collections::HashMap;

use verdant_core::direction::POSITIVE_DIRECTIONS;
use verdant_core::math::harmonic_mean;
use verdant_core::params::DiffusionParams;
use verdant_core::properties::Property;
use verdant_core::types::VoxelCoord;
use verdant_world::grid::VoxelGrid;
use verdant_world::store::PropertyStore;

use crate::conductivity::conductivity;
use crate::staging::DeltaBatch;

/// Outcome of one diffusion pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffusionReport {
    pub property: Property,
    /// Neighbor pairs evaluated.
    pub pairs: usize,
    /// Sum of |flux| over all pairs.
    pub moved: f64,
}

/// Value and coefficient of one voxel, read once per pass.
#[derive(Debug, Clone, Copy)]
struct Sample {
    value: f64,
    coeff: f64,
}

/// Diffuse `property` across every occupied face-neighbor pair.
///
/// Interface coefficient = harmonic mean of the two voxel coefficients
/// times `rate * dt`; flux = (value_a - value_b) * interface.
pub fn diffuse(
    grid: &VoxelGrid,
    store: &mut PropertyStore,
    property: Property,
    params: &DiffusionParams,
    dt: f64,
) -> DiffusionReport {
    let snapshot = grid.snapshot();
    let scale = params.rate * dt;

    let samples: HashMap<VoxelCoord, Sample> = snapshot
        .iter()
        .map(|&coord| {
            let record = store.record(coord);
            let sample = Sample {
                value: record.get(property),
                coeff: conductivity(property, record, params),
            };
            (coord, sample)
        })
        .collect();

    let mut deltas = DeltaBatch::new();
    let mut pairs = 0;
    let mut moved = 0.0;

    for &a in &snapshot {
        let sa = samples[&a];
        for dir in POSITIVE_DIRECTIONS {
            let b = dir.step(a);
            let Some(sb) = samples.get(&b) else {
                continue;
            };
            let interface = harmonic_mean(sa.coeff, sb.coeff) * scale;
            let flux = (sa.value - sb.value) * interface;
            deltas.transfer(a, b, flux);
            pairs += 1;
            moved += flux.abs();
        }
    }

    let written = deltas.apply(store, property);
    log::trace!(
        "diffuse {}: pairs={pairs} written={written} moved={moved:.6}",
        property.name()
    );

    DiffusionReport {
        property,
        pairs,
        moved,
    }
}
