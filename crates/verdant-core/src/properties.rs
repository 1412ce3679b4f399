use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{NEUTRAL_SCALAR, WATER_MAX_HEIGHT};
use crate::material::VoxelType;
use crate::math::voxel_mass;

/// Scalar property that diffuses between neighboring voxels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Humidity,
    Heat,
    Water,
    Nutrient,
}

/// Diffused properties in the fixed per-tick order.
pub const DIFFUSED_PROPERTIES: [Property; 4] = [
    Property::Humidity,
    Property::Heat,
    Property::Water,
    Property::Nutrient,
];

impl Property {
    pub fn name(self) -> &'static str {
        match self {
            Property::Humidity => "humidity",
            Property::Heat => "heat",
            Property::Water => "water",
            Property::Nutrient => "nutrient",
        }
    }
}

/// Fractional amounts keyed by substance id (e.g. "quartz", "humus").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Composition(pub BTreeMap<String, f64>);

impl Composition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of `id`, or 0.0 when the substance is absent.
    pub fn fraction(&self, id: &str) -> f64 {
        self.0.get(id).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, id: impl Into<String>, fraction: f64) {
        self.0.insert(id.into(), fraction);
    }

    /// Builder-style insert for literal compositions.
    pub fn with(mut self, id: impl Into<String>, fraction: f64) -> Self {
        self.set(id, fraction);
        self
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The three composition maps of a voxel. Present or absent as a unit:
/// its presence switches the voxel's conductivity to the composition model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositionSet {
    pub minerals: Composition,
    pub inorganic: Composition,
    pub organic: Composition,
}

/// Per-voxel physical properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyRecord {
    pub kind: VoxelType,
    pub humidity: f64,
    pub heat: f64,
    pub water: f64,
    pub nutrient: f64,
    /// Aggregate mineral fraction.
    pub minerals: f64,
    /// Aggregate organic fraction.
    pub organic: f64,
    pub composition: Option<CompositionSet>,
    /// Visual fill height of a water voxel. Informational only.
    pub height: f64,
    /// Derived mass in kg. Only written through `refresh_mass` or the clamp pass.
    pub mass: f64,
}

impl Default for PropertyRecord {
    fn default() -> Self {
        Self::neutral()
    }
}

impl PropertyRecord {
    /// Record substituted for any occupied voxel that has none:
    /// every scalar 0.5, type soil, no composition.
    pub fn neutral() -> Self {
        Self {
            kind: VoxelType::Soil,
            humidity: NEUTRAL_SCALAR,
            heat: NEUTRAL_SCALAR,
            water: NEUTRAL_SCALAR,
            nutrient: NEUTRAL_SCALAR,
            minerals: NEUTRAL_SCALAR,
            organic: NEUTRAL_SCALAR,
            composition: None,
            height: WATER_MAX_HEIGHT,
            mass: voxel_mass(VoxelType::Soil, NEUTRAL_SCALAR),
        }
    }

    /// Neutral record of the given type, mass included.
    pub fn of_kind(kind: VoxelType) -> Self {
        let mut record = Self {
            kind,
            ..Self::neutral()
        };
        record.refresh_mass();
        record
    }

    /// Builder-style composition setter.
    pub fn with_composition(mut self, composition: CompositionSet) -> Self {
        self.composition = Some(composition);
        self
    }

    pub fn get(&self, property: Property) -> f64 {
        match property {
            Property::Humidity => self.humidity,
            Property::Heat => self.heat,
            Property::Water => self.water,
            Property::Nutrient => self.nutrient,
        }
    }

    pub fn set(&mut self, property: Property, value: f64) {
        match property {
            Property::Humidity => self.humidity = value,
            Property::Heat => self.heat = value,
            Property::Water => self.water = value,
            Property::Nutrient => self.nutrient = value,
        }
    }

    /// Recompute `mass` from type and humidity.
    pub fn refresh_mass(&mut self) {
        self.mass = voxel_mass(self.kind, self.humidity);
    }

    pub fn has_composition(&self) -> bool {
        self.composition.is_some()
    }
}
