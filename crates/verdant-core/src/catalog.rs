use serde::{Deserialize, Serialize};

/// Mineral substance driving heat conduction.
pub const QUARTZ: &str = "quartz";
/// Mineral substance driving moisture and nutrient mobility.
pub const CLAY: &str = "clay";
/// Inorganic substance: free water.
pub const WATER: &str = "water";
/// Organic substance: decomposed organic matter.
pub const HUMUS: &str = "humus";

/// The fixed set of substance ids a composition map may use, per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubstanceCatalog {
    pub minerals: Vec<String>,
    pub inorganic: Vec<String>,
    pub organic: Vec<String>,
}

impl SubstanceCatalog {
    pub fn has_mineral(&self, id: &str) -> bool {
        self.minerals.iter().any(|m| m == id)
    }

    pub fn has_inorganic(&self, id: &str) -> bool {
        self.inorganic.iter().any(|m| m == id)
    }

    pub fn has_organic(&self, id: &str) -> bool {
        self.organic.iter().any(|m| m == id)
    }

    /// Total number of ids across categories.
    pub fn len(&self) -> usize {
        self.minerals.len() + self.inorganic.len() + self.organic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
