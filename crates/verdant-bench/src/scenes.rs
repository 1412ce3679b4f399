use glam::IVec3;
use verdant_core::material::VoxelType;
use verdant_core::properties::{Composition, CompositionSet, PropertyRecord};
use verdant_world::grid::VoxelGrid;
use verdant_world::store::PropertyStore;
use verdant_world::World;

/// Something placed on top of the base slab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Feature {
    /// Rock column starting at `base`; floats (and falls) when `base > 1`.
    Pillar { x: i32, z: i32, base: i32, height: i32 },
    /// Stack of water voxels starting at `base`, each holding `amount`.
    WaterColumn {
        x: i32,
        z: i32,
        base: i32,
        height: i32,
        amount: f64,
    },
}

/// Configuration for a single benchmark scene.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub name: &'static str,
    /// Slab footprint in x and z; the slab occupies y = 0.
    pub width: i32,
    pub depth: i32,
    pub features: Vec<Feature>,
}

/// Return the standard suite of benchmark scenes.
pub fn standard_scenes() -> Vec<SceneConfig> {
    vec![
        SceneConfig {
            name: "slab-32",
            width: 32,
            depth: 32,
            features: Vec::new(),
        },
        SceneConfig {
            name: "slab-64-pillars",
            width: 64,
            depth: 64,
            features: (0..8)
                .map(|i| Feature::Pillar {
                    x: 4 + i * 7,
                    z: 4 + (i * 13) % 56,
                    base: 3 + i % 4,
                    height: 4 + i % 3,
                })
                .collect(),
        },
        SceneConfig {
            name: "slab-64-water",
            width: 64,
            depth: 64,
            features: (0..12)
                .map(|i| Feature::WaterColumn {
                    x: 2 + (i * 5) % 60,
                    z: 3 + (i * 11) % 58,
                    base: 1 + i % 3,
                    height: 3,
                    amount: 0.3 + 0.05 * (i % 5) as f64,
                })
                .collect(),
        },
    ]
}

/// Deterministic value in [0, 1) derived from a position.
fn cell_noise(x: i32, z: i32) -> f64 {
    let hash = (x as i64).wrapping_mul(31337) ^ (z as i64).wrapping_mul(7919);
    hash.rem_euclid(100) as f64 / 100.0
}

/// Soil record for a slab cell. Every fourth cell carries composition data
/// so both conductivity models are exercised.
fn slab_record(x: i32, z: i32) -> PropertyRecord {
    let n = cell_noise(x, z);
    let mut record = PropertyRecord {
        humidity: 0.2 + 0.6 * n,
        heat: 0.3 + 0.4 * (1.0 - n),
        water: 0.1 + 0.3 * n,
        nutrient: 0.5 * n,
        ..PropertyRecord::neutral()
    };
    record.refresh_mass();
    if (x + z) % 4 == 0 {
        record = record.with_composition(loam(n));
    }
    record
}

fn loam(n: f64) -> CompositionSet {
    CompositionSet {
        minerals: Composition::new()
            .with("quartz", 0.4 + 0.2 * n)
            .with("clay", 0.2)
            .with("feldspar", 0.1),
        inorganic: Composition::new().with("water", 0.15 + 0.1 * n),
        organic: Composition::new().with("humus", 0.05),
    }
}

/// Build the world for a scene from its literal layout.
pub fn build_world(config: &SceneConfig) -> World {
    let mut grid = VoxelGrid::new();
    let mut store = PropertyStore::new();

    for x in 0..config.width {
        for z in 0..config.depth {
            let c = IVec3::new(x, 0, z);
            grid.insert(c);
            store.insert(c, slab_record(x, z));
        }
    }

    for feature in &config.features {
        match *feature {
            Feature::Pillar {
                x,
                z,
                base,
                height,
            } => {
                for y in base..base + height {
                    let c = IVec3::new(x, y, z);
                    grid.insert(c);
                    store.insert(c, PropertyRecord::of_kind(VoxelType::Rock));
                }
            }
            Feature::WaterColumn {
                x,
                z,
                base,
                height,
                amount,
            } => {
                for y in base..base + height {
                    let c = IVec3::new(x, y, z);
                    grid.insert(c);
                    store.insert(
                        c,
                        PropertyRecord {
                            water: amount,
                            humidity: 1.0,
                            ..PropertyRecord::of_kind(VoxelType::Water)
                        },
                    );
                }
            }
        }
    }

    World::from_parts(grid, store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenes_are_deterministic() {
        for config in standard_scenes() {
            let a = build_world(&config);
            let b = build_world(&config);
            assert_eq!(a.grid(), b.grid(), "scene {}", config.name);
            for c in a.grid().iter() {
                assert_eq!(a.store().record(c), b.store().record(c));
            }
        }
    }

    #[test]
    fn test_slab_counts() {
        let world = build_world(&standard_scenes()[0]);
        assert_eq!(world.voxel_count(), 32 * 32);
        assert_eq!(world.orphan_count(), 0);
    }

    #[test]
    fn test_pillars_start_floating() {
        let config = &standard_scenes()[1];
        let world = build_world(config);
        for feature in &config.features {
            if let Feature::Pillar { x, z, base, .. } = *feature {
                assert!(base > 1);
                assert!(!world.grid().contains(IVec3::new(x, base - 1, z)));
                assert_eq!(world.store().record(IVec3::new(x, base, z)).kind, VoxelType::Rock);
            }
        }
    }

    #[test]
    fn test_some_slab_cells_have_composition() {
        let world = build_world(&standard_scenes()[0]);
        let with = world
            .grid()
            .iter()
            .filter(|&c| world.store().record(c).has_composition())
            .count();
        assert!(with > 0 && with < world.voxel_count());
    }
}
