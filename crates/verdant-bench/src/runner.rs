use std::time::Instant;

use verdant_core::catalog::SubstanceCatalog;
use verdant_core::params::SimParams;
use verdant_rules::validator;
use verdant_sim::SimPipeline;
use verdant_world::World;

use crate::scenes::SceneConfig;

/// Timing data for a single benchmark run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Result of a single scene benchmark.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkResult {
    pub scene_name: String,
    pub initial_voxels: usize,
    pub final_voxels: usize,
    pub tick_count: u32,
    /// Ticks in which gravity or spill changed the grid.
    pub structural_ticks: u32,
    pub timings: TimingSeries,
}

/// Runs every scene on the CPU tick loop with one parameter set.
pub struct BenchmarkRunner {
    params: SimParams,
    catalog: SubstanceCatalog,
    tick_count: u32,
}

impl BenchmarkRunner {
    pub fn new(params: SimParams, catalog: SubstanceCatalog, tick_count: u32) -> Self {
        Self {
            params,
            catalog,
            tick_count,
        }
    }

    /// Run a single benchmark scene and return timing results.
    ///
    /// Each timed frame is one tick followed by the clamp/recompute pass.
    pub fn run_scene(&self, config: &SceneConfig) -> BenchmarkResult {
        log::info!("Running scene '{}'...", config.name);

        let mut world = crate::scenes::build_world(config);
        let unknown = self.check_compositions(&world);
        if unknown > 0 {
            log::warn!("  {unknown} records reference substances missing from the catalog");
        }
        let initial_voxels = world.voxel_count();
        log::info!("  Populated {initial_voxels} voxels");

        let mut sim = SimPipeline::new(self.params.clone());
        let mut frame_times = Vec::with_capacity(self.tick_count as usize);
        let mut structural_ticks = 0;

        for _ in 0..self.tick_count {
            let frame_start = Instant::now();

            let report = sim.step(&mut world);
            sim.settle(&mut world);

            let elapsed = frame_start.elapsed().as_secs_f64() * 1000.0;
            frame_times.push(elapsed);

            if report.is_some_and(|r| r.any_structural_change()) {
                structural_ticks += 1;
            }
        }

        let timings = TimingSeries::from_samples(&frame_times);
        log::info!(
            "  Done: mean={:.2}ms, p95={:.2}ms, p99={:.2}ms, voxels {} -> {}",
            timings.mean_ms,
            timings.p95_ms,
            timings.p99_ms,
            initial_voxels,
            world.voxel_count()
        );

        BenchmarkResult {
            scene_name: config.name.to_string(),
            initial_voxels,
            final_voxels: world.voxel_count(),
            tick_count: self.tick_count,
            structural_ticks,
            timings,
        }
    }

    /// Count records whose composition names substances the catalog lacks.
    fn check_compositions(&self, world: &World) -> usize {
        world
            .store()
            .iter()
            .filter_map(|(_, record)| record.composition.as_ref())
            .filter(|composition| {
                validator::validate_composition(composition, &self.catalog).is_err()
            })
            .count()
    }
}

impl TimingSeries {
    /// Summarize per-frame durations in milliseconds. Percentiles use the
    /// nearest-rank method; an empty input gives all zeros.
    pub fn from_samples(samples_ms: &[f64]) -> Self {
        let mut sorted = samples_ms.to_vec();
        sorted.sort_by(f64::total_cmp);

        let (Some(&min_ms), Some(&max_ms)) = (sorted.first(), sorted.last()) else {
            return Self {
                mean_ms: 0.0,
                median_ms: 0.0,
                p95_ms: 0.0,
                p99_ms: 0.0,
                min_ms: 0.0,
                max_ms: 0.0,
            };
        };

        let n = sorted.len();
        let mid = n / 2;
        let median_ms = if n % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Self {
            mean_ms: sorted.iter().sum::<f64>() / n as f64,
            median_ms,
            p95_ms: nearest_rank(&sorted, 0.95),
            p99_ms: nearest_rank(&sorted, 0.99),
            min_ms,
            max_ms,
        }
    }
}

/// Value at quantile `q` of a non-empty ascending slice.
fn nearest_rank(sorted: &[f64], q: f64) -> f64 {
    let rank = (q * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::{Feature, SceneConfig};

    fn shipped_catalog() -> SubstanceCatalog {
        verdant_rules::load_catalog_from_str(include_str!("../../../data/catalog.ron"))
            .expect("shipped catalog.ron must parse")
    }

    #[test]
    fn test_timing_summary() {
        let t = TimingSeries::from_samples(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!((t.min_ms, t.max_ms), (1.0, 4.0));
        assert_eq!(t.median_ms, 2.5);
        assert_eq!(t.mean_ms, 2.5);
        assert_eq!(t.p95_ms, 4.0);
        assert_eq!(t.p99_ms, 4.0);
    }

    #[test]
    fn test_timing_percentiles_nearest_rank() {
        let samples: Vec<f64> = (1..=100).map(f64::from).collect();
        let t = TimingSeries::from_samples(&samples);
        assert_eq!(t.p95_ms, 95.0);
        assert_eq!(t.p99_ms, 99.0);
        assert_eq!(t.median_ms, 50.5);
    }

    #[test]
    fn test_timing_summary_empty() {
        let t = TimingSeries::from_samples(&[]);
        assert_eq!(t.mean_ms, 0.0);
        assert_eq!(t.max_ms, 0.0);
    }

    #[test]
    fn test_run_small_scene() {
        let config = SceneConfig {
            name: "tiny",
            width: 4,
            depth: 4,
            features: vec![Feature::Pillar {
                x: 1,
                z: 1,
                base: 3,
                height: 2,
            }],
        };
        let runner = BenchmarkRunner::new(SimParams::default(), shipped_catalog(), 5);
        let result = runner.run_scene(&config);
        assert_eq!(result.scene_name, "tiny");
        assert_eq!(result.initial_voxels, 18);
        assert_eq!(result.final_voxels, 18);
        assert_eq!(result.tick_count, 5);
        // Pillar at y = 3..=4: bottom lands at y = 1 after two ticks, the
        // top needs a third to close the gap left behind.
        assert_eq!(result.structural_ticks, 3);
    }

    #[test]
    fn test_scene_compositions_match_catalog() {
        let runner = BenchmarkRunner::new(SimParams::default(), shipped_catalog(), 0);
        for config in crate::scenes::standard_scenes() {
            let world = crate::scenes::build_world(&config);
            assert_eq!(runner.check_compositions(&world), 0, "scene {}", config.name);
        }
    }
}
