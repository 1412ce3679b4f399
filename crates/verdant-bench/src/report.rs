use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::runner::BenchmarkResult;

/// Results of a full bench run, as written by `--output`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Baseline {
    pub timestamp: String,
    pub results: Vec<BenchmarkResult>,
}

/// A scene whose mean tick+settle time grew past the allowed threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Regression {
    pub scene: String,
    pub baseline_ms: f64,
    pub current_ms: f64,
    pub pct_change: f64,
}

/// A scene that ended in a different shape than its baseline run.
///
/// Scenes are literal layouts and the tick is deterministic, so with equal
/// tick counts any difference here means simulation behavior changed.
#[derive(Debug, Clone, PartialEq)]
pub struct Drift {
    pub scene: String,
    pub baseline_final_voxels: usize,
    pub current_final_voxels: usize,
    pub baseline_structural_ticks: u32,
    pub current_structural_ticks: u32,
}

/// Read a baseline written by [`save_baseline`].
///
/// None when the file is missing; a file that exists but does not parse is
/// also None, with a warning naming the parse error.
pub fn load_baseline(path: &Path) -> Option<Baseline> {
    let contents = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&contents) {
        Ok(baseline) => Some(baseline),
        Err(e) => {
            log::warn!("Ignoring unreadable baseline {}: {e}", path.display());
            None
        }
    }
}

/// Write `baseline` as pretty JSON, creating parent directories as needed.
pub fn save_baseline(path: &Path, baseline: &Baseline) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, baseline).map_err(std::io::Error::other)
}

fn find<'a>(baseline: &'a Baseline, scene: &str) -> Option<&'a BenchmarkResult> {
    baseline.results.iter().find(|b| b.scene_name == scene)
}

/// Scenes whose mean time rose by more than `threshold_pct` percent.
/// Scenes absent from the baseline, or with a zero baseline mean, are skipped.
pub fn compare(
    current: &[BenchmarkResult],
    baseline: &Baseline,
    threshold_pct: f64,
) -> Vec<Regression> {
    current
        .iter()
        .filter_map(|result| {
            let base = find(baseline, &result.scene_name)?;
            let baseline_ms = base.timings.mean_ms;
            if baseline_ms <= 0.0 {
                return None;
            }
            let current_ms = result.timings.mean_ms;
            let pct_change = (current_ms - baseline_ms) / baseline_ms * 100.0;
            (pct_change > threshold_pct).then(|| Regression {
                scene: result.scene_name.clone(),
                baseline_ms,
                current_ms,
                pct_change,
            })
        })
        .collect()
}

/// Scenes run for the same number of ticks as their baseline that ended with
/// a different voxel count or a different number of structural ticks.
pub fn drift(current: &[BenchmarkResult], baseline: &Baseline) -> Vec<Drift> {
    current
        .iter()
        .filter_map(|result| {
            let base = find(baseline, &result.scene_name)?;
            let same_shape = base.final_voxels == result.final_voxels
                && base.structural_ticks == result.structural_ticks;
            if base.tick_count != result.tick_count || same_shape {
                return None;
            }
            Some(Drift {
                scene: result.scene_name.clone(),
                baseline_final_voxels: base.final_voxels,
                current_final_voxels: result.final_voxels,
                baseline_structural_ticks: base.structural_ticks,
                current_structural_ticks: result.structural_ticks,
            })
        })
        .collect()
}

/// Markdown table with one row per scene: voxel counts before and after,
/// structural activity, then the timing distribution.
pub fn format_markdown(results: &[BenchmarkResult]) -> String {
    let mut out = String::new();
    out.push_str("| Scene | Voxels | Final | Ticks | Structural | Mean (ms) | Median (ms) | P95 (ms) | P99 (ms) | Min (ms) | Max (ms) |\n");
    out.push_str("|-------|--------|-------|-------|------------|-----------|-------------|----------|----------|----------|----------|\n");

    for r in results {
        let t = &r.timings;
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} |\n",
            r.scene_name,
            r.initial_voxels,
            r.final_voxels,
            r.tick_count,
            r.structural_ticks,
            t.mean_ms,
            t.median_ms,
            t.p95_ms,
            t.p99_ms,
            t.min_ms,
            t.max_ms,
        ));
    }

    out
}

/// Human-readable verdict for a baseline comparison.
pub fn format_comparison(regressions: &[Regression], drifts: &[Drift], threshold_pct: f64) -> String {
    let mut out = String::new();

    if regressions.is_empty() {
        out.push_str(&format!("Timing: every scene within +{threshold_pct:.0}% of baseline.\n"));
    } else {
        out.push_str(&format!("Timing regressions (> +{threshold_pct:.0}%):\n"));
        for r in regressions {
            out.push_str(&format!(
                "  - {}: {:.2} ms -> {:.2} ms (+{:.1}%)\n",
                r.scene, r.baseline_ms, r.current_ms, r.pct_change
            ));
        }
    }

    for d in drifts {
        out.push_str(&format!(
            "Behavior drift in {}: final voxels {} -> {}, structural ticks {} -> {}\n",
            d.scene,
            d.baseline_final_voxels,
            d.current_final_voxels,
            d.baseline_structural_ticks,
            d.current_structural_ticks
        ));
    }
    out
}
