use std::path::PathBuf;
use std::process;

use verdant_bench::report;
use verdant_bench::runner::BenchmarkRunner;
use verdant_bench::scenes;
use verdant_core::catalog::SubstanceCatalog;
use verdant_core::params::SimParams;
use verdant_rules::{loader, validator};

const DEFAULT_PARAMS: &str = include_str!("../../../data/sim.ron");
const DEFAULT_CATALOG: &str = include_str!("../../../data/catalog.ron");

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut catalog_path: Option<PathBuf> = None;
    let mut baseline_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut regression_threshold = 10.0f64;
    let mut tick_count = 120u32;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--config" => config_path = Some(PathBuf::from(value_of(&args, &mut i, flag))),
            "--catalog" => catalog_path = Some(PathBuf::from(value_of(&args, &mut i, flag))),
            "--baseline" => baseline_path = Some(PathBuf::from(value_of(&args, &mut i, flag))),
            "--output" => output_path = Some(PathBuf::from(value_of(&args, &mut i, flag))),
            "--regression-threshold" => {
                regression_threshold = parse_or_exit(value_of(&args, &mut i, flag), flag);
            }
            "--ticks" => tick_count = parse_or_exit(value_of(&args, &mut i, flag), flag),
            "--help" | "-h" => {
                eprintln!("Usage: bench-runner [OPTIONS]");
                eprintln!("  --config <path>                Simulation params RON (default: data/sim.ron)");
                eprintln!("  --catalog <path>               Substance catalog RON (default: data/catalog.ron)");
                eprintln!("  --baseline <path>              Load baseline JSON for comparison");
                eprintln!("  --output <path>                Save current results as JSON baseline");
                eprintln!(
                    "  --regression-threshold <pct>   Regression threshold percentage (default: 10)"
                );
                eprintln!("  --ticks <n>                    Ticks per scene (default: 120)");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let params = load_params(config_path);
    let catalog = load_catalog(catalog_path);

    let runner = BenchmarkRunner::new(params, catalog, tick_count);

    let scene_configs = scenes::standard_scenes();
    let mut results = Vec::new();

    for config in &scene_configs {
        let result = runner.run_scene(config);
        results.push(result);
    }

    // Print markdown summary
    println!("\n## Benchmark Results\n");
    println!("{}", report::format_markdown(&results));

    // Save output baseline
    if let Some(ref path) = output_path {
        let baseline = report::Baseline {
            timestamp: bench_timestamp(),
            results: results.clone(),
        };
        if let Err(e) = report::save_baseline(path, &baseline) {
            log::error!("Failed to save baseline to {}: {e}", path.display());
            process::exit(1);
        }
        log::info!("Saved baseline to {}", path.display());
    }

    // Compare against baseline: timing regressions fail the run, shape drift is reported
    if let Some(ref path) = baseline_path {
        match report::load_baseline(path) {
            Some(baseline) => {
                let regressions = report::compare(&results, &baseline, regression_threshold);
                let drifts = report::drift(&results, &baseline);
                println!(
                    "{}",
                    report::format_comparison(&regressions, &drifts, regression_threshold)
                );
                if !drifts.is_empty() {
                    log::warn!("{} scenes ended differently from the baseline", drifts.len());
                }
                if !regressions.is_empty() {
                    eprintln!(
                        "ERROR: {} scenes slower than baseline, exiting with code 1",
                        regressions.len()
                    );
                    process::exit(1);
                }
            }
            None => log::warn!("No usable baseline at {}", path.display()),
        }
    }

    log::info!("Benchmark complete.");
}

/// Take the value following a flag, exiting if there is none.
fn value_of<'a>(args: &'a [String], i: &mut usize, flag: &str) -> &'a str {
    *i += 1;
    match args.get(*i) {
        Some(value) => value,
        None => {
            eprintln!("Missing value for {flag}");
            process::exit(1);
        }
    }
}

fn parse_or_exit<T: std::str::FromStr>(value: &str, flag: &str) -> T {
    value.parse().unwrap_or_else(|_| {
        eprintln!("invalid {flag} value: {value}");
        process::exit(1);
    })
}

/// Load and validate params. Invalid params are fatal; an unstable step is a warning.
fn load_params(path: Option<PathBuf>) -> SimParams {
    let loaded = match path {
        Some(path) => loader::load_params_from_path(&path),
        None => loader::load_params_from_str(DEFAULT_PARAMS),
    };
    let params = loaded.unwrap_or_else(|e| {
        log::error!("{e}");
        process::exit(1);
    });

    if let Err(errors) = validator::validate_params(&params) {
        for e in &errors {
            log::error!("Params validation error: {e}");
        }
        log::error!("Params validation failed with {} errors", errors.len());
        process::exit(1);
    }
    if let Some(warning) = validator::check_stability(&params) {
        log::warn!("{warning}; values will be clamped after every tick");
    }
    params
}

fn load_catalog(path: Option<PathBuf>) -> SubstanceCatalog {
    let loaded = match path {
        Some(path) => loader::load_catalog_from_path(&path),
        None => loader::load_catalog_from_str(DEFAULT_CATALOG),
    };
    let catalog = loaded.unwrap_or_else(|e| {
        log::error!("{e}");
        process::exit(1);
    });

    if let Err(errors) = validator::validate_catalog(&catalog) {
        for e in &errors {
            log::error!("Catalog validation error: {e}");
        }
        process::exit(1);
    }
    catalog
}

/// Simple timestamp without a date/time dependency.
fn bench_timestamp() -> String {
    format!("bench-{}", std::process::id())
}
