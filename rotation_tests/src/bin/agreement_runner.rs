//! Agreement sweep runner with JSON report output.
//!
//! Usage:
//!   cargo run -p rotation_tests --bin agreement_runner -- [output-dir] [config.json]
//!
//! Runs every randomized agreement check, prints a summary, writes
//! `agreement.json` into the output directory (default `test-reports`) and
//! exits non-zero if any check failed.

use std::path::PathBuf;

use anyhow::Context;
use rotation_core::config::SweepConfig;
use rotation_core::sweep::run_sweep;
use tracing::info;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let output_dir = args
        .get(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("test-reports"));

    let cfg = match args.get(2) {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path))?;
            SweepConfig::from_json_str(&text).with_context(|| format!("parse {}", path))?
        }
        None => SweepConfig::default(),
    };
    info!(
        samples = cfg.samples,
        seed = cfg.seed,
        out = %output_dir.display(),
        "Starting agreement sweep"
    );

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;

    let report = run_sweep(&cfg);

    println!("Rotation conversion agreement");
    println!("=============================");
    for (category, stats) in report.stats_by_category() {
        println!(
            "{:<22} {:>2}/{:<2} passed  {:>7} samples  {:>8.2?}",
            category, stats.passed, stats.total, stats.samples, stats.total_duration
        );
    }
    println!();
    for r in &report.results {
        println!(
            "{} {:<8} max {:.3e}  tol {:.1e}  {}",
            r.status.icon(),
            r.id,
            r.max_error,
            r.tolerance,
            r.name
        );
        if let Some(input) = &r.counterexample {
            println!("           first failure: {}", input);
        }
    }

    let stats = report.overall_stats();
    println!();
    println!("Total:   {}", stats.total);
    println!("Passed:  {}", stats.passed);
    println!("Failed:  {}", stats.failed);
    println!("Skipped: {}", stats.skipped);
    println!("Pass Rate: {:.1}%", stats.pass_rate());

    let json_path = output_dir.join("agreement.json");
    report.save_json(&json_path)?;
    println!("Report saved to {}", json_path.display());

    if stats.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
