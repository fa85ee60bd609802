//! `approach` — single-runway final-approach congestion simulator.
//!
//! ```text
//! approach run   --lam 0.3 --windy --closure 08:00 --out output/windy
//! approach sweep --lam 0.1 --lam 0.3 --lam 0.5 --runs 50 --out output/sweep
//! ```

mod args;
mod report;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use fa_output::{CsvWriter, SimOutputObserver, write_summary_json, write_sweep_csv, write_sweep_json};
use fa_sim::{NoopObserver, RunResult, Sim};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::{Cli, Command, RunArgs, SweepArgs};

// ── Logging ───────────────────────────────────────────────────────────────────

/// `-v` wins over `RUST_LOG`; `RUST_LOG` wins over `default`.
fn init_tracing(verbose: u8, default: &str) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// ── Subcommands ───────────────────────────────────────────────────────────────

fn run(args: RunArgs) -> Result<()> {
    let mut config = args.scenario.resolve()?;
    if let Some(lam) = args.lam {
        config.arrival_rate = lam;
    }
    report::print_config(&config);

    let mut sim = Sim::new(config).context("invalid run configuration")?;
    let t0 = Instant::now();
    let result = match &args.scenario.out {
        Some(dir) => run_with_output(&mut sim, dir)?,
        None => sim.run(&mut NoopObserver)?,
    };
    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "simulation finished");

    report::print_run(&result);
    Ok(())
}

fn run_with_output(sim: &mut Sim, dir: &Path) -> Result<RunResult> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let writer = CsvWriter::new(dir).with_context(|| format!("opening CSV files in {}", dir.display()))?;
    let mut obs = SimOutputObserver::new(writer, &sim.config);

    let result = sim.run(&mut obs)?;
    if let Some(e) = obs.take_error() {
        bail!("writing CSV output to {}: {e}", dir.display());
    }
    let summary = write_summary_json(dir, &result)
        .with_context(|| format!("writing summary to {}", dir.display()))?;
    info!(dir = %dir.display(), summary = %summary.display(), "output written");
    Ok(result)
}

fn sweep(args: SweepArgs) -> Result<()> {
    let base = args.scenario.resolve()?;
    if args.runs == 0 {
        bail!("--runs must be at least 1");
    }
    report::print_config(&base);

    let t0 = Instant::now();
    let points = fa_sim::sweep(&base, &args.lam, args.runs).context("sweep failed")?;
    info!(
        points     = points.len(),
        runs       = args.runs,
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "sweep finished"
    );
    report::print_sweep(&points);

    if let Some(dir) = &args.scenario.out {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        write_sweep_csv(dir, &points).with_context(|| format!("writing sweep.csv to {}", dir.display()))?;
        write_sweep_json(dir, &base, &points)
            .with_context(|| format!("writing sweep.json to {}", dir.display()))?;
        info!(dir = %dir.display(), "output written");
    }
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => {
            init_tracing(cli.verbose, "info");
            run(args)
        }
        Command::Sweep(args) => {
            // One sweep point is many runs; keep their start/end lines quiet.
            init_tracing(cli.verbose, "info,fa_sim::sim=warn");
            sweep(args)
        }
    }
}
