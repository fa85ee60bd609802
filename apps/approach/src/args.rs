//! Command-line arguments and their mapping onto [`RunConfig`].
//!
//! Precedence, lowest first: `RunConfig::default()`, the `--config` JSON file,
//! then every flag given on the command line.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use fa_core::config::{DEFAULT_CLOSURE_DURATION_TICKS, hours};
use fa_core::{ArrivalProcess, ClosureSpec, RunConfig, parse_hhmm};

#[derive(Parser, Debug)]
#[command(name = "approach", version)]
#[command(about = "Simulate final-approach congestion at a single-runway airport", long_about = None)]
pub struct Cli {
    /// Raise log verbosity (-v debug, -vv trace).  Overrides RUST_LOG.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate one day and print its metrics.
    Run(RunArgs),
    /// Replicate runs across one or more arrival rates.
    Sweep(SweepArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Mean arrivals per minute.
    #[arg(long)]
    pub lam: Option<f64>,

    #[command(flatten)]
    pub scenario: ScenarioArgs,
}

#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Arrival rate to sweep; repeat for several points.
    #[arg(long, required = true, num_args = 1..)]
    pub lam: Vec<f64>,

    /// Replications per arrival rate.
    #[arg(long, default_value_t = 30)]
    pub runs: u32,

    #[command(flatten)]
    pub scenario: ScenarioArgs,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProcessArg {
    Poisson,
    Bernoulli,
}

impl From<ProcessArg> for ArrivalProcess {
    fn from(p: ProcessArg) -> Self {
        match p {
            ProcessArg::Poisson   => ArrivalProcess::Poisson,
            ProcessArg::Bernoulli => ArrivalProcess::Bernoulli,
        }
    }
}

/// Flags shared by `run` and `sweep`.
#[derive(Args, Debug)]
pub struct ScenarioArgs {
    /// JSON `RunConfig` to start from.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Simulated hours.
    #[arg(long, conflicts_with = "minutes")]
    pub hours: Option<u64>,

    /// Simulated minutes, for runs shorter than an hour.
    #[arg(long)]
    pub minutes: Option<u64>,

    /// Enable go-arounds.
    #[arg(long)]
    pub windy: bool,

    /// Per-attempt go-around probability when windy.
    #[arg(long, value_name = "P")]
    pub go_around_probability: Option<f64>,

    #[arg(long, value_enum)]
    pub arrival_process: Option<ProcessArg>,

    /// Surprise closure start as local HH:MM; repeatable.
    #[arg(long, value_name = "HH:MM")]
    pub closure: Vec<String>,

    /// Minutes each `--closure` lasts.
    #[arg(long, value_name = "MIN", default_value_t = DEFAULT_CLOSURE_DURATION_TICKS)]
    pub closure_duration: u64,

    /// Local time of tick 0.
    #[arg(long, value_name = "HH:MM")]
    pub day_start: Option<String>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Open runway minutes a go-around needs to rejoin.
    #[arg(long, value_name = "MIN")]
    pub min_gap: Option<u64>,

    /// Longest hold before diverting, in minutes.
    #[arg(long, value_name = "MIN")]
    pub max_hold: Option<u64>,

    /// Directory for CSV and JSON output.
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,
}

impl ScenarioArgs {
    /// The base configuration: `--config` if given, defaults otherwise.
    pub fn base_config(&self) -> Result<RunConfig> {
        match &self.config {
            Some(path) => load_config(path),
            None => Ok(RunConfig::default()),
        }
    }

    /// Apply every flag on top of `cfg`.
    pub fn apply(&self, mut cfg: RunConfig) -> Result<RunConfig> {
        if let Some(h) = self.hours {
            cfg.horizon_ticks = hours(h);
        }
        if let Some(m) = self.minutes {
            cfg.horizon_ticks = m;
        }
        if self.windy {
            cfg.windy = true;
        }
        if let Some(p) = self.go_around_probability {
            cfg.go_around_probability = p;
        }
        if let Some(p) = self.arrival_process {
            cfg.arrival_process = p.into();
        }
        if let Some(hhmm) = &self.day_start {
            cfg.day_start_minute =
                parse_hhmm(hhmm).with_context(|| format!("parsing --day-start {hhmm:?}"))?;
        }
        for hhmm in &self.closure {
            let spec = ClosureSpec::at_clock_time(hhmm, cfg.day_start_minute, self.closure_duration)
                .with_context(|| format!("parsing --closure {hhmm:?}"))?;
            cfg.closures.push(spec);
        }
        if let Some(seed) = self.seed {
            cfg.seed = seed;
        }
        if let Some(gap) = self.min_gap {
            cfg.reentry.min_gap_ticks = gap;
        }
        if let Some(hold) = self.max_hold {
            cfg.reentry.max_hold_ticks = Some(hold);
        }
        Ok(cfg)
    }

    /// Base configuration with flags applied.
    pub fn resolve(&self) -> Result<RunConfig> {
        self.apply(self.base_config()?)
    }
}

pub fn load_config(path: &Path) -> Result<RunConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}
