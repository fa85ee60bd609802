//! JSON summaries.
//!
//! `summary.json` holds a run's configuration, its aggregate counts, and the
//! derived rates; `sweep.json` the base configuration and every sweep point.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use fa_core::RunConfig;
use fa_runway::ClosureWindow;
use fa_sim::{Metrics, RunResult, SweepPoint};
use serde::Serialize;

use crate::OutputResult;

pub const SUMMARY_FILE: &str = "summary.json";
pub const SWEEP_JSON_FILE: &str = "sweep.json";

/// Rates derived from [`Metrics`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedStats {
    pub mean_delay:          f64,
    pub diversion_rate:      f64,
    pub congestion_rate:     f64,
    pub go_around_rate:      f64,
    pub throughput_per_hour: f64,
    pub mean_queue:          f64,
}

impl DerivedStats {
    pub fn of(m: &Metrics) -> Self {
        Self {
            mean_delay:          m.mean_delay(),
            diversion_rate:      m.diversion_rate(),
            congestion_rate:     m.congestion_rate(),
            go_around_rate:      m.go_around_rate(),
            throughput_per_hour: m.throughput_per_hour(),
            mean_queue:          m.mean_queue(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub config:   &'a RunConfig,
    pub metrics:  &'a Metrics,
    pub derived:  DerivedStats,
    pub closures: &'a [ClosureWindow],
}

impl<'a> RunSummary<'a> {
    pub fn new(result: &'a RunResult) -> Self {
        Self {
            config:   &result.config,
            metrics:  &result.metrics,
            derived:  DerivedStats::of(&result.metrics),
            closures: &result.closures,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SweepSummary<'a> {
    pub base:   &'a RunConfig,
    pub points: &'a [SweepPoint],
}

fn write_pretty<T: Serialize>(path: PathBuf, value: &T) -> OutputResult<PathBuf> {
    let mut out = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(&mut out, value)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(path)
}

/// Write `summary.json` into `dir` and return its path.
pub fn write_summary_json(dir: &Path, result: &RunResult) -> OutputResult<PathBuf> {
    write_pretty(dir.join(SUMMARY_FILE), &RunSummary::new(result))
}

/// Write `sweep.json` into `dir` and return its path.
pub fn write_sweep_json(
    dir:    &Path,
    base:   &RunConfig,
    points: &[SweepPoint],
) -> OutputResult<PathBuf> {
    write_pretty(dir.join(SWEEP_JSON_FILE), &SweepSummary { base, points })
}
