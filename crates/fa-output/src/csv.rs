//! CSV output backend.
//!
//! [`CsvWriter`] creates three files in the configured output directory:
//! - `tick_series.csv`
//! - `aircraft.csv`
//! - `landings.csv`
//!
//! [`write_sweep_csv`] writes `sweep.csv` for a Monte Carlo sweep.

use std::fs::File;
use std::path::Path;

use csv::Writer;
use fa_sim::{Estimate, SweepPoint};

use crate::writer::OutputWriter;
use crate::{AircraftRow, LandingRow, OutputResult, TickRow};

pub const TICK_SERIES_FILE: &str = "tick_series.csv";
pub const AIRCRAFT_FILE: &str = "aircraft.csv";
pub const LANDINGS_FILE: &str = "landings.csv";
pub const SWEEP_FILE: &str = "sweep.csv";

/// Writes one run to three CSV files.
pub struct CsvWriter {
    ticks:     Writer<File>,
    aircraft:  Writer<File>,
    landings:  Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut ticks = Writer::from_path(dir.join(TICK_SERIES_FILE))?;
        ticks.write_record([
            "tick", "clock", "arrivals", "landings", "go_arounds", "diversions",
            "queue_len", "holding", "runway_closed",
        ])?;

        let mut aircraft = Writer::from_path(dir.join(AIRCRAFT_FILE))?;
        aircraft.write_record([
            "aircraft_id", "arrival_tick", "outcome", "landed_tick", "diverted_tick",
            "diversion_reason", "delay", "go_arounds", "hold_ticks", "congested",
            "closure_affected",
        ])?;

        let mut landings = Writer::from_path(dir.join(LANDINGS_FILE))?;
        landings.write_record(["sequence", "tick", "clock", "aircraft_id", "delay"])?;

        Ok(Self {
            ticks,
            aircraft,
            landings,
            finished: false,
        })
    }
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_tick(&mut self, row: &TickRow) -> OutputResult<()> {
        self.ticks.write_record(&[
            row.tick.to_string(),
            row.clock.clone(),
            row.arrivals.to_string(),
            row.landings.to_string(),
            row.go_arounds.to_string(),
            row.diversions.to_string(),
            row.queue_len.to_string(),
            row.holding.to_string(),
            (row.runway_closed as u8).to_string(),
        ])?;
        Ok(())
    }

    fn write_aircraft(&mut self, rows: &[AircraftRow]) -> OutputResult<()> {
        for row in rows {
            self.aircraft.write_record(&[
                row.aircraft_id.to_string(),
                row.arrival_tick.to_string(),
                row.outcome.to_owned(),
                opt(row.landed_tick),
                opt(row.diverted_tick),
                opt(row.diversion_reason),
                opt(row.delay),
                row.go_arounds.to_string(),
                row.hold_ticks.to_string(),
                (row.congested as u8).to_string(),
                (row.closure_affected as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_landings(&mut self, rows: &[LandingRow]) -> OutputResult<()> {
        for row in rows {
            self.landings.write_record(&[
                row.sequence.to_string(),
                row.tick.to_string(),
                row.clock.clone(),
                row.aircraft_id.to_string(),
                row.delay.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.ticks.flush()?;
        self.aircraft.flush()?;
        self.landings.flush()?;
        Ok(())
    }
}

// ── Sweep ─────────────────────────────────────────────────────────────────────

const SWEEP_METRICS: [&str; 7] = [
    "arrivals", "landings", "diversions", "diversion_rate", "mean_delay", "go_arounds",
    "congestion_rate",
];

fn estimates(p: &SweepPoint) -> [Estimate; 7] {
    [
        p.arrivals,
        p.landings,
        p.diversions,
        p.diversion_rate,
        p.mean_delay,
        p.go_arounds,
        p.congestion_rate,
    ]
}

/// Write `sweep.csv` into `dir`: one row per arrival rate, a `mean` and a
/// `ci95` column per metric.
pub fn write_sweep_csv(dir: &Path, points: &[SweepPoint]) -> OutputResult<()> {
    let mut w = Writer::from_path(dir.join(SWEEP_FILE))?;

    let mut header = vec!["lambda".to_owned(), "replications".to_owned()];
    for name in SWEEP_METRICS {
        header.push(format!("{name}_mean"));
        header.push(format!("{name}_ci95"));
    }
    w.write_record(&header)?;

    for p in points {
        let mut record = vec![p.arrival_rate.to_string(), p.replications.to_string()];
        for e in estimates(p) {
            record.push(e.mean.to_string());
            record.push(e.half_width.to_string());
        }
        w.write_record(&record)?;
    }
    w.flush()?;
    Ok(())
}
