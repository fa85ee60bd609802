//! `fa-output` — writers for final-approach simulation results.
//!
//! | Writer                  | Files created                                        |
//! |-------------------------|------------------------------------------------------|
//! | [`CsvWriter`]           | `tick_series.csv`, `aircraft.csv`, `landings.csv`    |
//! | [`write_summary_json`]  | `summary.json`                                       |
//! | [`write_sweep_csv`]     | `sweep.csv`                                          |
//! | [`write_sweep_json`]    | `sweep.json`                                         |
//!
//! Row writers implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `fa_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fa_output::{CsvWriter, SimOutputObserver, write_summary_json};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, &sim.config);
//! let result = sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! write_summary_json(Path::new("./output"), &result)?;
//! ```

pub mod csv;
pub mod error;
pub mod json;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::{CsvWriter, write_sweep_csv};
pub use error::{OutputError, OutputResult};
pub use json::{DerivedStats, RunSummary, write_summary_json, write_sweep_json};
pub use observer::SimOutputObserver;
pub use row::{AircraftRow, LandingRow, TickRow};
pub use writer::OutputWriter;
