//! The `OutputWriter` trait implemented by backend writers.

use crate::{AircraftRow, LandingRow, OutputResult, TickRow};

/// Sink for the rows of one run.
///
/// [`SimOutputObserver`][crate::SimOutputObserver] calls `write_tick` once
/// per tick and the batch methods once, after the run.
pub trait OutputWriter {
    fn write_tick(&mut self, row: &TickRow) -> OutputResult<()>;

    fn write_aircraft(&mut self, rows: &[AircraftRow]) -> OutputResult<()>;

    fn write_landings(&mut self, rows: &[LandingRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Calling it again after the first time does nothing.
    fn finish(&mut self) -> OutputResult<()>;
}
