//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use fa_core::{RunConfig, SimClock};
use fa_sim::{RunResult, SimObserver, TickSample};

use crate::row::{AircraftRow, TickRow, landing_rows};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that streams tick rows to an [`OutputWriter`] and writes
/// the per-aircraft and landing rows when the run ends.
///
/// Observer hooks cannot fail, so the first writer error is parked here and
/// every later one dropped.  Check [`take_error`][Self::take_error] once the
/// run is over.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:      W,
    clock:       SimClock,
    first_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for `HH:MM`
    /// labels.
    pub fn new(writer: W, config: &RunConfig) -> Self {
        Self {
            writer,
            clock:       config.make_clock(),
            first_error: None,
        }
    }

    /// The first write error of the run, or `None` if every row made it out.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.first_error.take()
    }

    /// Give back the writer, e.g. to count what it wrote.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            self.first_error.get_or_insert(e);
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, sample: &TickSample) {
        let row = TickRow::new(sample, &self.clock);
        let result = self.writer.write_tick(&row);
        self.store_err(result);
    }

    fn on_run_end(&mut self, result: &RunResult) {
        let aircraft: Vec<AircraftRow> = result.aircraft.iter().map(AircraftRow::from).collect();
        let r = self.writer.write_aircraft(&aircraft);
        self.store_err(r);

        let landings = landing_rows(&result.aircraft, &self.clock);
        let r = self.writer.write_landings(&landings);
        self.store_err(r);

        let r = self.writer.finish();
        self.store_err(r);
    }
}
