//! Integration tests for fa-output.

use fa_core::{ArrivalProcess, RunConfig};
use fa_sim::{RunResult, Sim, SimBuilder};
use tempfile::TempDir;

fn tmp() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// One arrival per minute from 06:00.
fn every_minute(horizon: u64) -> SimBuilder {
    SimBuilder::new(1.0)
        .arrival_process(ArrivalProcess::Bernoulli)
        .horizon_ticks(horizon)
}

fn rows(path: &std::path::Path) -> Vec<Vec<String>> {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    rdr.records()
        .map(|r| r.unwrap().iter().map(str::to_owned).collect())
        .collect()
}

fn headers(path: &std::path::Path) -> Vec<String> {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    rdr.headers().unwrap().iter().map(str::to_owned).collect()
}

fn run_to_csv(mut sim: Sim, dir: &TempDir) -> RunResult {
    let writer = crate::CsvWriter::new(dir.path()).unwrap();
    let mut obs = crate::SimOutputObserver::new(writer, &sim.config);
    let result = sim.run(&mut obs).unwrap();
    assert!(obs.take_error().is_none());
    result
}

#[cfg(test)]
mod csv_tests {
    use super::*;
    use crate::csv::{AIRCRAFT_FILE, LANDINGS_FILE, TICK_SERIES_FILE};
    use crate::writer::OutputWriter;
    use crate::CsvWriter;

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join(TICK_SERIES_FILE).exists());
        assert!(dir.path().join(AIRCRAFT_FILE).exists());
        assert!(dir.path().join(LANDINGS_FILE).exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(&dir.path().join(TICK_SERIES_FILE)),
            ["tick", "clock", "arrivals", "landings", "go_arounds", "diversions",
             "queue_len", "holding", "runway_closed"]
        );
        assert_eq!(
            headers(&dir.path().join(LANDINGS_FILE)),
            ["sequence", "tick", "clock", "aircraft_id", "delay"]
        );
        assert_eq!(headers(&dir.path().join(AIRCRAFT_FILE)).len(), 11);
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tmp();
        let err = CsvWriter::new(&dir.path().join("nope")).err().unwrap();
        assert!(matches!(err, crate::OutputError::Csv(_) | crate::OutputError::Io(_)));
    }

    #[test]
    fn observer_writes_a_calm_run() {
        let dir = tmp();
        run_to_csv(every_minute(5).build().unwrap(), &dir);

        let ticks = rows(&dir.path().join(TICK_SERIES_FILE));
        assert_eq!(ticks.len(), 5);
        assert_eq!(ticks[0], ["0", "06:00", "1", "1", "0", "0", "0", "0", "0"]);
        assert_eq!(ticks[4][1], "06:04");

        let aircraft = rows(&dir.path().join(AIRCRAFT_FILE));
        assert_eq!(aircraft.len(), 5);
        assert_eq!(aircraft[2][0], "2");
        assert_eq!(aircraft[2][2], "landed");
        assert_eq!(aircraft[2][3], "2");
        assert_eq!(aircraft[2][4], "");
        assert_eq!(aircraft[2][6], "0");

        let landings = rows(&dir.path().join(LANDINGS_FILE));
        let seq: Vec<&str> = landings.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(seq, ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn observer_writes_diversions() {
        let dir = tmp();
        let sim = every_minute(3)
            .windy(true)
            .go_around_probability(1.0)
            .build()
            .unwrap();
        run_to_csv(sim, &dir);

        let aircraft = rows(&dir.path().join(AIRCRAFT_FILE));
        assert_eq!(aircraft.len(), 3);
        for row in &aircraft {
            assert_eq!(row[2], "diverted");
            assert_eq!(row[3], "");
            assert_eq!(row[5], "no_gap");
            assert_eq!(row[6], "");
            assert_eq!(row[7], "1");
        }
        assert!(rows(&dir.path().join(LANDINGS_FILE)).is_empty());

        let ticks = rows(&dir.path().join(TICK_SERIES_FILE));
        assert!(ticks.iter().all(|r| r[4] == "1" && r[5] == "1"));
    }

    #[test]
    fn closed_minutes_are_flagged() {
        let dir = tmp();
        run_to_csv(every_minute(10).closure(3, 2).build().unwrap(), &dir);
        let ticks = rows(&dir.path().join(TICK_SERIES_FILE));
        let closed: Vec<&str> = ticks.iter().map(|r| r[8].as_str()).collect();
        assert_eq!(closed, ["0", "0", "0", "1", "1", "0", "0", "0", "0", "0"]);
    }
}

#[cfg(test)]
mod observer_tests {
    use std::io;

    use super::*;
    use crate::{AircraftRow, LandingRow, OutputError, OutputResult, OutputWriter, TickRow};

    /// Fails every call with a message naming the call.
    #[derive(Default)]
    struct FailingWriter {
        calls: u32,
    }

    impl FailingWriter {
        fn fail(&mut self, what: &str) -> OutputResult<()> {
            self.calls += 1;
            Err(OutputError::Io(io::Error::other(what.to_owned())))
        }
    }

    impl OutputWriter for FailingWriter {
        fn write_tick(&mut self, _row: &TickRow) -> OutputResult<()> {
            self.fail("tick")
        }
        fn write_aircraft(&mut self, _rows: &[AircraftRow]) -> OutputResult<()> {
            self.fail("aircraft")
        }
        fn write_landings(&mut self, _rows: &[LandingRow]) -> OutputResult<()> {
            self.fail("landings")
        }
        fn finish(&mut self) -> OutputResult<()> {
            self.fail("finish")
        }
    }

    #[test]
    fn first_error_is_kept() {
        let mut sim = every_minute(4).build().unwrap();
        let mut obs = crate::SimOutputObserver::new(FailingWriter::default(), &sim.config);
        sim.run(&mut obs).unwrap();

        let err = obs.take_error().unwrap();
        assert!(err.to_string().contains("tick"), "{err}");
        assert!(obs.take_error().is_none());
        // Four ticks, then aircraft, landings and finish.
        assert_eq!(obs.into_writer().calls, 7);
    }
}

#[cfg(test)]
mod row_tests {
    use fa_core::{SimClock, Tick};

    use super::*;
    use crate::row::{clock_label, landing_rows};

    #[test]
    fn clock_label_wraps_past_midnight() {
        let clock = SimClock::new(2_000).with_day_start(23 * 60 + 30);
        assert_eq!(clock_label(&clock, Tick(0)), "23:30");
        assert_eq!(clock_label(&clock, Tick(45)), "00:15");
    }

    #[test]
    fn landing_rows_follow_runway_order() {
        let cfg = every_minute(30).closure(10, 5).into_config();
        let result = fa_sim::run_simulation(cfg.clone()).unwrap();
        let rows = landing_rows(&result.aircraft, &cfg.make_clock());

        assert_eq!(rows.len(), result.landings.len());
        for (row, tick) in rows.iter().zip(&result.landings) {
            assert_eq!(row.tick, tick.0);
        }
        assert_eq!(rows[10].tick, 15);
        assert_eq!(rows[10].delay, 5);
        assert_eq!(rows[10].clock, "06:15");
    }

    #[test]
    fn default_config_labels_from_six() {
        let clock = RunConfig::default().make_clock();
        assert_eq!(clock_label(&clock, Tick(0)), "06:00");
    }
}

#[cfg(test)]
mod json_tests {
    use super::*;
    use crate::csv::SWEEP_FILE;
    use crate::json::{SUMMARY_FILE, SWEEP_JSON_FILE};
    use crate::{write_summary_json, write_sweep_csv, write_sweep_json};

    #[test]
    fn summary_holds_config_metrics_and_rates() {
        let dir = tmp();
        let result = every_minute(30).closure(10, 5).build().unwrap()
            .run(&mut fa_sim::NoopObserver)
            .unwrap();
        let path = write_summary_json(dir.path(), &result).unwrap();
        assert_eq!(path, dir.path().join(SUMMARY_FILE));

        let text = std::fs::read_to_string(path).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["config"]["arrival_process"], "bernoulli");
        assert_eq!(v["config"]["horizon_ticks"], 30);
        assert_eq!(v["metrics"]["landings"], 25);
        assert_eq!(v["metrics"]["diversions_horizon"], 5);
        assert_eq!(v["derived"]["mean_delay"], 3.0);
        assert_eq!(v["closures"][0]["start"], 10);
        assert_eq!(v["closures"][0]["end"], 15);
    }

    #[test]
    fn summary_config_reloads() {
        let dir = tmp();
        let result = SimBuilder::new(0.4).horizon_ticks(90).windy(true).max_hold(20)
            .build().unwrap()
            .run(&mut fa_sim::NoopObserver)
            .unwrap();
        let path = write_summary_json(dir.path(), &result).unwrap();
        let v: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        let cfg: RunConfig = serde_json::from_value(v["config"].clone()).unwrap();
        assert_eq!(cfg, result.config);
    }

    #[test]
    fn sweep_files() {
        let dir = tmp();
        let base = SimBuilder::new(0.1).horizon_ticks(60).into_config();
        let points = fa_sim::sweep(&base, &[0.1, 0.5], 3).unwrap();

        write_sweep_csv(dir.path(), &points).unwrap();
        let path = dir.path().join(SWEEP_FILE);
        let header = headers(&path);
        assert_eq!(header.len(), 16);
        assert_eq!(header[..4], ["lambda", "replications", "arrivals_mean", "arrivals_ci95"]);
        let body = rows(&path);
        assert_eq!(body.len(), 2);
        assert_eq!(body[1][0], "0.5");
        assert_eq!(body[1][1], "3");

        let json = write_sweep_json(dir.path(), &base, &points).unwrap();
        assert_eq!(json, dir.path().join(SWEEP_JSON_FILE));
        let v: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(json).unwrap()).unwrap();
        assert_eq!(v["points"].as_array().unwrap().len(), 2);
        assert_eq!(v["points"][0]["replications"], 3);
    }
}
