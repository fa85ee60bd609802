//! Plain data row types written by output backends.

use fa_core::{SimClock, Tick};
use fa_sim::{AircraftRecord, TickSample};

/// `HH:MM` local time of `tick`.
pub fn clock_label(clock: &SimClock, tick: Tick) -> String {
    let (h, m) = clock.clock_time(tick);
    format!("{h:02}:{m:02}")
}

/// One row of `tick_series.csv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickRow {
    pub tick:          u64,
    pub clock:         String,
    pub arrivals:      u32,
    pub landings:      u32,
    pub go_arounds:    u32,
    pub diversions:    u32,
    pub queue_len:     u32,
    pub holding:       u32,
    pub runway_closed: bool,
}

impl TickRow {
    pub fn new(sample: &TickSample, clock: &SimClock) -> Self {
        Self {
            tick:          sample.tick.0,
            clock:         clock_label(clock, sample.tick),
            arrivals:      sample.arrivals,
            landings:      sample.landings,
            go_arounds:    sample.go_arounds,
            diversions:    sample.diversions,
            queue_len:     sample.queue_len,
            holding:       sample.holding,
            runway_closed: sample.runway_closed,
        }
    }
}

/// One row of `aircraft.csv`.
///
/// Exactly one of `landed_tick` / `diverted_tick` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AircraftRow {
    pub aircraft_id:      u32,
    pub arrival_tick:     u64,
    pub outcome:          &'static str,
    pub landed_tick:      Option<u64>,
    pub diverted_tick:    Option<u64>,
    pub diversion_reason: Option<&'static str>,
    pub delay:            Option<u64>,
    pub go_arounds:       u32,
    pub hold_ticks:       u64,
    pub congested:        bool,
    pub closure_affected: bool,
}

impl From<&AircraftRecord> for AircraftRow {
    fn from(r: &AircraftRecord) -> Self {
        Self {
            aircraft_id:      r.id.0,
            arrival_tick:     r.arrival.0,
            outcome:          if r.landed_at.is_some() { "landed" } else { "diverted" },
            landed_tick:      r.landed_at.map(|t| t.0),
            diverted_tick:    r.diverted_at.map(|t| t.0),
            diversion_reason: r.diversion_reason.map(|d| d.as_str()),
            delay:            r.delay,
            go_arounds:       r.go_arounds,
            hold_ticks:       r.hold_ticks,
            congested:        r.congested,
            closure_affected: r.closure_affected,
        }
    }
}

/// One row of `landings.csv`: the committed runway sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingRow {
    /// 1-based position in the landing sequence.
    pub sequence:    u32,
    pub tick:        u64,
    pub clock:       String,
    pub aircraft_id: u32,
    pub delay:       u64,
}

/// Landing rows in runway order.
pub fn landing_rows(records: &[AircraftRecord], clock: &SimClock) -> Vec<LandingRow> {
    let mut landed: Vec<(Tick, &AircraftRecord)> = records
        .iter()
        .filter_map(|r| r.landed_at.map(|t| (t, r)))
        .collect();
    landed.sort_by_key(|&(t, _)| t);
    landed
        .into_iter()
        .zip(1u32..)
        .map(|((tick, r), sequence)| LandingRow {
            sequence,
            tick:        tick.0,
            clock:       clock_label(clock, tick),
            aircraft_id: r.id.0,
            delay:       r.delay.unwrap_or(0),
        })
        .collect()
}
