//! Run metrics: per-tick samples, per-aircraft records, and run totals.
//!
//! [`MetricsCollector`] sees every arrival and every transition as it
//! happens, and one end-of-tick sample per tick.  Per-aircraft flags
//! (congestion, closure effects, hold time) are read from the fleet once the
//! run is over.
//!
//! # Queue-length convention
//!
//! Queue length is sampled at the end of each tick and counts aircraft in
//! `AttemptingLanding`, `Holding`, or `SearchingGap`.  An aircraft diverted
//! during tick `T` is not part of `T`'s sample but is part of every earlier
//! one it was queued for.  Approaching aircraft waiting out a closure are not
//! queued.

use fa_core::config::MAX_HORIZON_TICKS;
use fa_core::{AircraftId, TICKS_PER_HOUR, Tick};

use crate::aircraft::{Aircraft, DiversionReason, Phase, Transition};

// ── TickSample ────────────────────────────────────────────────────────────────

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickSample {
    pub tick:          Tick,
    pub arrivals:      u32,
    pub landings:      u32,
    pub go_arounds:    u32,
    pub diversions:    u32,
    /// Queued aircraft at the end of the tick.
    pub queue_len:     u32,
    /// Holding aircraft at the end of the tick.
    pub holding:       u32,
    pub runway_closed: bool,
}

// ── AircraftRecord ────────────────────────────────────────────────────────────

/// Final state of one aircraft.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AircraftRecord {
    pub id:               AircraftId,
    pub arrival:          Tick,
    pub landed_at:        Option<Tick>,
    pub diverted_at:      Option<Tick>,
    pub diversion_reason: Option<DiversionReason>,
    pub delay:            Option<u64>,
    pub go_arounds:       u32,
    pub hold_ticks:       u64,
    pub first_slot:       Option<Tick>,
    pub congested:        bool,
    pub closure_affected: bool,
}

impl From<&Aircraft> for AircraftRecord {
    fn from(ac: &Aircraft) -> Self {
        Self {
            id:               ac.id,
            arrival:          ac.arrival,
            landed_at:        ac.landed_at,
            diverted_at:      ac.diversion.map(|d| d.at),
            diversion_reason: ac.diversion.map(|d| d.reason),
            delay:            ac.delay(),
            go_arounds:       ac.go_arounds,
            hold_ticks:       ac.hold_ticks,
            first_slot:       ac.first_slot,
            congested:        ac.was_congested(),
            closure_affected: ac.closure_affected(),
        }
    }
}

// ── Metrics ───────────────────────────────────────────────────────────────────

/// Run totals.  Derived rates are methods so they stay consistent with the
/// counts they come from.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    pub horizon_ticks: u64,

    pub arrivals:   u64,
    pub landings:   u64,
    pub go_arounds: u64,

    pub diversions:            u64,
    pub diversions_no_gap:     u64,
    pub diversions_hold_limit: u64,
    pub diversions_horizon:    u64,

    /// Aircraft whose first offered slot was later than their arrival, or
    /// that were never offered one.
    pub congested: u64,

    /// Approaching aircraft that had to wait out a closure.
    pub closure_deferred:    u64,
    /// Aircraft that lost a slot or reentry gap to a closure.
    pub closure_rescheduled: u64,
    /// Distinct aircraft with either closure effect.
    pub closure_affected:    u64,

    pub total_delay:      u64,
    pub max_delay:        u64,
    pub total_hold_ticks: u64,

    pub peak_queue:     u32,
    pub queue_tick_sum: u64,
    pub peak_holding:   u32,
}

impl Metrics {
    /// Mean landing delay in minutes; `0.0` when nothing landed.
    pub fn mean_delay(&self) -> f64 {
        ratio(self.total_delay, self.landings)
    }

    /// Diverted / arrived; `0.0` when nothing arrived.
    pub fn diversion_rate(&self) -> f64 {
        ratio(self.diversions, self.arrivals)
    }

    pub fn congestion_rate(&self) -> f64 {
        ratio(self.congested, self.arrivals)
    }

    /// Go-arounds per arrival.
    pub fn go_around_rate(&self) -> f64 {
        ratio(self.go_arounds, self.arrivals)
    }

    /// Landings per simulated hour.
    pub fn throughput_per_hour(&self) -> f64 {
        if self.horizon_ticks == 0 {
            return 0.0;
        }
        self.landings as f64 * TICKS_PER_HOUR as f64 / self.horizon_ticks as f64
    }

    /// Time-averaged queue length.
    pub fn mean_queue(&self) -> f64 {
        ratio(self.queue_tick_sum, self.horizon_ticks)
    }

    /// Every arrival ends landed or diverted.
    pub fn is_balanced(&self) -> bool {
        self.arrivals == self.landings + self.diversions
    }
}

fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

// ── MetricsCollector ──────────────────────────────────────────────────────────

/// Accumulates [`Metrics`] and the tick series during a run.
#[derive(Debug, Default)]
pub struct MetricsCollector {
    metrics: Metrics,
    current: Option<TickSample>,
    series:  Vec<TickSample>,
}

impl MetricsCollector {
    pub fn new(horizon_ticks: u64) -> Self {
        Self {
            metrics: Metrics { horizon_ticks, ..Metrics::default() },
            current: None,
            series:  Vec::with_capacity(horizon_ticks.min(MAX_HORIZON_TICKS) as usize),
        }
    }

    pub fn begin_tick(&mut self, tick: Tick, runway_closed: bool) {
        self.current = Some(TickSample { tick, runway_closed, ..TickSample::default() });
    }

    pub fn on_arrival(&mut self) {
        self.metrics.arrivals += 1;
        if let Some(s) = self.current.as_mut() {
            s.arrivals += 1;
        }
    }

    /// Count a transition.  Outside a tick (the end-of-run sweep) only the
    /// totals move.
    pub fn on_transition(&mut self, t: &Transition, ac: &Aircraft) {
        let m = &mut self.metrics;
        let sample = self.current.as_mut();
        match t.to {
            Phase::Landed => {
                let delay = ac.delay().unwrap_or(0);
                m.landings += 1;
                m.total_delay += delay;
                m.max_delay = m.max_delay.max(delay);
                if let Some(s) = sample {
                    s.landings += 1;
                }
            }
            Phase::GoAround => {
                m.go_arounds += 1;
                if let Some(s) = sample {
                    s.go_arounds += 1;
                }
            }
            Phase::Diverted => {
                m.diversions += 1;
                match ac.diversion.map(|d| d.reason) {
                    Some(DiversionReason::NoGap) => m.diversions_no_gap += 1,
                    Some(DiversionReason::HoldLimit) => m.diversions_hold_limit += 1,
                    Some(DiversionReason::Horizon) | None => m.diversions_horizon += 1,
                }
                if let Some(s) = sample {
                    s.diversions += 1;
                }
            }
            _ => {}
        }
    }

    /// Close the current tick and return its sample.
    pub fn end_tick(&mut self, queue_len: u32, holding: u32) -> Option<&TickSample> {
        let mut sample = self.current.take()?;
        sample.queue_len = queue_len;
        sample.holding = holding;
        self.metrics.queue_tick_sum += u64::from(queue_len);
        self.metrics.peak_queue = self.metrics.peak_queue.max(queue_len);
        self.metrics.peak_holding = self.metrics.peak_holding.max(holding);
        self.series.push(sample);
        self.series.last()
    }

    pub fn series(&self) -> &[TickSample] {
        &self.series
    }

    /// Fold in the per-aircraft flags and hand out the final numbers.
    pub fn finish(&self, fleet: &[Aircraft]) -> (Metrics, Vec<TickSample>, Vec<AircraftRecord>) {
        let mut metrics = self.metrics.clone();
        metrics.congested = 0;
        metrics.closure_deferred = 0;
        metrics.closure_rescheduled = 0;
        metrics.closure_affected = 0;
        metrics.total_hold_ticks = 0;
        for ac in fleet {
            metrics.congested += u64::from(ac.was_congested());
            metrics.closure_deferred += u64::from(ac.closure_deferred);
            metrics.closure_rescheduled += u64::from(ac.closure_rescheduled);
            metrics.closure_affected += u64::from(ac.closure_affected());
            metrics.total_hold_ticks += ac.hold_ticks;
        }
        let records = fleet.iter().map(AircraftRecord::from).collect();
        (metrics, self.series.clone(), records)
    }
}
