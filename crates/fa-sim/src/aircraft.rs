//! Per-aircraft state.
//!
//! # Lifecycle
//!
//! ```text
//!               ┌──────────────────────────────┐
//!               ▼                              │
//! Approaching → AttemptingLanding ─┬→ Landed   │
//!                                  └→ GoAround → SearchingGap ─┬→ Holding
//!                                                              └→ Diverted
//! ```
//!
//! `Landed` and `Diverted` are terminal.  A holding aircraft whose reentry
//! gap is hit by a closure drops back to `SearchingGap`.

use std::fmt;

use fa_core::{AircraftId, Tick};

// ── Phase ─────────────────────────────────────────────────────────────────────

/// Where an aircraft is in its approach.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Phase {
    Approaching,
    AttemptingLanding,
    GoAround,
    SearchingGap,
    Holding,
    Landed,
    Diverted,
}

impl Phase {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Landed | Phase::Diverted)
    }

    /// Phases that count toward the landing queue.
    #[inline]
    pub fn is_queued(self) -> bool {
        matches!(self, Phase::AttemptingLanding | Phase::Holding | Phase::SearchingGap)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Approaching       => "approaching",
            Phase::AttemptingLanding => "attempting_landing",
            Phase::GoAround          => "go_around",
            Phase::SearchingGap      => "searching_gap",
            Phase::Holding           => "holding",
            Phase::Landed            => "landed",
            Phase::Diverted          => "diverted",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── DiversionReason ───────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DiversionReason {
    /// No reentry gap of the required length before the horizon.
    NoGap,
    /// The earliest gap starts later than the hold limit allows.
    HoldLimit,
    /// Still airborne when the run ended.
    Horizon,
}

impl DiversionReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DiversionReason::NoGap     => "no_gap",
            DiversionReason::HoldLimit => "hold_limit",
            DiversionReason::Horizon   => "horizon",
        }
    }
}

impl fmt::Display for DiversionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When and why an aircraft left for an alternate airport.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diversion {
    pub at:     Tick,
    pub reason: DiversionReason,
}

// ── Transition ────────────────────────────────────────────────────────────────

/// One phase change, as reported to metrics and observers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub tick:     Tick,
    pub aircraft: AircraftId,
    pub from:     Phase,
    pub to:       Phase,
}

// ── Aircraft ──────────────────────────────────────────────────────────────────

/// Mutable state of one aircraft.
///
/// `slot` is the tick the aircraft currently holds on the runway: its landing
/// slot while `AttemptingLanding`, or the first tick of its reentry gap while
/// `Holding`.  `None` everywhere else, and while a queued aircraft waits for
/// the runway to offer anything at all.
#[derive(Clone, Debug)]
pub struct Aircraft {
    pub id:         AircraftId,
    pub arrival:    Tick,
    pub phase:      Phase,
    pub slot:       Option<Tick>,
    /// Latest slot ever assigned; a new assignment may never precede it.
    pub last_slot:  Option<Tick>,
    /// First slot assigned after arrival.
    pub first_slot: Option<Tick>,
    pub landed_at:  Option<Tick>,
    pub diversion:  Option<Diversion>,
    pub go_arounds: u32,

    /// Tick of the most recent go-around; the hold limit is measured from it.
    pub hold_since:  Option<Tick>,
    /// Earliest tick the next gap search may return.
    pub search_from: Tick,
    /// End-of-tick samples spent in `Holding`.
    pub hold_ticks:  u64,

    /// Arrived into, or waited through, an active closure while approaching.
    pub closure_deferred:    bool,
    /// Lost a landing slot or a reentry gap to a closure.
    pub closure_rescheduled: bool,
}

impl Aircraft {
    pub fn new(id: AircraftId, arrival: Tick) -> Self {
        Self {
            id,
            arrival,
            phase:               Phase::Approaching,
            slot:                None,
            last_slot:           None,
            first_slot:          None,
            landed_at:           None,
            diversion:           None,
            go_arounds:          0,
            hold_since:          None,
            search_from:         arrival,
            hold_ticks:          0,
            closure_deferred:    false,
            closure_rescheduled: false,
        }
    }

    #[inline]
    pub fn is_airborne(&self) -> bool {
        !self.phase.is_terminal()
    }

    /// Landing tick minus arrival tick.  `None` unless landed.
    pub fn delay(&self) -> Option<u64> {
        self.landed_at.map(|t| t - self.arrival)
    }

    /// The first slot offered was later than the arrival tick, or no slot
    /// was ever offered.
    pub fn was_congested(&self) -> bool {
        self.first_slot.is_none_or(|s| s > self.arrival)
    }

    pub fn closure_affected(&self) -> bool {
        self.closure_deferred || self.closure_rescheduled
    }
}
