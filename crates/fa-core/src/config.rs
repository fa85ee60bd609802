//! Run configuration.
//!
//! `RunConfig` enumerates every knob of a single simulation run.  It is plain
//! data: the CLI fills it from flags or a JSON file, the sweep clones it per
//! replication, and [`RunConfig::validate`] rejects it before any tick runs.

use crate::time::{MINUTES_PER_DAY, TICKS_PER_HOUR};
use crate::{ConfigError, ConfigResult, SimClock, parse_hhmm};

/// Per-attempt go-around probability in windy conditions.
pub const DEFAULT_GO_AROUND_PROBABILITY: f64 = 0.10;

/// Length of the runway opening a go-around aircraft needs to rejoin.
pub const DEFAULT_REENTRY_GAP_TICKS: u64 = 10;

/// Duration of a surprise closure when only its start time is given.
pub const DEFAULT_CLOSURE_DURATION_TICKS: u64 = 30;

/// The simulated operating day starts at 06:00.
pub const DEFAULT_DAY_START_MINUTE: u64 = 6 * 60;

/// 06:00 to midnight.
pub const DEFAULT_HORIZON_HOURS: u64 = 18;

/// Longest accepted run: one leap year of minutes.
pub const MAX_HORIZON_TICKS: u64 = 366 * MINUTES_PER_DAY;

// ── ArrivalProcess ────────────────────────────────────────────────────────────

/// How per-tick arrival counts are drawn.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ArrivalProcess {
    /// Poisson(λ) arrivals per tick.
    #[default]
    Poisson,
    /// At most one arrival per tick, with probability λ.
    Bernoulli,
}

// ── ClosureSpec ───────────────────────────────────────────────────────────────

/// A configured runway closure `[start_tick, start_tick + duration_ticks)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClosureSpec {
    pub start_tick:     u64,
    pub duration_ticks: u64,
}

impl ClosureSpec {
    pub fn new(start_tick: u64, duration_ticks: u64) -> Self {
        Self { start_tick, duration_ticks }
    }

    /// Exclusive end tick, saturating at `u64::MAX`.  `validate` rejects
    /// closures whose end does not fit.
    #[inline]
    pub fn end_tick(&self) -> u64 {
        self.start_tick.saturating_add(self.duration_ticks)
    }

    /// Build a closure from a local `"HH:MM"` time, relative to a day that
    /// starts at `day_start_minute` (tick 0).
    pub fn at_clock_time(
        hhmm:             &str,
        day_start_minute: u64,
        duration_ticks:   u64,
    ) -> ConfigResult<Self> {
        let minute = parse_hhmm(hhmm)?;
        if minute < day_start_minute {
            return Err(ConfigError::ClosureBeforeDayStart {
                time:      hhmm.to_owned(),
                day_start: format!("{:02}:{:02}", day_start_minute / 60, day_start_minute % 60),
            });
        }
        Ok(Self::new(minute - day_start_minute, duration_ticks))
    }
}

// ── ReentryPolicy ─────────────────────────────────────────────────────────────

/// Go-around reentry parameters.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReentryPolicy {
    /// Consecutive open runway ticks required before rejoining the sequence.
    pub min_gap_ticks: u64,
    /// Longest an aircraft may hold, counted from its go-around tick to the
    /// start of the gap it rejoins.  `None` bounds the search by the horizon
    /// only.
    pub max_hold_ticks: Option<u64>,
}

impl Default for ReentryPolicy {
    fn default() -> Self {
        Self {
            min_gap_ticks:  DEFAULT_REENTRY_GAP_TICKS,
            max_hold_ticks: None,
        }
    }
}

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// Top-level configuration for one simulation run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunConfig {
    /// λ, mean arrivals per minute.
    pub arrival_rate: f64,

    pub arrival_process: ArrivalProcess,

    /// Ticks to simulate (exclusive end).  18 h = 1080 ticks.
    pub horizon_ticks: u64,

    /// Enables the per-attempt go-around draw.
    pub windy: bool,

    /// Go-around probability used when `windy` is set.
    pub go_around_probability: f64,

    /// Surprise closures, in any order.  They must not overlap.
    pub closures: Vec<ClosureSpec>,

    pub reentry: ReentryPolicy,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Local minute of tick 0, used only for `HH:MM` rendering.
    pub day_start_minute: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            arrival_rate:          0.1,
            arrival_process:       ArrivalProcess::Poisson,
            horizon_ticks:         hours(DEFAULT_HORIZON_HOURS),
            windy:                 false,
            go_around_probability: DEFAULT_GO_AROUND_PROBABILITY,
            closures:              Vec::new(),
            reentry:               ReentryPolicy::default(),
            seed:                  42,
            day_start_minute:      DEFAULT_DAY_START_MINUTE,
        }
    }
}

/// Ticks in `h` hours, saturating at `u64::MAX`.
#[inline]
pub fn hours(h: u64) -> u64 {
    h.saturating_mul(TICKS_PER_HOUR)
}

impl RunConfig {
    /// The probability actually applied to each landing attempt.
    #[inline]
    pub fn effective_go_around_probability(&self) -> f64 {
        if self.windy { self.go_around_probability } else { 0.0 }
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.horizon_ticks).with_day_start(self.day_start_minute)
    }

    /// Closures sorted by start tick.
    pub fn sorted_closures(&self) -> Vec<ClosureSpec> {
        let mut closures = self.closures.clone();
        closures.sort_by_key(|c| c.start_tick);
        closures
    }

    /// Reject anything that cannot describe a meaningful run.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.arrival_rate.is_finite() || self.arrival_rate < 0.0 {
            return Err(ConfigError::InvalidArrivalRate(self.arrival_rate));
        }
        if self.arrival_process == ArrivalProcess::Bernoulli && self.arrival_rate > 1.0 {
            return Err(ConfigError::BernoulliRateAboveOne(self.arrival_rate));
        }
        if self.horizon_ticks == 0 {
            return Err(ConfigError::ZeroHorizon);
        }
        if self.horizon_ticks > MAX_HORIZON_TICKS {
            return Err(ConfigError::HorizonTooLong {
                ticks: self.horizon_ticks,
                max:   MAX_HORIZON_TICKS,
            });
        }
        if self.day_start_minute >= MINUTES_PER_DAY {
            return Err(ConfigError::InvalidDayStart(self.day_start_minute));
        }
        let p = self.go_around_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::InvalidProbability(p));
        }
        if self.reentry.min_gap_ticks == 0 {
            return Err(ConfigError::ZeroGap);
        }

        let closures = self.sorted_closures();
        for c in &closures {
            if c.duration_ticks == 0 {
                return Err(ConfigError::EmptyClosure { start: c.start_tick });
            }
            if c.start_tick.checked_add(c.duration_ticks).is_none() {
                return Err(ConfigError::ClosureOverflow {
                    start:    c.start_tick,
                    duration: c.duration_ticks,
                });
            }
            if c.start_tick >= self.horizon_ticks {
                return Err(ConfigError::ClosureOutsideHorizon {
                    start:   c.start_tick,
                    horizon: self.horizon_ticks,
                });
            }
        }
        for pair in closures.windows(2) {
            if pair[1].start_tick < pair[0].end_tick() {
                return Err(ConfigError::OverlappingClosures {
                    first_start:  pair[0].start_tick,
                    first_end:    pair[0].end_tick(),
                    second_start: pair[1].start_tick,
                    second_end:   pair[1].end_tick(),
                });
            }
        }
        Ok(())
    }
}
