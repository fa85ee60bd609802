//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter; one tick is one
//! simulated minute.  `SimClock` owns the current tick and the horizon (the
//! exclusive end of the run) and is the only thing that advances time.
//!
//! Integer ticks keep all runway arithmetic exact: a landing slot, a closure
//! boundary and a reentry gap are compared as plain `u64`s, with no
//! floating-point boundary effects at `[start, end)` edges.

use std::fmt;

use crate::{ConfigError, ConfigResult};

/// Minutes in one hour; the tick length is fixed at one minute.
pub const TICKS_PER_HOUR: u64 = 60;

pub const MINUTES_PER_DAY: u64 = 24 * 60;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick (minutes since simulation start, 0-based).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// `self + n`, saturating at `u64::MAX`.
    #[inline]
    pub fn saturating_add(self, n: u64) -> Tick {
        Tick(self.0.saturating_add(n))
    }

    /// The tick immediately after `self`.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The run's clock: current tick plus the exclusive horizon.
///
/// `day_start_minute` only affects display (`T75 (07:15)` for a run starting
/// at 06:00); it never shifts tick arithmetic.
#[derive(Clone, Debug)]
pub struct SimClock {
    current_tick:     Tick,
    horizon:          Tick,
    day_start_minute: u64,
}

impl SimClock {
    /// A clock at tick 0 that finishes after `horizon_ticks` ticks.
    pub fn new(horizon_ticks: u64) -> Self {
        Self {
            current_tick:     Tick::ZERO,
            horizon:          Tick(horizon_ticks),
            day_start_minute: 0,
        }
    }

    /// Render ticks as local time of day starting from `minute` (e.g. 360 for 06:00).
    pub fn with_day_start(mut self, minute: u64) -> Self {
        self.day_start_minute = minute;
        self
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.current_tick
    }

    #[inline]
    pub fn horizon(&self) -> Tick {
        self.horizon
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick.next();
    }

    /// `true` once the current tick has reached the horizon.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.current_tick >= self.horizon
    }

    /// Ticks left before the horizon.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.horizon.since(self.current_tick)
    }

    /// Local (hour, minute) for `tick`, wrapping at midnight.
    pub fn clock_time(&self, tick: Tick) -> (u64, u64) {
        let minute_of_day =
            (self.day_start_minute % MINUTES_PER_DAY + tick.0 % MINUTES_PER_DAY) % MINUTES_PER_DAY;
        (minute_of_day / 60, minute_of_day % 60)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m) = self.clock_time(self.current_tick);
        write!(f, "{} ({:02}:{:02})", self.current_tick, h, m)
    }
}

// ── HH:MM parsing ─────────────────────────────────────────────────────────────

/// Parse a `"HH:MM"` time of day into minutes after midnight.
pub fn parse_hhmm(s: &str) -> ConfigResult<u64> {
    let malformed = || ConfigError::MalformedClockTime(s.to_owned());
    let (hh, mm) = s.trim().split_once(':').ok_or_else(malformed)?;
    let hours: u64 = hh.parse().map_err(|_| malformed())?;
    let minutes: u64 = mm.parse().map_err(|_| malformed())?;
    if hours > 23 || minutes > 59 || mm.len() != 2 {
        return Err(malformed());
    }
    Ok(hours * 60 + minutes)
}
