//! Fluent builder for constructing a [`Sim`].

use fa_core::config::hours;
use fa_core::{ArrivalProcess, ClosureSpec, RunConfig};

use crate::{Sim, SimResult};

/// Fluent builder for [`Sim`].
///
/// Starts from [`RunConfig::default`] with the given arrival rate.
///
/// | Method                     | Default                  |
/// |----------------------------|--------------------------|
/// | `.horizon_ticks(n)`        | 1080 (18 h)              |
/// | `.arrival_process(p)`      | `Poisson`                |
/// | `.windy(b)`                | `false`                  |
/// | `.go_around_probability(p)`| 0.10                     |
/// | `.closure(start, dur)`     | none                     |
/// | `.min_gap(n)`              | 10                       |
/// | `.max_hold(n)`             | unbounded                |
/// | `.seed(s)`                 | 42                       |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(0.5)
///     .horizon_hours(2)
///     .windy(true)
///     .closure(60, 30)
///     .seed(7)
///     .build()?;
/// let result = sim.run(&mut NoopObserver)?;
/// ```
#[derive(Clone, Debug)]
pub struct SimBuilder {
    config: RunConfig,
}

impl SimBuilder {
    pub fn new(arrival_rate: f64) -> Self {
        Self { config: RunConfig { arrival_rate, ..RunConfig::default() } }
    }

    /// Start from an existing configuration.
    pub fn from_config(config: RunConfig) -> Self {
        Self { config }
    }

    pub fn arrival_process(mut self, process: ArrivalProcess) -> Self {
        self.config.arrival_process = process;
        self
    }

    pub fn horizon_ticks(mut self, ticks: u64) -> Self {
        self.config.horizon_ticks = ticks;
        self
    }

    pub fn horizon_hours(mut self, h: u64) -> Self {
        self.config.horizon_ticks = hours(h);
        self
    }

    pub fn windy(mut self, windy: bool) -> Self {
        self.config.windy = windy;
        self
    }

    /// Go-around probability applied when windy.
    pub fn go_around_probability(mut self, p: f64) -> Self {
        self.config.go_around_probability = p;
        self
    }

    /// Add a closure `[start, start + duration)`.  May be called repeatedly.
    pub fn closure(mut self, start_tick: u64, duration_ticks: u64) -> Self {
        self.config.closures.push(ClosureSpec::new(start_tick, duration_ticks));
        self
    }

    pub fn min_gap(mut self, ticks: u64) -> Self {
        self.config.reentry.min_gap_ticks = ticks;
        self
    }

    pub fn max_hold(mut self, ticks: u64) -> Self {
        self.config.reentry.max_hold_ticks = Some(ticks);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn day_start_minute(mut self, minute: u64) -> Self {
        self.config.day_start_minute = minute;
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn into_config(self) -> RunConfig {
        self.config
    }

    /// Validate the configuration and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        Sim::new(self.config)
    }
}
