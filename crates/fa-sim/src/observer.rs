//! Simulation observer trait for progress reporting and data collection.

use fa_core::{AircraftId, Tick};
use fa_runway::ClosureActivation;

use crate::aircraft::Transition;
use crate::metrics::TickSample;
use crate::sim::RunResult;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: landing printer
///
/// ```rust,ignore
/// struct LandingPrinter;
///
/// impl SimObserver for LandingPrinter {
///     fn on_transition(&mut self, t: &Transition) {
///         if t.to == Phase::Landed {
///             println!("{}: {} landed", t.tick, t.aircraft);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per closure window, in the tick it begins, after the
    /// affected slots have been released.
    fn on_closure(&mut self, _activation: &ClosureActivation) {}

    fn on_arrival(&mut self, _tick: Tick, _aircraft: AircraftId) {}

    /// Called for every phase change, in the order they happened.  Forced
    /// diversions at the end of the run carry the horizon tick.
    fn on_transition(&mut self, _transition: &Transition) {}

    /// Called at the end of each tick with that tick's sample.
    fn on_tick_end(&mut self, _sample: &TickSample) {}

    /// Called once after the run has been finalized.
    fn on_run_end(&mut self, _result: &RunResult) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
