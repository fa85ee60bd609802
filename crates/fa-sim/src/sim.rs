//! The `Sim` struct and its tick loop.

use fa_core::{AircraftId, RunConfig, SimClock, SimRng, Tick};
use fa_runway::{ClosureSchedule, ClosureWindow, RunwayLedger};
use tracing::{debug, info, trace, warn};

use crate::aircraft::{Aircraft, Phase, Transition};
use crate::arrivals::ArrivalGenerator;
use crate::machine::{self, Approach};
use crate::metrics::{AircraftRecord, Metrics, MetricsCollector, TickSample};
use crate::{NoopObserver, SimError, SimObserver, SimResult};

// ── RunResult ─────────────────────────────────────────────────────────────────

/// Everything a finished run produced.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunResult {
    pub config:   RunConfig,
    pub metrics:  Metrics,
    /// One sample per tick, `0..horizon`.
    pub ticks:    Vec<TickSample>,
    /// One record per aircraft, in arrival order.
    pub aircraft: Vec<AircraftRecord>,
    /// Committed landing ticks, ascending.
    pub landings: Vec<Tick>,
    /// Ticks spent on go-arounds, ascending.
    pub aborted:  Vec<Tick>,
    pub closures: Vec<ClosureWindow>,
}

/// Validate `config`, run it to the horizon, and return the result.
pub fn run_simulation(config: RunConfig) -> SimResult<RunResult> {
    Sim::new(config)?.run(&mut NoopObserver)
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Each tick runs, in order:
///
/// 1. **Closures**: windows starting this tick become known; claims inside
///    them are released, affected aircraft are updated and the landing queue
///    is re-sequenced in arrival order past the window.
/// 2. **Arrivals**: one draw from the arrival process; new aircraft get the
///    next ids and start `Approaching`.
/// 3. **Evaluation**: every airborne aircraft, in ascending `AircraftId`
///    order, advances as far as it can this tick.
/// 4. **Sample**: queue and holding counts are recorded; terminal aircraft
///    leave the airborne set.
///
/// After the last tick, aircraft still airborne are diverted with reason
/// `Horizon`.
///
/// Create via [`Sim::new`] or [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub config: RunConfig,
    pub clock:  SimClock,

    /// The shared runway.  Read it between `run_ticks` calls to inspect
    /// commits and claims.
    pub runway: RunwayLedger,

    /// Every aircraft that ever arrived, indexed by `AircraftId`.
    pub fleet: Vec<Aircraft>,

    rng:         SimRng,
    arrivals:    ArrivalGenerator,
    /// Non-terminal aircraft, ascending id.
    airborne:    Vec<AircraftId>,
    metrics:     MetricsCollector,
    transitions: Vec<Transition>,
    finalized:   bool,
}

impl Sim {
    pub fn new(config: RunConfig) -> SimResult<Self> {
        config.validate()?;
        let arrivals = ArrivalGenerator::new(config.arrival_process, config.arrival_rate)?;
        let clock = config.make_clock();
        let runway = RunwayLedger::new(
            clock.horizon(),
            ClosureSchedule::new(&config.closures),
        );
        Ok(Self {
            rng:         SimRng::new(config.seed),
            metrics:     MetricsCollector::new(config.horizon_ticks),
            arrivals,
            clock,
            runway,
            fleet:       Vec::new(),
            airborne:    Vec::new(),
            transitions: Vec::new(),
            finalized:   false,
            config,
        })
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to the horizon, divert whatever is still
    /// airborne, and return the result.
    ///
    /// Calling `run` again after it returned only rebuilds the result.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunResult> {
        if self.finalized {
            return Ok(self.build_result());
        }
        info!(
            lambda   = self.config.arrival_rate,
            horizon  = self.config.horizon_ticks,
            windy    = self.config.windy,
            seed     = self.config.seed,
            closures = self.config.closures.len(),
            "run start"
        );
        while !self.clock.is_finished() {
            self.step(observer)?;
        }
        self.resolve_stranded(observer)?;
        self.finalized = true;

        let result = self.build_result();
        let m = &result.metrics;
        info!(
            arrivals   = m.arrivals,
            landings   = m.landings,
            diversions = m.diversions,
            go_arounds = m.go_arounds,
            mean_delay = m.mean_delay(),
            "run complete"
        );
        observer.on_run_end(&result);
        Ok(result)
    }

    /// Run at most `n` ticks from the current position, stopping at the
    /// horizon.  Nothing is finalized; call [`run`](Self::run) to finish.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            if self.clock.is_finished() {
                break;
            }
            self.step(observer)?;
        }
        Ok(())
    }

    /// Aircraft not yet landed or diverted, ascending id.
    pub fn airborne(&self) -> &[AircraftId] {
        &self.airborne
    }

    pub fn aircraft(&self, id: AircraftId) -> Option<&Aircraft> {
        self.fleet.get(id.index())
    }

    /// Tick samples recorded so far.
    pub fn tick_series(&self) -> &[TickSample] {
        self.metrics.series()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.now();
        observer.on_tick_start(now);
        self.process_tick(now, observer)?;
        self.clock.advance();
        Ok(())
    }

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<()> {
        // ── Phase 1: reveal closures ──────────────────────────────────────
        let min_gap = self.config.reentry.min_gap_ticks;
        for activation in self.runway.activate_closures(now) {
            debug!(
                start       = activation.window.start.0,
                end         = activation.window.end.0,
                invalidated = activation.invalidated.len(),
                "runway closed"
            );
            for &id in &self.airborne {
                machine::apply_closure(
                    &mut self.fleet[id.index()],
                    &activation,
                    now,
                    min_gap,
                    &mut self.runway,
                    &mut self.transitions,
                )?;
            }
            machine::resequence_queue(
                &mut self.fleet,
                &self.airborne,
                activation.window,
                &mut self.runway,
            )?;
            observer.on_closure(&activation);
        }
        self.metrics.begin_tick(now, self.runway.is_closed_at(now));

        // ── Phase 2: arrivals ─────────────────────────────────────────────
        let count = self.arrivals.sample(&mut self.rng);
        for _ in 0..count {
            let id = AircraftId::try_from(self.fleet.len()).map_err(|_| SimError::FleetOverflow)?;
            self.fleet.push(Aircraft::new(id, now));
            self.airborne.push(id);
            self.metrics.on_arrival();
            observer.on_arrival(now, id);
        }

        // ── Phase 3: evaluate in fairness order ───────────────────────────
        //
        // Ascending id is ascending arrival tick, so earlier aircraft always
        // get first pick of the runway within a tick.
        let go_around_probability = self.config.effective_go_around_probability();
        let mut cx = Approach {
            now,
            runway: &mut self.runway,
            rng: &mut self.rng,
            go_around_probability,
            reentry: self.config.reentry,
        };
        for &id in &self.airborne {
            machine::evaluate(&mut self.fleet[id.index()], &mut cx, &mut self.transitions)?;
        }
        self.flush_transitions(observer);

        // ── Phase 4: end-of-tick sample ───────────────────────────────────
        let mut queue_len = 0u32;
        let mut holding = 0u32;
        for &id in &self.airborne {
            let ac = &mut self.fleet[id.index()];
            if ac.phase.is_queued() {
                queue_len += 1;
            }
            if ac.phase == Phase::Holding {
                holding += 1;
                ac.hold_ticks += 1;
            }
        }
        let fleet = &self.fleet;
        self.airborne.retain(|id| fleet[id.index()].is_airborne());
        trace!(tick = now.0, arrivals = count, queue_len, holding, "tick end");
        if let Some(sample) = self.metrics.end_tick(queue_len, holding) {
            observer.on_tick_end(sample);
        }
        Ok(())
    }

    /// Divert every aircraft still airborne at the horizon.
    fn resolve_stranded<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        if self.airborne.is_empty() {
            return Ok(());
        }
        let horizon = self.clock.horizon();
        warn!(
            count   = self.airborne.len(),
            horizon = horizon.0,
            "aircraft still airborne at horizon; diverting"
        );
        for id in std::mem::take(&mut self.airborne) {
            machine::force_divert(
                &mut self.fleet[id.index()],
                horizon,
                &mut self.runway,
                &mut self.transitions,
            )?;
        }
        self.flush_transitions(observer);
        Ok(())
    }

    fn flush_transitions<O: SimObserver>(&mut self, observer: &mut O) {
        for t in self.transitions.drain(..) {
            let ac = &self.fleet[t.aircraft.index()];
            self.metrics.on_transition(&t, ac);
            trace!(aircraft = %t.aircraft, tick = t.tick.0, from = %t.from, to = %t.to, "transition");
            observer.on_transition(&t);
        }
    }

    fn build_result(&self) -> RunResult {
        let (metrics, ticks, aircraft) = self.metrics.finish(&self.fleet);
        RunResult {
            config: self.config.clone(),
            metrics,
            ticks,
            aircraft,
            landings: self.runway.committed().to_vec(),
            aborted: self.runway.aborted().to_vec(),
            closures: self.runway.closures().all().to_vec(),
        }
    }
}
