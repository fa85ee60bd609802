//! `RunwayLedger` — committed landings, claimed slots, and gap queries.

use std::collections::BTreeMap;

use fa_core::{AircraftId, Tick};

use crate::{ClosureSchedule, ClosureWindow, LedgerError, LedgerResult};

/// The outcome of revealing one closure window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClosureActivation {
    pub window:      ClosureWindow,
    /// Claims that fell inside the window and were released, in tick order.
    pub invalidated: Vec<(Tick, AircraftId)>,
}

/// The single runway of a run.
///
/// All mutation happens from the tick worker in fairness order, so the ledger
/// needs no interior locking: whoever asks first in a tick gets the slot.
#[derive(Clone, Debug)]
pub struct RunwayLedger {
    horizon:   Tick,
    committed: Vec<Tick>,
    aborted:   Vec<Tick>,
    claims:    BTreeMap<Tick, AircraftId>,
    closures:  ClosureSchedule,
}

impl RunwayLedger {
    pub fn new(horizon: Tick, closures: ClosureSchedule) -> Self {
        Self {
            horizon,
            committed: Vec::new(),
            aborted:   Vec::new(),
            claims:    BTreeMap::new(),
            closures,
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn horizon(&self) -> Tick {
        self.horizon
    }

    /// Committed landing ticks, strictly ascending.
    pub fn committed(&self) -> &[Tick] {
        &self.committed
    }

    pub fn is_committed(&self, tick: Tick) -> bool {
        self.committed.binary_search(&tick).is_ok()
    }

    /// Ticks consumed by aborted attempts (go-arounds), ascending.
    pub fn aborted(&self) -> &[Tick] {
        &self.aborted
    }

    pub fn claim_holder(&self, tick: Tick) -> Option<AircraftId> {
        self.claims.get(&tick).copied()
    }

    pub fn claim_count(&self) -> usize {
        self.claims.len()
    }

    pub fn closures(&self) -> &ClosureSchedule {
        &self.closures
    }

    /// `true` while a revealed closure covers `now`.
    pub fn is_closed_at(&self, now: Tick) -> bool {
        self.closures.is_known_closed(now)
    }

    /// A tick is open when it is before the horizon, unclaimed, uncommitted,
    /// not consumed by a go-around, and outside every known closure.
    pub fn is_open(&self, tick: Tick) -> bool {
        tick < self.horizon
            && !self.claims.contains_key(&tick)
            && !self.is_committed(tick)
            && self.aborted.binary_search(&tick).is_err()
            && !self.closures.is_known_closed(tick)
    }

    /// Earliest open tick `>= from`, or `None` if the horizon comes first.
    pub fn next_free_slot(&self, from: Tick) -> Option<Tick> {
        let mut t = from;
        while t < self.horizon {
            if self.is_open(t) {
                return Some(t);
            }
            t = t.next();
        }
        None
    }

    /// Earliest tick `>= from` that starts `min_ticks` consecutive open ticks,
    /// the whole run lying before the horizon.
    pub fn next_free_gap_of_length(&self, min_ticks: u64, from: Tick) -> Option<Tick> {
        if min_ticks == 0 {
            return (from < self.horizon).then_some(from);
        }
        let mut run_start = from;
        let mut t = from;
        while t < self.horizon {
            if self.is_open(t) {
                if t.next() - run_start >= min_ticks {
                    return Some(run_start);
                }
            } else {
                run_start = t.next();
            }
            t = t.next();
        }
        None
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Hold `tick` for `aircraft`.
    pub fn claim(&mut self, tick: Tick, aircraft: AircraftId) -> LedgerResult<()> {
        self.check_bookable(tick)?;
        if let Some(holder) = self.claim_holder(tick) {
            return Err(LedgerError::SlotTaken { tick, holder });
        }
        self.claims.insert(tick, aircraft);
        Ok(())
    }

    /// Drop `aircraft`'s claim on `tick`.
    pub fn release(&mut self, tick: Tick, aircraft: AircraftId) -> LedgerResult<()> {
        match self.claims.get(&tick) {
            Some(&holder) if holder == aircraft => {
                self.claims.remove(&tick);
                Ok(())
            }
            _ => Err(LedgerError::NotClaimed { tick, aircraft }),
        }
    }

    /// Commit a landing at `tick`, consuming `aircraft`'s claim on it.
    pub fn reserve(&mut self, tick: Tick, aircraft: AircraftId) -> LedgerResult<()> {
        self.check_bookable(tick)?;
        if let Some(&last) = self.committed.last() {
            if tick < last {
                return Err(LedgerError::OutOfOrder { tick, last });
            }
        }
        match self.claims.get(&tick) {
            Some(&holder) if holder == aircraft => {}
            Some(&holder) => return Err(LedgerError::SlotTaken { tick, holder }),
            None => return Err(LedgerError::NotClaimed { tick, aircraft }),
        }
        self.claims.remove(&tick);
        self.committed.push(tick);
        Ok(())
    }

    /// Record an aborted attempt: `aircraft`'s claim on `tick` is consumed
    /// without a landing, and the tick stays unavailable to everyone else.
    pub fn abort(&mut self, tick: Tick, aircraft: AircraftId) -> LedgerResult<()> {
        self.release(tick, aircraft)?;
        if let Err(pos) = self.aborted.binary_search(&tick) {
            self.aborted.insert(pos, tick);
        }
        Ok(())
    }

    /// Reveal closures starting at or before `now` and release every claim
    /// inside them.  Committed landings are never touched.
    pub fn activate_closures(&mut self, now: Tick) -> Vec<ClosureActivation> {
        let revealed: Vec<ClosureWindow> = self.closures.reveal_due(now).to_vec();
        revealed
            .into_iter()
            .map(|window| {
                let invalidated: Vec<(Tick, AircraftId)> = self
                    .claims
                    .range(window.start..window.end)
                    .map(|(&t, &a)| (t, a))
                    .collect();
                for (t, _) in &invalidated {
                    self.claims.remove(t);
                }
                ClosureActivation { window, invalidated }
            })
            .collect()
    }

    fn check_bookable(&self, tick: Tick) -> LedgerResult<()> {
        if tick >= self.horizon {
            return Err(LedgerError::BeyondHorizon { tick, horizon: self.horizon });
        }
        if self.is_committed(tick) {
            return Err(LedgerError::DoubleReservation { tick });
        }
        if self.closures.is_known_closed(tick) {
            return Err(LedgerError::InsideClosure { tick });
        }
        Ok(())
    }
}
