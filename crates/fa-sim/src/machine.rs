//! The per-aircraft state machine.
//!
//! [`evaluate`] advances one aircraft as far as it can go within the current
//! tick.  A single evaluation may chain several transitions: an arrival that
//! finds the runway free lands in the tick it arrived, and a go-around searches
//! for its reentry gap in the same tick.
//!
//! # Slots and gaps
//!
//! | Phase               | `slot` holds                                  |
//! |---------------------|-----------------------------------------------|
//! | `AttemptingLanding` | the claimed landing tick (or `None` if the    |
//! |                     | runway has nothing left before the horizon)   |
//! | `Holding`           | the first tick of the reentry gap             |
//!
//! A reentry gap is `min_gap_ticks` consecutive open ticks at search time.
//! Only its first tick is claimed; that tick becomes the landing slot when the
//! aircraft leaves the hold.

use fa_core::{AircraftId, ReentryPolicy, SimRng, Tick};
use fa_runway::{ClosureActivation, ClosureWindow, RunwayLedger};
use tracing::debug;

use crate::aircraft::{Aircraft, Diversion, DiversionReason, Phase, Transition};
use crate::{SimError, SimResult};

/// Everything one evaluation may touch besides the aircraft itself.
pub struct Approach<'a> {
    pub now:                   Tick,
    pub runway:                &'a mut RunwayLedger,
    pub rng:                   &'a mut SimRng,
    pub go_around_probability: f64,
    pub reentry:               ReentryPolicy,
}

/// Advance `ac` until it has to wait for a later tick or reaches a terminal
/// phase.  Transitions are appended to `out` in the order they happen.
pub fn evaluate(
    ac:  &mut Aircraft,
    cx:  &mut Approach<'_>,
    out: &mut Vec<Transition>,
) -> SimResult<()> {
    let now = cx.now;
    loop {
        match ac.phase {
            Phase::Approaching => {
                if cx.runway.is_closed_at(now) {
                    ac.closure_deferred = true;
                    return Ok(());
                }
                move_to(ac, Phase::AttemptingLanding, now, out);
            }

            Phase::AttemptingLanding => {
                let slot = match ac.slot {
                    Some(s) => s,
                    None => match cx.runway.next_free_slot(not_before(ac, now)) {
                        Some(s) => {
                            assign_slot(ac, s, cx.runway)?;
                            s
                        }
                        None => return Ok(()),
                    },
                };
                if slot != now {
                    return Ok(());
                }

                let p = cx.go_around_probability;
                if p > 0.0 && cx.rng.gen_bool(p) {
                    cx.runway.abort(now, ac.id)?;
                    ac.slot = None;
                    ac.go_arounds += 1;
                    ac.hold_since = Some(now);
                    ac.search_from = now.next();
                    debug!(aircraft = %ac.id, tick = now.0, go_arounds = ac.go_arounds, "go-around");
                    move_to(ac, Phase::GoAround, now, out);
                } else {
                    cx.runway.reserve(now, ac.id)?;
                    ac.slot = None;
                    ac.landed_at = Some(now);
                    move_to(ac, Phase::Landed, now, out);
                    return Ok(());
                }
            }

            Phase::GoAround => move_to(ac, Phase::SearchingGap, now, out),

            Phase::SearchingGap => {
                let gap = cx
                    .runway
                    .next_free_gap_of_length(cx.reentry.min_gap_ticks, ac.search_from);
                let Some(gap) = gap else {
                    divert(ac, DiversionReason::NoGap, now, out);
                    return Ok(());
                };
                let since = ac.hold_since.unwrap_or(now);
                if let Some(max_hold) = cx.reentry.max_hold_ticks {
                    if gap.since(since) > max_hold {
                        divert(ac, DiversionReason::HoldLimit, now, out);
                        return Ok(());
                    }
                }
                assign_slot(ac, gap, cx.runway)?;
                move_to(ac, Phase::Holding, now, out);
                return Ok(());
            }

            Phase::Holding => match ac.slot {
                Some(gap) if gap <= now => move_to(ac, Phase::AttemptingLanding, now, out),
                Some(_) => return Ok(()),
                None => move_to(ac, Phase::SearchingGap, now, out),
            },

            Phase::Landed | Phase::Diverted => return Ok(()),
        }
    }
}

/// Apply a freshly revealed closure to `ac`.
///
/// The ledger has already released every claim inside the window.  A queued
/// aircraft that lost its slot is re-slotted by [`resequence_queue`]; a holding
/// aircraft whose reentry gap overlaps the window searches again from the
/// window's end, its hold limit still measured from the original go-around.
pub fn apply_closure(
    ac:         &mut Aircraft,
    activation: &ClosureActivation,
    now:        Tick,
    min_gap:    u64,
    runway:     &mut RunwayLedger,
    out:        &mut Vec<Transition>,
) -> SimResult<()> {
    let window = activation.window;
    let Some(slot) = ac.slot else { return Ok(()) };
    match ac.phase {
        Phase::AttemptingLanding if window.contains(slot) => {
            ac.slot = None;
            ac.closure_rescheduled = true;
            debug!(aircraft = %ac.id, slot = slot.0, "landing slot lost to closure");
        }
        Phase::Holding if window.overlaps(slot, slot.saturating_add(min_gap)) => {
            if runway.claim_holder(slot) == Some(ac.id) {
                runway.release(slot, ac.id)?;
            }
            ac.slot = None;
            ac.search_from = window.end;
            ac.closure_rescheduled = true;
            debug!(aircraft = %ac.id, gap = slot.0, "reentry gap lost to closure");
            move_to(ac, Phase::SearchingGap, now, out);
        }
        _ => {}
    }
    Ok(())
}

/// Re-sequence the landing queue after `window` is revealed.
///
/// Every `AttemptingLanding` aircraft in `queue` still waiting for a slot at
/// or after the window's start gives up its claim, and the queue is assigned
/// again in id order from the window's end.  Each aircraft lands strictly
/// after the one ahead of it and never earlier than it was scheduled before.
/// Aircraft that end up with a different slot are marked rescheduled.
pub fn resequence_queue(
    fleet:  &mut [Aircraft],
    queue:  &[AircraftId],
    window: ClosureWindow,
    runway: &mut RunwayLedger,
) -> SimResult<()> {
    let mut previous: Vec<(AircraftId, Option<Tick>)> = Vec::new();
    for &id in queue {
        let ac = &mut fleet[id.index()];
        let waiting = ac.phase == Phase::AttemptingLanding
            && ac.slot.is_none_or(|s| s >= window.start);
        if !waiting {
            continue;
        }
        let old = ac.slot.take();
        if let Some(slot) = old {
            if runway.claim_holder(slot) == Some(id) {
                runway.release(slot, id)?;
            }
        }
        previous.push((id, old));
    }

    let mut floor = window.end;
    for (id, old) in previous {
        let ac = &mut fleet[id.index()];
        let from = not_before(ac, floor);
        if let Some(slot) = runway.next_free_slot(from) {
            assign_slot(ac, slot, runway)?;
            floor = slot.next();
        }
        if ac.slot != old {
            ac.closure_rescheduled = true;
            debug!(
                aircraft = %ac.id,
                from     = old.map(|t| t.0),
                to       = ac.slot.map(|t| t.0),
                "landing slot resequenced after closure"
            );
        }
    }
    Ok(())
}

/// Divert an aircraft that is still airborne when the run ends.
pub fn force_divert(
    ac:      &mut Aircraft,
    horizon: Tick,
    runway:  &mut RunwayLedger,
    out:     &mut Vec<Transition>,
) -> SimResult<()> {
    if let Some(slot) = ac.slot.take() {
        if runway.claim_holder(slot) == Some(ac.id) {
            runway.release(slot, ac.id)?;
        }
    }
    divert(ac, DiversionReason::Horizon, horizon, out);
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn move_to(ac: &mut Aircraft, to: Phase, now: Tick, out: &mut Vec<Transition>) {
    out.push(Transition { tick: now, aircraft: ac.id, from: ac.phase, to });
    ac.phase = to;
}

fn divert(ac: &mut Aircraft, reason: DiversionReason, now: Tick, out: &mut Vec<Transition>) {
    ac.diversion = Some(Diversion { at: now, reason });
    debug!(aircraft = %ac.id, tick = now.0, %reason, "diverted");
    move_to(ac, Phase::Diverted, now, out);
}

/// Earliest tick `ac` may be offered: `from`, or its last slot if later.
fn not_before(ac: &Aircraft, from: Tick) -> Tick {
    ac.last_slot.map_or(from, |s| s.max(from))
}

/// Claim `tick` for `ac`.  A landing schedule only ever moves later.
fn assign_slot(ac: &mut Aircraft, tick: Tick, runway: &mut RunwayLedger) -> SimResult<()> {
    if let Some(previous) = ac.last_slot {
        if tick < previous {
            return Err(SimError::SlotRegression { aircraft: ac.id, previous, proposed: tick });
        }
    }
    runway.claim(tick, ac.id)?;
    ac.slot = Some(tick);
    ac.last_slot = Some(tick);
    ac.first_slot.get_or_insert(tick);
    Ok(())
}
