//! Unit tests for fa-runway.

use fa_core::{AircraftId, ClosureSpec, Tick};

use crate::{ClosureSchedule, ClosureWindow, LedgerError, RunwayLedger};

fn ledger(horizon: u64) -> RunwayLedger {
    RunwayLedger::new(Tick(horizon), ClosureSchedule::none())
}

fn ledger_with_closure(horizon: u64, start: u64, duration: u64) -> RunwayLedger {
    let schedule = ClosureSchedule::new(&[ClosureSpec::new(start, duration)]);
    RunwayLedger::new(Tick(horizon), schedule)
}

const A: AircraftId = AircraftId(0);
const B: AircraftId = AircraftId(1);

// ── ClosureWindow / ClosureSchedule ───────────────────────────────────────────

#[cfg(test)]
mod closure_tests {
    use super::*;

    #[test]
    fn window_is_half_open() {
        let w = ClosureWindow::new(Tick(120), Tick(150));
        assert!(!w.contains(Tick(119)));
        assert!(w.contains(Tick(120)));
        assert!(w.contains(Tick(149)));
        assert!(!w.contains(Tick(150)));
        assert_eq!(w.duration(), 30);
    }

    #[test]
    fn overlap_edges() {
        let w = ClosureWindow::new(Tick(120), Tick(150));
        assert!(!w.overlaps(Tick(110), Tick(120)));
        assert!(w.overlaps(Tick(111), Tick(121)));
        assert!(w.overlaps(Tick(149), Tick(159)));
        assert!(!w.overlaps(Tick(150), Tick(160)));
    }

    #[test]
    fn windows_are_hidden_until_start() {
        let mut s = ClosureSchedule::new(&[ClosureSpec::new(50, 10), ClosureSpec::new(20, 5)]);
        assert!(s.known().is_empty());
        assert!(!s.is_known_closed(Tick(22)));

        assert!(s.reveal_due(Tick(19)).is_empty());
        let first = s.reveal_due(Tick(20)).to_vec();
        assert_eq!(first, vec![ClosureWindow::new(Tick(20), Tick(25))]);
        assert!(s.is_known_closed(Tick(22)));
        assert!(!s.is_known_closed(Tick(55)));

        // Already revealed windows are not reported twice.
        assert!(s.reveal_due(Tick(21)).is_empty());
        assert_eq!(s.reveal_due(Tick(50)).len(), 1);
        assert_eq!(s.known_window_at(Tick(59)), Some(ClosureWindow::new(Tick(50), Tick(60))));
        assert_eq!(s.all().len(), 2);
    }
}

// ── Slot search ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod slot_tests {
    use super::*;

    #[test]
    fn empty_runway_gives_requested_tick() {
        let l = ledger(60);
        assert_eq!(l.next_free_slot(Tick(5)), Some(Tick(5)));
    }

    #[test]
    fn skips_claims_and_commits() {
        let mut l = ledger(60);
        l.claim(Tick(5), A).unwrap();
        l.reserve(Tick(5), A).unwrap();
        l.claim(Tick(6), B).unwrap();
        assert_eq!(l.next_free_slot(Tick(5)), Some(Tick(7)));
    }

    #[test]
    fn none_at_horizon() {
        let mut l = ledger(3);
        l.claim(Tick(2), A).unwrap();
        assert_eq!(l.next_free_slot(Tick(2)), None);
        assert_eq!(l.next_free_slot(Tick(3)), None);
    }

    #[test]
    fn unrevealed_closure_does_not_block() {
        let l = ledger_with_closure(300, 120, 30);
        assert_eq!(l.next_free_slot(Tick(125)), Some(Tick(125)));
    }

    #[test]
    fn revealed_closure_blocks() {
        let mut l = ledger_with_closure(300, 120, 30);
        l.activate_closures(Tick(120));
        assert!(l.is_closed_at(Tick(120)));
        assert_eq!(l.next_free_slot(Tick(121)), Some(Tick(150)));
        assert!(!l.is_closed_at(Tick(150)));
    }
}

// ── Gap search ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod gap_tests {
    use super::*;

    #[test]
    fn gap_on_empty_runway_starts_at_from() {
        let l = ledger(100);
        assert_eq!(l.next_free_gap_of_length(10, Tick(4)), Some(Tick(4)));
    }

    #[test]
    fn gap_skips_short_openings() {
        let mut l = ledger(100);
        // Occupied at 10 and 15: the openings 11..15 (4 ticks) and 16.. (open).
        l.claim(Tick(10), A).unwrap();
        l.claim(Tick(15), B).unwrap();
        assert_eq!(l.next_free_gap_of_length(10, Tick(7)), Some(Tick(16)));
        assert_eq!(l.next_free_gap_of_length(3, Tick(7)), Some(Tick(7)));
        assert_eq!(l.next_free_gap_of_length(4, Tick(10)), Some(Tick(11)));
    }

    #[test]
    fn gap_must_fit_before_horizon() {
        let l = ledger(10);
        assert_eq!(l.next_free_gap_of_length(10, Tick(0)), Some(Tick(0)));
        assert_eq!(l.next_free_gap_of_length(10, Tick(1)), None);
        assert_eq!(l.next_free_gap_of_length(3, Tick(7)), Some(Tick(7)));
        assert_eq!(l.next_free_gap_of_length(3, Tick(8)), None);
    }

    #[test]
    fn gap_avoids_known_closure() {
        let mut l = ledger_with_closure(300, 120, 30);
        l.activate_closures(Tick(120));
        assert_eq!(l.next_free_gap_of_length(10, Tick(115)), Some(Tick(150)));
        // A gap ending exactly at the closure start is fine.
        assert_eq!(l.next_free_gap_of_length(10, Tick(110)), Some(Tick(110)));
    }
}

// ── Claims and reservations ───────────────────────────────────────────────────

#[cfg(test)]
mod reservation_tests {
    use super::*;

    #[test]
    fn claim_conflict_is_reported() {
        let mut l = ledger(60);
        l.claim(Tick(3), A).unwrap();
        assert_eq!(l.claim(Tick(3), B), Err(LedgerError::SlotTaken { tick: Tick(3), holder: A }));
        assert_eq!(l.claim_holder(Tick(3)), Some(A));
    }

    #[test]
    fn release_requires_ownership() {
        let mut l = ledger(60);
        l.claim(Tick(3), A).unwrap();
        assert_eq!(l.release(Tick(3), B), Err(LedgerError::NotClaimed { tick: Tick(3), aircraft: B }));
        l.release(Tick(3), A).unwrap();
        assert_eq!(l.claim_count(), 0);
        assert!(l.is_open(Tick(3)));
    }

    #[test]
    fn reserve_converts_claim_to_commit() {
        let mut l = ledger(60);
        l.claim(Tick(3), A).unwrap();
        l.reserve(Tick(3), A).unwrap();
        assert_eq!(l.committed(), &[Tick(3)]);
        assert_eq!(l.claim_holder(Tick(3)), None);
        assert!(l.is_committed(Tick(3)));
    }

    #[test]
    fn double_reservation_is_fatal() {
        let mut l = ledger(60);
        l.claim(Tick(3), A).unwrap();
        l.reserve(Tick(3), A).unwrap();
        assert_eq!(l.reserve(Tick(3), B), Err(LedgerError::DoubleReservation { tick: Tick(3) }));
        assert_eq!(l.claim(Tick(3), B), Err(LedgerError::DoubleReservation { tick: Tick(3) }));
    }

    #[test]
    fn aborted_tick_stays_occupied() {
        let mut l = ledger(60);
        l.claim(Tick(3), A).unwrap();
        l.abort(Tick(3), A).unwrap();
        assert_eq!(l.aborted(), &[Tick(3)]);
        assert!(l.committed().is_empty());
        assert!(!l.is_open(Tick(3)));
        assert_eq!(l.next_free_slot(Tick(3)), Some(Tick(4)));
        assert!(l.abort(Tick(3), A).is_err());
    }

    #[test]
    fn unclaimed_reserve_is_fatal() {
        let mut l = ledger(60);
        assert_eq!(l.reserve(Tick(3), A), Err(LedgerError::NotClaimed { tick: Tick(3), aircraft: A }));
    }

    #[test]
    fn out_of_order_commit_is_fatal() {
        let mut l = ledger(60);
        l.claim(Tick(2), A).unwrap();
        l.claim(Tick(5), B).unwrap();
        l.reserve(Tick(5), B).unwrap();
        assert_eq!(
            l.reserve(Tick(2), A),
            Err(LedgerError::OutOfOrder { tick: Tick(2), last: Tick(5) })
        );
    }

    #[test]
    fn nothing_books_beyond_horizon() {
        let mut l = ledger(10);
        assert_eq!(
            l.claim(Tick(10), A),
            Err(LedgerError::BeyondHorizon { tick: Tick(10), horizon: Tick(10) })
        );
    }

    #[test]
    fn closure_rejects_booking_once_revealed() {
        let mut l = ledger_with_closure(300, 120, 30);
        l.activate_closures(Tick(120));
        assert_eq!(l.claim(Tick(130), A), Err(LedgerError::InsideClosure { tick: Tick(130) }));
    }

    #[test]
    fn activation_releases_claims_inside_window_only() {
        let mut l = ledger_with_closure(300, 120, 30);
        l.claim(Tick(119), A).unwrap();
        l.reserve(Tick(119), A).unwrap();
        l.claim(Tick(121), A).unwrap();
        l.claim(Tick(149), B).unwrap();
        l.claim(Tick(150), AircraftId(2)).unwrap();

        let activations = l.activate_closures(Tick(120));
        assert_eq!(activations.len(), 1);
        assert_eq!(activations[0].window, ClosureWindow::new(Tick(120), Tick(150)));
        assert_eq!(activations[0].invalidated, vec![(Tick(121), A), (Tick(149), B)]);

        assert_eq!(l.committed(), &[Tick(119)]);
        assert_eq!(l.claim_holder(Tick(150)), Some(AircraftId(2)));
        assert_eq!(l.claim_count(), 1);
    }
}
