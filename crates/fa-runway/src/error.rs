use fa_core::{AircraftId, Tick};
use thiserror::Error;

/// Ledger invariant violations.  Every variant indicates an engine bug.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("tick {tick} already hosts a landing")]
    DoubleReservation { tick: Tick },

    #[error("landing at {tick} would precede the last committed landing at {last}")]
    OutOfOrder { tick: Tick, last: Tick },

    #[error("tick {tick} lies inside an active closure")]
    InsideClosure { tick: Tick },

    #[error("tick {tick} is already claimed by {holder}")]
    SlotTaken { tick: Tick, holder: AircraftId },

    #[error("{aircraft} holds no claim on tick {tick}")]
    NotClaimed { tick: Tick, aircraft: AircraftId },

    #[error("tick {tick} lies beyond the horizon {horizon}")]
    BeyondHorizon { tick: Tick, horizon: Tick },
}

pub type LedgerResult<T> = Result<T, LedgerError>;
