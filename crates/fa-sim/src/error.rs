use fa_core::{AircraftId, ConfigError, Tick};
use fa_runway::LedgerError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("invalid run configuration: {0}")]
    Config(#[from] ConfigError),

    /// A runway booking broke a ledger invariant.  Always a bug in the tick
    /// loop or the state machine, never a property of the input.
    #[error("runway invariant violated: {0}")]
    InvariantViolation(#[from] LedgerError),

    #[error("{aircraft} rescheduled from {previous} back to {proposed}")]
    SlotRegression {
        aircraft: AircraftId,
        previous: Tick,
        proposed: Tick,
    },

    #[error("more than {} aircraft in one run", u32::MAX)]
    FleetOverflow,
}

pub type SimResult<T> = Result<T, SimError>;
