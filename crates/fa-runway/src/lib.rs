//! `fa-runway` — the single shared runway resource.
//!
//! # Model
//!
//! The runway accepts at most one landing per tick.  [`RunwayLedger`] keeps
//! two kinds of occupancy:
//!
//! - **commits** — ticks at which an aircraft actually landed.  Strictly
//!   increasing, never removed.
//! - **claims** — future ticks held by airborne aircraft (a queued aircraft's
//!   landing slot, or the start of a holding aircraft's reentry gap).  A claim
//!   turns into a commit when the aircraft lands.  A go-around aborts it:
//!   the tick is spent and stays occupied.  A closure invalidation or a
//!   diversion releases it.
//!
//! Slot and gap searches treat both as occupied, so two aircraft can never
//! be scheduled onto the same tick.
//!
//! [`ClosureSchedule`] holds the configured closure windows.  A window is a
//! surprise: searches ignore it until its start tick, when
//! [`RunwayLedger::activate_closures`] makes it known and returns the claims
//! it invalidated.

pub mod closure;
pub mod error;
pub mod ledger;

#[cfg(test)]
mod tests;

pub use closure::{ClosureSchedule, ClosureWindow};
pub use error::{LedgerError, LedgerResult};
pub use ledger::{ClosureActivation, RunwayLedger};
