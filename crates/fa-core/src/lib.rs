//! `fa-core` — foundational types for the final-approach simulator.
//!
//! This crate is a dependency of every other `fa-*` crate.  It has no `fa-*`
//! dependencies and minimal external ones (`rand`, `rand_distr` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AircraftId`                                          |
//! | [`time`]        | `Tick`, `SimClock`, `parse_hhmm`                      |
//! | [`rng`]         | `SimRng` (the single seeded generator of a run)       |
//! | [`config`]      | `RunConfig`, `ClosureSpec`, `ReentryPolicy`, …        |
//! | [`error`]       | `ConfigError`, `ConfigResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ArrivalProcess, ClosureSpec, ReentryPolicy, RunConfig};
pub use error::{ConfigError, ConfigResult};
pub use ids::AircraftId;
pub use rng::SimRng;
pub use time::{SimClock, TICKS_PER_HOUR, Tick, parse_hhmm};
