//! `fa-sim` — tick loop and per-aircraft state machine for the final-approach
//! simulator.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.horizon_ticks:
//!   ① Closures   : windows starting now become known; claims inside them
//!                  are released; holding aircraft whose gap overlaps
//!                  return to SearchingGap.
//!   ② Arrivals   : one draw from the arrival process; new aircraft start
//!                  Approaching.
//!   ③ Evaluate   : every airborne aircraft in ascending AircraftId order:
//!                    Approaching        → AttemptingLanding (unless closed)
//!                    AttemptingLanding  → claim slot; at the slot tick land
//!                                         or go around
//!                    GoAround           → SearchingGap
//!                    SearchingGap       → Holding (gap found) | Diverted
//!                    Holding            → AttemptingLanding at the gap start
//!   ④ Sample     : queue length and holding count at end of tick.
//! after the last tick:
//!   aircraft still airborne → Diverted (Horizon)
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs sweep replications on Rayon's thread pool.        |
//! | `serde`    | `Serialize`/`Deserialize` on results and records.      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fa_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(0.3).horizon_hours(4).windy(true).build()?;
//! let result = sim.run(&mut NoopObserver)?;
//! println!("mean delay {:.1} min", result.metrics.mean_delay());
//! ```

pub mod aircraft;
pub mod arrivals;
pub mod builder;
pub mod error;
pub mod machine;
pub mod metrics;
pub mod observer;
pub mod sim;
pub mod sweep;


pub use aircraft::{Aircraft, Diversion, DiversionReason, Phase, Transition};
pub use arrivals::ArrivalGenerator;
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use metrics::{AircraftRecord, Metrics, MetricsCollector, TickSample};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{RunResult, Sim, run_simulation};
pub use sweep::{Estimate, SweepPoint, replicate, sweep};
