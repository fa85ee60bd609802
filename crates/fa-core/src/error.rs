//! Configuration error type.
//!
//! Every variant is raised before a run starts.  Values are never clamped
//! into range; a bad sweep point fails loudly instead of producing metrics
//! for a different experiment than the one requested.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("arrival rate must be finite and >= 0, got {0}")]
    InvalidArrivalRate(f64),

    #[error("bernoulli arrivals need a per-minute probability <= 1, got {0}")]
    BernoulliRateAboveOne(f64),

    #[error("horizon must be at least one tick")]
    ZeroHorizon,

    #[error("horizon of {ticks} ticks exceeds the {max}-tick limit")]
    HorizonTooLong { ticks: u64, max: u64 },

    #[error("day start must be a minute of the day (< 1440), got {0}")]
    InvalidDayStart(u64),

    #[error("go-around probability must lie in [0, 1], got {0}")]
    InvalidProbability(f64),

    #[error("reentry gap must be at least one tick")]
    ZeroGap,

    #[error("closure starting at tick {start} has zero duration")]
    EmptyClosure { start: u64 },

    #[error("closure starting at tick {start} with duration {duration} ends past the last representable tick")]
    ClosureOverflow { start: u64, duration: u64 },

    #[error("closure starting at tick {start} lies outside the {horizon}-tick horizon")]
    ClosureOutsideHorizon { start: u64, horizon: u64 },

    #[error("closures [{first_start}, {first_end}) and [{second_start}, {second_end}) overlap")]
    OverlappingClosures {
        first_start:  u64,
        first_end:    u64,
        second_start: u64,
        second_end:   u64,
    },

    #[error("malformed closure time {0:?}: expected HH:MM")]
    MalformedClockTime(String),

    #[error("closure at {time} falls before the day start {day_start}")]
    ClosureBeforeDayStart { time: String, day_start: String },
}

/// Shorthand result type for configuration handling.
pub type ConfigResult<T> = Result<T, ConfigError>;
