//! Monte Carlo sweeps over arrival rates.
//!
//! Replication `i` of a sweep point runs the base configuration with
//! `seed = base.seed + i`, so a sweep is reproducible from its base seed and
//! replication `i` of one λ is paired with replication `i` of every other.
//!
//! With the `parallel` feature, replications run on Rayon's thread pool.
//! Each replication owns its `Sim`, and results are collected in replication
//! order, so the output does not depend on the feature.

use fa_core::{RunConfig, SimRng};
use tracing::info;

use crate::metrics::Metrics;
use crate::{SimResult, run_simulation};

// ── Estimate ──────────────────────────────────────────────────────────────────

/// Sample mean with a normal-approximation 95 % confidence half-width.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Estimate {
    pub mean:       f64,
    pub half_width: f64,
    pub samples:    usize,
}

impl Estimate {
    pub const Z_95: f64 = 1.96;

    /// Mean and `1.96 · s / √n` with the sample standard deviation.  The
    /// half-width is zero below two samples; an empty input gives all zeros.
    pub fn from_samples(xs: &[f64]) -> Self {
        let n = xs.len();
        if n == 0 {
            return Self::default();
        }
        let mean = xs.iter().sum::<f64>() / n as f64;
        let half_width = if n < 2 {
            0.0
        } else {
            let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            Self::Z_95 * var.sqrt() / (n as f64).sqrt()
        };
        Self { mean, half_width, samples: n }
    }

    pub fn lower(&self) -> f64 {
        self.mean - self.half_width
    }

    pub fn upper(&self) -> f64 {
        self.mean + self.half_width
    }
}

// ── SweepPoint ────────────────────────────────────────────────────────────────

/// Aggregated replications at one arrival rate.
///
/// `mean_delay` only samples runs in which something landed, and
/// `diversion_rate` and `congestion_rate` only runs in which something
/// arrived.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepPoint {
    pub arrival_rate:    f64,
    pub replications:    u32,
    pub arrivals:        Estimate,
    pub landings:        Estimate,
    pub diversions:      Estimate,
    pub diversion_rate:  Estimate,
    pub mean_delay:      Estimate,
    pub go_arounds:      Estimate,
    pub congestion_rate: Estimate,
}

impl SweepPoint {
    pub fn from_runs(arrival_rate: f64, runs: &[Metrics]) -> Self {
        let collect = |f: fn(&Metrics) -> f64| runs.iter().map(f).collect::<Vec<f64>>();
        let arrived: Vec<&Metrics> = runs.iter().filter(|m| m.arrivals > 0).collect();
        let landed: Vec<f64> = runs
            .iter()
            .filter(|m| m.landings > 0)
            .map(Metrics::mean_delay)
            .collect();

        Self {
            arrival_rate,
            replications:    runs.len() as u32,
            arrivals:        Estimate::from_samples(&collect(|m| m.arrivals as f64)),
            landings:        Estimate::from_samples(&collect(|m| m.landings as f64)),
            diversions:      Estimate::from_samples(&collect(|m| m.diversions as f64)),
            go_arounds:      Estimate::from_samples(&collect(|m| m.go_arounds as f64)),
            diversion_rate:  Estimate::from_samples(
                &arrived.iter().map(|m| m.diversion_rate()).collect::<Vec<_>>(),
            ),
            congestion_rate: Estimate::from_samples(
                &arrived.iter().map(|m| m.congestion_rate()).collect::<Vec<_>>(),
            ),
            mean_delay:      Estimate::from_samples(&landed),
        }
    }
}

// ── Runners ───────────────────────────────────────────────────────────────────

/// The configuration of replication `index`.
pub fn replication_config(base: &RunConfig, index: u32) -> RunConfig {
    RunConfig {
        seed: SimRng::replication_seed(base.seed, u64::from(index)),
        ..base.clone()
    }
}

/// Run `replications` independent copies of `base` and return their metrics
/// in replication order.
pub fn replicate(base: &RunConfig, replications: u32) -> SimResult<Vec<Metrics>> {
    base.validate()?;

    #[cfg(not(feature = "parallel"))]
    {
        (0..replications)
            .map(|i| run_simulation(replication_config(base, i)).map(|r| r.metrics))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        (0..replications)
            .into_par_iter()
            .map(|i| run_simulation(replication_config(base, i)).map(|r| r.metrics))
            .collect()
    }
}

/// Replicate `base` at each arrival rate in `rates`.
pub fn sweep(base: &RunConfig, rates: &[f64], replications: u32) -> SimResult<Vec<SweepPoint>> {
    rates
        .iter()
        .map(|&rate| {
            let config = RunConfig { arrival_rate: rate, ..base.clone() };
            let runs = replicate(&config, replications)?;
            let point = SweepPoint::from_runs(rate, &runs);
            info!(
                lambda         = rate,
                replications,
                mean_delay     = point.mean_delay.mean,
                diversion_rate = point.diversion_rate.mean,
                "sweep point done"
            );
            Ok(point)
        })
        .collect()
}
