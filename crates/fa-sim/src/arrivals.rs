//! Per-tick arrival counts.

use fa_core::{ArrivalProcess, ConfigError, SimRng};
use rand_distr::Poisson;

use crate::SimResult;

/// Draws how many aircraft join final approach in one tick.
///
/// A rate of zero never touches the RNG.
#[derive(Clone, Debug)]
pub struct ArrivalGenerator {
    process: ArrivalProcess,
    rate:    f64,
    poisson: Option<Poisson<f64>>,
}

impl ArrivalGenerator {
    pub fn new(process: ArrivalProcess, rate: f64) -> SimResult<Self> {
        if !rate.is_finite() || rate < 0.0 {
            return Err(ConfigError::InvalidArrivalRate(rate).into());
        }
        let poisson = match process {
            ArrivalProcess::Poisson if rate > 0.0 => Some(
                Poisson::new(rate).map_err(|_| ConfigError::InvalidArrivalRate(rate))?,
            ),
            _ => None,
        };
        Ok(Self { process, rate, poisson })
    }

    pub fn sample(&self, rng: &mut SimRng) -> u64 {
        if self.rate == 0.0 {
            return 0;
        }
        match self.process {
            ArrivalProcess::Poisson => self.poisson.as_ref().map_or(0, |d| rng.poisson(d)),
            ArrivalProcess::Bernoulli => u64::from(rng.gen_bool(self.rate)),
        }
    }
}
