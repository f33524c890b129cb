use rand::{Rng, distr::Distribution};
use serde::{Deserialize, Serialize};

use crate::error::DistributionError;

/// Probability distribution for one Monte Carlo input variable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RandomVariable {
    Normal { mean: f64, std_dev: f64 },
    Uniform { low: f64, high: f64 },
    Triangular { low: f64, mode: f64, high: f64 },
}

impl RandomVariable {
    /// Check parameters without drawing a sample.
    ///
    /// The Monte Carlo engine calls this once per variable before starting
    /// any trials, so a bad declaration fails the run up front instead of
    /// mid-simulation.
    pub fn validate(&self) -> Result<(), DistributionError> {
        match self {
            RandomVariable::Normal { mean, std_dev } => {
                rand_distr::Normal::new(*mean, *std_dev).map(|_| ()).map_err(|_| {
                    DistributionError::InvalidParameters {
                        distribution: "Normal",
                        reason: "std_dev must be non-negative and finite",
                    }
                })
            }
            RandomVariable::Uniform { low, high } => {
                rand::distr::Uniform::new_inclusive(*low, *high)
                    .map(|_| ())
                    .map_err(|_| DistributionError::InvalidParameters {
                        distribution: "Uniform",
                        reason: "bounds must be finite with low <= high",
                    })
            }
            RandomVariable::Triangular { low, mode, high } => {
                rand_distr::Triangular::new(*low, *high, *mode)
                    .map(|_| ())
                    .map_err(|_| DistributionError::InvalidParameters {
                        distribution: "Triangular",
                        reason: "bounds must be finite with low <= mode <= high and low < high",
                    })
            }
        }
    }

    /// Draw one value
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64, DistributionError> {
        match self {
            RandomVariable::Normal { mean, std_dev } => rand_distr::Normal::new(*mean, *std_dev)
                .map(|d| d.sample(rng))
                .map_err(|_| DistributionError::InvalidParameters {
                    distribution: "Normal",
                    reason: "std_dev must be non-negative and finite",
                }),
            RandomVariable::Uniform { low, high } => {
                rand::distr::Uniform::new_inclusive(*low, *high)
                    .map(|d| d.sample(rng))
                    .map_err(|_| DistributionError::InvalidParameters {
                        distribution: "Uniform",
                        reason: "bounds must be finite with low <= high",
                    })
            }
            RandomVariable::Triangular { low, mode, high } => {
                rand_distr::Triangular::new(*low, *high, *mode)
                    .map(|d| d.sample(rng))
                    .map_err(|_| DistributionError::InvalidParameters {
                        distribution: "Triangular",
                        reason: "bounds must be finite with low <= mode <= high and low < high",
                    })
            }
        }
    }
}
