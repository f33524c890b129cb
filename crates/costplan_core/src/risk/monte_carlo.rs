//! Monte Carlo simulation over declared random variables and an outcome
//! formula.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::error::{InputError, SimulationError};
use crate::model::{
    Histogram, HistogramBin, MonteCarloReport, RandomVariable, RiskStatistics,
};
use crate::stats;

use super::formula::Expr;

pub const MIN_ITERATIONS: usize = 100;
pub const MAX_ITERATIONS: usize = 100_000;

/// Trials per independently-seeded batch. Batches are the unit of
/// parallelism and of reproducibility: batch i always derives its random
/// stream from `seed + i`, so a run is deterministic regardless of how
/// batches are scheduled across threads.
const MAX_BATCH_SIZE: usize = 100;

/// Monte Carlo run parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    pub iterations: usize,
    /// Level for the empirical confidence interval, in (0, 1)
    pub confidence_level: f64,
    pub histogram_bins: usize,
    /// Base seed; identical seeds reproduce identical outcome sequences
    pub seed: u64,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            confidence_level: 0.95,
            histogram_bins: 20,
            seed: 0,
        }
    }
}

impl MonteCarloConfig {
    fn validate(&self) -> Result<(), InputError> {
        if self.iterations < MIN_ITERATIONS || self.iterations > MAX_ITERATIONS {
            return Err(InputError::IterationsOutOfRange {
                requested: self.iterations,
                min: MIN_ITERATIONS,
                max: MAX_ITERATIONS,
            });
        }
        if self.confidence_level <= 0.0 || self.confidence_level >= 1.0 {
            return Err(InputError::ConfidenceLevelOutOfRange(self.confidence_level));
        }
        if self.histogram_bins == 0 {
            return Err(InputError::NoHistogramBins);
        }
        Ok(())
    }
}

/// Run the simulation.
///
/// Every declared variable is validated and the formula is parsed and
/// bound against the declarations before the first trial, so a bad setup
/// fails the whole run up front. Formula evaluation is fail-fast: a trial
/// producing a non-finite value aborts the run with the trial index
/// rather than silently corrupting the statistics.
pub fn monte_carlo(
    variables: &FxHashMap<String, RandomVariable>,
    formula: &str,
    config: &MonteCarloConfig,
) -> Result<MonteCarloReport, SimulationError> {
    config.validate()?;

    let expr = Expr::parse(formula).map_err(|error| SimulationError::Formula {
        trial: None,
        error,
    })?;

    // Bind the formula against the declared variables before running
    let mut referenced = FxHashSet::default();
    expr.collect_variables(&mut referenced);
    for name in &referenced {
        if !variables.contains_key(*name) {
            return Err(SimulationError::Formula {
                trial: None,
                error: crate::error::FormulaError::UnknownVariable((*name).to_string()),
            });
        }
    }

    for variable in variables.values() {
        variable.validate()?;
    }

    // Sort names so HashMap iteration order cannot perturb the sample
    // sequence of a seeded run
    let mut names: Vec<&str> = variables.keys().map(String::as_str).collect();
    names.sort_unstable();
    let ordered: Vec<(&str, &RandomVariable)> =
        names.iter().map(|name| (*name, &variables[*name])).collect();

    let mut outcomes = run_trials(&ordered, &expr, config)?;
    outcomes.sort_by(f64::total_cmp);

    Ok(summarize(&outcomes, config))
}

fn run_batch(
    batch_index: usize,
    batch_size: usize,
    ordered: &[(&str, &RandomVariable)],
    expr: &Expr,
    config: &MonteCarloConfig,
) -> Result<Vec<f64>, SimulationError> {
    let mut rng = SmallRng::seed_from_u64(config.seed.wrapping_add(batch_index as u64));
    let mut values: FxHashMap<&str, f64> = FxHashMap::default();
    let mut outcomes = Vec::with_capacity(batch_size);

    for j in 0..batch_size {
        let trial = batch_index * MAX_BATCH_SIZE + j;
        for (name, variable) in ordered {
            values.insert(*name, variable.sample(&mut rng)?);
        }
        let outcome = expr.eval(&values).map_err(|error| SimulationError::Formula {
            trial: Some(trial),
            error,
        })?;
        if !outcome.is_finite() {
            return Err(SimulationError::Formula {
                trial: Some(trial),
                error: crate::error::FormulaError::NonFiniteResult,
            });
        }
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

#[cfg(feature = "parallel")]
fn run_trials(
    ordered: &[(&str, &RandomVariable)],
    expr: &Expr,
    config: &MonteCarloConfig,
) -> Result<Vec<f64>, SimulationError> {
    let num_batches = config.iterations.div_ceil(MAX_BATCH_SIZE);

    let batches: Result<Vec<Vec<f64>>, SimulationError> = (0..num_batches)
        .into_par_iter()
        .map(|i| {
            let batch_size = if i == num_batches - 1 {
                config.iterations - i * MAX_BATCH_SIZE
            } else {
                MAX_BATCH_SIZE
            };
            run_batch(i, batch_size, ordered, expr, config)
        })
        .collect();

    Ok(batches?.into_iter().flatten().collect())
}

#[cfg(not(feature = "parallel"))]
fn run_trials(
    ordered: &[(&str, &RandomVariable)],
    expr: &Expr,
    config: &MonteCarloConfig,
) -> Result<Vec<f64>, SimulationError> {
    let num_batches = config.iterations.div_ceil(MAX_BATCH_SIZE);
    let mut outcomes = Vec::with_capacity(config.iterations);

    for i in 0..num_batches {
        let batch_size = if i == num_batches - 1 {
            config.iterations - i * MAX_BATCH_SIZE
        } else {
            MAX_BATCH_SIZE
        };
        outcomes.extend(run_batch(i, batch_size, ordered, expr, config)?);
    }

    Ok(outcomes)
}

/// Derive the report from sorted outcomes
fn summarize(sorted: &[f64], config: &MonteCarloConfig) -> MonteCarloReport {
    let n = sorted.len();
    let mean = stats::mean(sorted);
    let median = stats::median_sorted(sorted);
    let std_dev = stats::population_std_dev(sorted);
    let min = sorted[0];
    let max = sorted[n - 1];

    // Empirical interval from order statistics
    let alpha = 1.0 - config.confidence_level;
    let low_index = ((n as f64 * alpha / 2.0).floor() as usize).min(n - 1);
    let high_index = ((n as f64 * (1.0 - alpha / 2.0)).floor() as usize).min(n - 1);

    let probability_of_loss =
        sorted.iter().take_while(|x| **x < 0.0).count() as f64 / n as f64;

    let var_index = ((n as f64 * 0.05).floor() as usize).min(n - 1);
    let value_at_risk = sorted[var_index];
    let tail: Vec<f64> = sorted
        .iter()
        .copied()
        .take_while(|x| *x <= value_at_risk)
        .collect();
    let conditional_value_at_risk = stats::mean(&tail);

    MonteCarloReport {
        stats: RiskStatistics {
            iterations: n,
            mean,
            median,
            std_dev,
            min,
            max,
            confidence_level: config.confidence_level,
            confidence_interval: (sorted[low_index], sorted[high_index]),
            probability_of_loss,
            value_at_risk,
            conditional_value_at_risk,
        },
        histogram: build_histogram(sorted, config.histogram_bins),
    }
}

/// Equal-width bins spanning min..max; the last bin includes the maximum.
/// A constant outcome set collapses to a single bin.
fn build_histogram(sorted: &[f64], bins: usize) -> Histogram {
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];

    if min == max {
        return Histogram {
            bins: vec![HistogramBin {
                lower: min,
                upper: max,
                count: sorted.len(),
            }],
        };
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for x in sorted {
        let index = (((x - min) / width).floor() as usize).min(bins - 1);
        counts[index] += 1;
    }

    Histogram {
        bins: counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                lower: min + width * i as f64,
                upper: min + width * (i + 1) as f64,
                count,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormulaError;

    fn normal_variable(mean: f64, std_dev: f64) -> FxHashMap<String, RandomVariable> {
        let mut variables = FxHashMap::default();
        variables.insert("x".to_string(), RandomVariable::Normal { mean, std_dev });
        variables
    }

    #[test]
    fn test_standard_normal_statistics() {
        let config = MonteCarloConfig {
            iterations: 10_000,
            ..Default::default()
        };
        let report = monte_carlo(&normal_variable(0.0, 1.0), "x", &config).unwrap();
        // Statistical tolerance, not exact equality
        assert!(report.stats.mean.abs() < 0.05);
        assert!((report.stats.std_dev - 1.0).abs() < 0.05);
        assert!((report.stats.probability_of_loss - 0.5).abs() < 0.02);
        assert!((report.stats.median).abs() < 0.05);
        assert_eq!(report.stats.iterations, 10_000);
        assert_eq!(report.histogram.total_count(), 10_000);
    }

    #[test]
    fn test_same_seed_reproduces_run() {
        let config = MonteCarloConfig {
            iterations: 1_000,
            seed: 99,
            ..Default::default()
        };
        let variables = normal_variable(5.0, 2.0);
        let a = monte_carlo(&variables, "x * 2 + 1", &config).unwrap();
        let b = monte_carlo(&variables, "x * 2 + 1", &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_var_orders_below_mean_for_symmetric_loss() {
        let config = MonteCarloConfig {
            iterations: 10_000,
            ..Default::default()
        };
        let report = monte_carlo(&normal_variable(0.0, 1.0), "x", &config).unwrap();
        // 5th percentile of a standard normal is about -1.645, and the
        // conditional tail mean sits further out
        assert!((report.stats.value_at_risk + 1.645).abs() < 0.1);
        assert!(report.stats.conditional_value_at_risk < report.stats.value_at_risk);
    }

    #[test]
    fn test_undeclared_variable_fails_before_trials() {
        let config = MonteCarloConfig {
            iterations: 1_000,
            ..Default::default()
        };
        let result = monte_carlo(&normal_variable(0.0, 1.0), "x + y", &config);
        assert!(matches!(
            result,
            Err(SimulationError::Formula {
                trial: None,
                error: FormulaError::UnknownVariable(_)
            })
        ));
    }

    #[test]
    fn test_non_finite_outcome_aborts_run() {
        let mut variables = FxHashMap::default();
        variables.insert(
            "x".to_string(),
            RandomVariable::Uniform {
                low: 1.0,
                high: 2.0,
            },
        );
        let config = MonteCarloConfig {
            iterations: 1_000,
            ..Default::default()
        };
        // x is always positive, so x/0 is +infinity on the first trial
        let result = monte_carlo(&variables, "x / 0", &config);
        assert!(matches!(
            result,
            Err(SimulationError::Formula {
                trial: Some(_),
                error: FormulaError::NonFiniteResult
            })
        ));
    }

    #[test]
    fn test_iteration_bounds_enforced() {
        let config = MonteCarloConfig {
            iterations: 10,
            ..Default::default()
        };
        assert!(matches!(
            monte_carlo(&normal_variable(0.0, 1.0), "x", &config),
            Err(SimulationError::Input(InputError::IterationsOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_invalid_distribution_rejected_up_front() {
        let mut variables = FxHashMap::default();
        variables.insert(
            "x".to_string(),
            RandomVariable::Normal {
                mean: 0.0,
                std_dev: -1.0,
            },
        );
        let config = MonteCarloConfig {
            iterations: 1_000,
            ..Default::default()
        };
        assert!(matches!(
            monte_carlo(&variables, "x", &config),
            Err(SimulationError::Distribution(_))
        ));
    }

    #[test]
    fn test_constant_formula_collapses_histogram() {
        let config = MonteCarloConfig {
            iterations: 500,
            ..Default::default()
        };
        let report = monte_carlo(&FxHashMap::default(), "3 + 4", &config).unwrap();
        assert_eq!(report.stats.mean, 7.0);
        assert_eq!(report.stats.std_dev, 0.0);
        assert_eq!(report.histogram.bins.len(), 1);
        assert_eq!(report.histogram.bins[0].count, 500);
    }

    #[test]
    fn test_triangular_outcomes_respect_bounds() {
        let mut variables = FxHashMap::default();
        variables.insert(
            "t".to_string(),
            RandomVariable::Triangular {
                low: 10.0,
                mode: 20.0,
                high: 40.0,
            },
        );
        let config = MonteCarloConfig {
            iterations: 2_000,
            ..Default::default()
        };
        let report = monte_carlo(&variables, "t", &config).unwrap();
        assert!(report.stats.min >= 10.0);
        assert!(report.stats.max <= 40.0);
        // Triangular mean is (low + mode + high) / 3
        assert!((report.stats.mean - 70.0 / 3.0).abs() < 0.5);
        assert_eq!(report.stats.probability_of_loss, 0.0);
    }
}
