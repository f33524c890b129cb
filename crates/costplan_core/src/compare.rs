//! Comparison/aggregation over heterogeneous results.

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::model::{EstimationResult, InvestmentAppraisal};
use crate::stats;

/// Aggregate statistics over a set of compared results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// max - min
    pub spread: f64,
    /// The headline value extracted from each result, in input order
    pub values: Vec<f64>,
}

fn summarize(values: Vec<f64>) -> Result<ComparisonSummary, InputError> {
    if values.is_empty() {
        return Err(InputError::EmptyComparison);
    }
    let (min, max) = stats::min_max(&values);
    Ok(ComparisonSummary {
        count: values.len(),
        mean: stats::mean(&values),
        median: stats::median(&values),
        std_dev: stats::population_std_dev(&values),
        min,
        max,
        spread: max - min,
        values,
    })
}

/// Compare estimation results by their headline magnitudes.
///
/// Units follow each producing model; callers compare like with like.
pub fn compare_estimates(results: &[EstimationResult]) -> Result<ComparisonSummary, InputError> {
    summarize(results.iter().map(EstimationResult::headline_value).collect())
}

/// Compare scenario appraisals by net present value
pub fn compare_appraisals(
    appraisals: &[InvestmentAppraisal],
) -> Result<ComparisonSummary, InputError> {
    summarize(appraisals.iter().map(|a| a.npv.npv).collect())
}
