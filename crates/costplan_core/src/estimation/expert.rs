//! Expert/Delphi estimate aggregation.

use crate::error::InputError;
use crate::model::{EstimationResult, ExpertJudgmentEstimate};
use crate::stats;

/// z value for a 95% confidence range
const Z_95: f64 = 1.96;

/// Aggregate a panel of independent estimates.
///
/// Estimates farther than two standard deviations from the mean are
/// dropped before recomputing the filtered mean; when the filter empties
/// the set the unfiltered mean stands in, so a wildly disagreeing panel
/// still produces an answer. A PERT three-point estimate is derived from
/// the sequence min/max and median.
pub fn expert_judgment(estimates: &[f64]) -> Result<EstimationResult, InputError> {
    if estimates.is_empty() {
        return Err(InputError::EmptyEstimates);
    }

    let mean = stats::mean(estimates);
    let median = stats::median(estimates);
    let std_dev = stats::population_std_dev(estimates);

    let filtered: Vec<f64> = estimates
        .iter()
        .copied()
        .filter(|x| (x - mean).abs() <= 2.0 * std_dev)
        .collect();
    let discarded = estimates.len() - filtered.len();
    let filtered_mean = if filtered.is_empty() {
        mean
    } else {
        stats::mean(&filtered)
    };

    let (optimistic, pessimistic) = stats::min_max(estimates);
    let pert_estimate = (optimistic + 4.0 * median + pessimistic) / 6.0;

    // Standard error of the mean over the full panel
    let standard_error = std_dev / (estimates.len() as f64).sqrt();

    Ok(EstimationResult::ExpertJudgment(ExpertJudgmentEstimate {
        mean,
        median,
        std_dev,
        filtered_mean,
        discarded,
        pert_estimate,
        confidence_range: (
            filtered_mean - Z_95 * standard_error,
            filtered_mean + Z_95 * standard_error,
        ),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unwrap_expert(result: EstimationResult) -> ExpertJudgmentEstimate {
        match result {
            EstimationResult::ExpertJudgment(e) => e,
            other => panic!("expected expert judgment estimate, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_panel_rejected() {
        assert_eq!(expert_judgment(&[]), Err(InputError::EmptyEstimates));
    }

    #[test]
    fn test_single_estimate() {
        let est = unwrap_expert(expert_judgment(&[40.0]).unwrap());
        assert_eq!(est.mean, 40.0);
        assert_eq!(est.median, 40.0);
        assert_eq!(est.std_dev, 0.0);
        assert_eq!(est.filtered_mean, 40.0);
        assert_eq!(est.discarded, 0);
        // PERT of a single point is that point
        assert!((est.pert_estimate - 40.0).abs() < 1e-12);
        assert_eq!(est.confidence_range, (40.0, 40.0));
    }

    #[test]
    fn test_outlier_is_dropped() {
        // Panel clustered near 10 with one wild estimate
        let estimates = [9.0, 10.0, 10.0, 11.0, 10.0, 9.5, 10.5, 100.0];
        let est = unwrap_expert(expert_judgment(&estimates).unwrap());
        assert_eq!(est.discarded, 1);
        assert!(est.filtered_mean < est.mean);
        assert!((est.filtered_mean - 10.0).abs() < 0.5);
    }

    #[test]
    fn test_pert_weights_the_median() {
        let estimates = [6.0, 10.0, 20.0];
        let est = unwrap_expert(expert_judgment(&estimates).unwrap());
        // (6 + 4*10 + 20) / 6 = 11
        assert!((est.pert_estimate - 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_uniform_panel_keeps_everything() {
        let estimates = [12.0, 12.0, 12.0];
        let est = unwrap_expert(expert_judgment(&estimates).unwrap());
        assert_eq!(est.discarded, 0);
        assert_eq!(est.filtered_mean, 12.0);
    }
}
