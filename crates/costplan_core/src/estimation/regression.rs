//! Linear regression over historical (size, effort) pairs.

use crate::error::{InputError, RegressionError};
use crate::model::{EstimationResult, RegressionEstimate};
use crate::stats;

const Z_95: f64 = 1.96;

/// Fit effort = slope * size + intercept by ordinary least squares and
/// predict the effort for a target size.
///
/// Reports the Pearson correlation, R², and the standard error of the
/// estimate sqrt(SSres / (n - 2)); a two-point fit is exact, so its
/// standard error is defined as zero. The 95% band is the prediction
/// ± 1.96 standard errors.
pub fn regression_estimate(
    history: &[(f64, f64)],
    target_size: f64,
) -> Result<EstimationResult, RegressionError> {
    let n = history.len();
    if n < 2 {
        return Err(InputError::InsufficientHistory {
            required: 2,
            actual: n,
        }
        .into());
    }

    let sizes: Vec<f64> = history.iter().map(|(size, _)| *size).collect();
    let efforts: Vec<f64> = history.iter().map(|(_, effort)| *effort).collect();

    let fit = stats::linear_fit(&sizes, &efforts).ok_or(RegressionError::ZeroSizeVariance)?;

    let correlation = pearson(&sizes, &efforts);
    let r_squared = correlation * correlation;

    let residual_sum_squares: f64 = history
        .iter()
        .map(|(size, effort)| {
            let predicted = fit.intercept + fit.slope * size;
            (effort - predicted).powi(2)
        })
        .sum();
    let standard_error = if n == 2 {
        0.0
    } else {
        (residual_sum_squares / (n - 2) as f64).sqrt()
    };

    let predicted_effort = fit.intercept + fit.slope * target_size;

    Ok(EstimationResult::Regression(RegressionEstimate {
        slope: fit.slope,
        intercept: fit.intercept,
        predicted_effort,
        correlation,
        r_squared,
        standard_error,
        confidence_interval: (
            predicted_effort - Z_95 * standard_error,
            predicted_effort + Z_95 * standard_error,
        ),
        sample_size: n,
    }))
}

/// Pearson correlation; 0.0 when either variable has no variance
fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let mean_x = stats::mean(xs);
    let mean_y = stats::mean(ys);
    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (x, y) in xs.iter().zip(ys.iter()) {
        sxx += (x - mean_x) * (x - mean_x);
        syy += (y - mean_y) * (y - mean_y);
        sxy += (x - mean_x) * (y - mean_y);
    }
    let denominator = (sxx * syy).sqrt();
    if denominator == 0.0 {
        0.0
    } else {
        sxy / denominator
    }
}
