//! Function-point sizing model.

use crate::constants::CostModel;
use crate::model::{ComplexityTier, EstimationResult, FunctionPointCounts, FunctionPointEstimate};

// Weight rows per complexity tier, columns in category order:
// external inputs, external outputs, external inquiries,
// internal logical files, external interface files (Albrecht).
const WEIGHTS: [[f64; 5]; 3] = [
    [3.0, 4.0, 3.0, 7.0, 5.0],
    [4.0, 5.0, 4.0, 10.0, 7.0],
    [6.0, 7.0, 6.0, 15.0, 10.0],
];

fn weight_row(tier: ComplexityTier) -> &'static [f64; 5] {
    match tier {
        ComplexityTier::Simple => &WEIGHTS[0],
        ComplexityTier::Average => &WEIGHTS[1],
        ComplexityTier::Complex => &WEIGHTS[2],
    }
}

/// Size a system in function points and derive effort and cost.
///
/// Unadjusted points are the weighted category sum; the technical
/// complexity factor from the injected model (default 1.0) scales them to
/// adjusted points. Counts are unsigned, so the only degenerate input is
/// the all-zero profile, which legitimately sizes to zero.
#[must_use]
pub fn function_points(
    counts: &FunctionPointCounts,
    tier: ComplexityTier,
    model: &CostModel,
) -> EstimationResult {
    let weights = weight_row(tier);
    let unadjusted_fp = f64::from(counts.external_inputs) * weights[0]
        + f64::from(counts.external_outputs) * weights[1]
        + f64::from(counts.external_inquiries) * weights[2]
        + f64::from(counts.internal_files) * weights[3]
        + f64::from(counts.external_interfaces) * weights[4];

    let adjusted_fp = unadjusted_fp * model.technical_complexity_factor;
    let effort_hours = adjusted_fp * model.hours_per_function_point;

    EstimationResult::FunctionPoint(FunctionPointEstimate {
        complexity: tier,
        unadjusted_fp,
        adjusted_fp,
        effort_hours,
        cost: effort_hours * model.hourly_rate,
    })
}
