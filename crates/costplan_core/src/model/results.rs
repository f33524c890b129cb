//! Output records for every operation family.
//!
//! Each model returns a differently-shaped record; the families are tagged
//! enums over per-operation structs so a consumer always sees statically
//! known fields instead of an untyped map.

use serde::{Deserialize, Serialize};

use super::inputs::{ComplexityTier, ProjectClass, ScenarioVariable};
use super::tree::NodeId;

/// Qualitative classification of a financial outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpretation {
    Profitable,
    BreakEven,
    Loss,
}

impl Interpretation {
    /// Classify by the sign of a net value
    #[must_use]
    pub fn from_net_value(value: f64) -> Self {
        if value.abs() < 1e-9 {
            Interpretation::BreakEven
        } else if value > 0.0 {
            Interpretation::Profitable
        } else {
            Interpretation::Loss
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Interpretation::Profitable => "Profitable",
            Interpretation::BreakEven => "Break-even",
            Interpretation::Loss => "Loss",
        }
    }
}

// ============================================================================
// Estimation results
// ============================================================================

/// Output of the parametric effort model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParametricEstimate {
    pub kloc: f64,
    pub project_class: ProjectClass,
    /// Effort in person-months
    pub effort: f64,
    /// Development schedule in months
    pub schedule: f64,
    /// Caller-provided team size, or effort/schedule when omitted
    pub team_size: f64,
    pub cost: f64,
    /// KLOC delivered per person-month
    pub productivity: f64,
}

/// Output of the function-point sizing model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionPointEstimate {
    pub complexity: ComplexityTier,
    pub unadjusted_fp: f64,
    pub adjusted_fp: f64,
    pub effort_hours: f64,
    pub cost: f64,
}

/// Output of the expert/Delphi estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpertJudgmentEstimate {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    /// Mean after dropping estimates more than 2 sigma from the mean.
    /// Falls back to the unfiltered mean when everything is dropped.
    pub filtered_mean: f64,
    /// Number of estimates dropped by the outlier filter
    pub discarded: usize,
    /// (optimistic + 4 * most likely + pessimistic) / 6
    pub pert_estimate: f64,
    /// 95% range around the filtered mean
    pub confidence_range: (f64, f64),
}

/// Output of the linear regression estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionEstimate {
    pub slope: f64,
    pub intercept: f64,
    pub predicted_effort: f64,
    /// Pearson correlation coefficient
    pub correlation: f64,
    pub r_squared: f64,
    pub standard_error: f64,
    /// 95% band around the prediction
    pub confidence_interval: (f64, f64),
    pub sample_size: usize,
}

/// Tagged family of estimation outputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model")]
pub enum EstimationResult {
    Parametric(ParametricEstimate),
    FunctionPoint(FunctionPointEstimate),
    ExpertJudgment(ExpertJudgmentEstimate),
    Regression(RegressionEstimate),
}

impl EstimationResult {
    /// The headline magnitude used when aggregating heterogeneous results.
    ///
    /// Units follow the producing model (person-months, hours, or the
    /// judgment unit); keeping a compared set unit-consistent is the
    /// caller's contract.
    #[must_use]
    pub fn headline_value(&self) -> f64 {
        match self {
            EstimationResult::Parametric(e) => e.effort,
            EstimationResult::FunctionPoint(e) => e.effort_hours,
            EstimationResult::ExpertJudgment(e) => e.filtered_mean,
            EstimationResult::Regression(e) => e.predicted_effort,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            EstimationResult::Parametric(_) => "Parametric",
            EstimationResult::FunctionPoint(_) => "Function Points",
            EstimationResult::ExpertJudgment(_) => "Expert Judgment",
            EstimationResult::Regression(_) => "Regression",
        }
    }
}

// ============================================================================
// Financial results
// ============================================================================

/// Return on investment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiResult {
    /// ROI as a fraction (0.25 = 25%)
    pub roi: f64,
    pub net_profit: f64,
    pub interpretation: Interpretation,
}

/// Net present value of a cash-flow series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpvResult {
    pub npv: f64,
    /// Sum of discounted period flows before subtracting the investment
    pub present_value: f64,
    /// Each period flow after discounting, in period order
    pub discounted_flows: Vec<f64>,
    pub interpretation: Interpretation,
}

/// How the IRR root-finder stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IrrTermination {
    /// |NPV(rate)| fell below tolerance
    Converged,
    /// Iteration budget exhausted; inspect `residual_npv`
    MaxIterationsReached,
}

/// Internal rate of return.
///
/// Non-convergence is data, not an error: the result always carries the
/// rate the iteration reached plus the NPV residual at that rate, so the
/// caller can judge whether the answer is trustworthy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrrResult {
    /// Rate as a fraction (0.12 = 12%)
    pub rate: f64,
    /// NPV evaluated at `rate`; near zero when the root was found
    pub residual_npv: f64,
    pub iterations: usize,
    pub termination: IrrTermination,
}

impl IrrResult {
    #[must_use]
    pub fn converged(&self) -> bool {
        self.termination == IrrTermination::Converged
    }
}

/// Payback period, simple or discounted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaybackResult {
    /// Fractional periods until the cumulative flow recovers the
    /// investment; `None` when it never does (indeterminate, not an error)
    pub periods: Option<f64>,
    /// Cumulative (possibly discounted) flow after each period
    pub cumulative: Vec<f64>,
    pub discounted: bool,
}

/// Four-band qualitative recommendation from the appraisal score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Recommendation {
    NotRecommended,
    Marginal,
    Recommended,
    StronglyRecommended,
}

impl Recommendation {
    /// Map a 0-7 appraisal score into a band
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            6..=7 => Recommendation::StronglyRecommended,
            4..=5 => Recommendation::Recommended,
            2..=3 => Recommendation::Marginal,
            _ => Recommendation::NotRecommended,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::StronglyRecommended => "Strongly recommended",
            Recommendation::Recommended => "Recommended",
            Recommendation::Marginal => "Marginal",
            Recommendation::NotRecommended => "Not recommended",
        }
    }
}

/// Composite appraisal over all financial metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentAppraisal {
    pub roi: RoiResult,
    pub npv: NpvResult,
    pub irr: IrrResult,
    pub payback: PaybackResult,
    pub discounted_payback: PaybackResult,
    /// Heuristic 0-7 score driven by the injected policy thresholds
    pub score: u8,
    pub recommendation: Recommendation,
}

/// Tagged family of financial outputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "metric")]
pub enum FinancialResult {
    Roi(RoiResult),
    Npv(NpvResult),
    Irr(IrrResult),
    Payback(PaybackResult),
    Appraisal(InvestmentAppraisal),
}

// ============================================================================
// Risk results
// ============================================================================

/// Summary statistics over Monte Carlo outcomes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskStatistics {
    pub iterations: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub confidence_level: f64,
    /// Empirical interval from order statistics at the requested level
    pub confidence_interval: (f64, f64),
    /// Fraction of outcomes below zero
    pub probability_of_loss: f64,
    /// 5th-percentile outcome
    pub value_at_risk: f64,
    /// Mean of all outcomes at or below the value at risk
    pub conditional_value_at_risk: f64,
}

/// One equal-width histogram bin; `upper` is exclusive except for the last
/// bin, which includes the maximum outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Fixed-bin-count outcome histogram spanning min..max
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Full Monte Carlo report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloReport {
    pub stats: RiskStatistics,
    pub histogram: Histogram,
}

/// Sensitivity of NPV to one scenario variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityEntry {
    pub variable: ScenarioVariable,
    /// Slope of NPV against percent change from the base value
    pub coefficient: f64,
    /// (swept value, NPV) at each sample point
    pub samples: Vec<(f64, f64)>,
}

/// One-at-a-time sensitivity report; entries are ranked by |coefficient|
/// descending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityReport {
    pub base_npv: f64,
    pub entries: Vec<SensitivityEntry>,
}

impl SensitivityReport {
    /// Variables in impact order
    #[must_use]
    pub fn ranking(&self) -> Vec<ScenarioVariable> {
        self.entries.iter().map(|e| e.variable).collect()
    }
}

/// Chosen child of one decision node during backward induction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionChoice {
    pub decision: NodeId,
    pub chosen: NodeId,
    /// Expected value of the chosen branch
    pub expected_value: f64,
}

/// Result of decision-tree backward induction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEvaluation {
    /// Expected value at the root
    pub expected_value: f64,
    /// The argmax child recorded for every decision node, in evaluation
    /// (post-order) sequence
    pub best_path: Vec<DecisionChoice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpretation_from_net_value() {
        assert_eq!(Interpretation::from_net_value(10.0), Interpretation::Profitable);
        assert_eq!(Interpretation::from_net_value(-0.5), Interpretation::Loss);
        assert_eq!(Interpretation::from_net_value(0.0), Interpretation::BreakEven);
    }

    #[test]
    fn test_recommendation_bands() {
        assert_eq!(Recommendation::from_score(7), Recommendation::StronglyRecommended);
        assert_eq!(Recommendation::from_score(5), Recommendation::Recommended);
        assert_eq!(Recommendation::from_score(2), Recommendation::Marginal);
        assert_eq!(Recommendation::from_score(0), Recommendation::NotRecommended);
    }

    #[test]
    fn test_headline_values_by_variant() {
        let expert = EstimationResult::ExpertJudgment(ExpertJudgmentEstimate {
            mean: 11.0,
            median: 10.0,
            std_dev: 2.0,
            filtered_mean: 10.5,
            discarded: 1,
            pert_estimate: 10.2,
            confidence_range: (9.0, 12.0),
        });
        assert_eq!(expert.headline_value(), 10.5);
        assert_eq!(expert.label(), "Expert Judgment");
    }
}
