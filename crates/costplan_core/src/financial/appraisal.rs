//! Comprehensive investment appraisal.

use crate::constants::AppraisalPolicy;
use crate::error::InputError;
use crate::model::{CashFlowSeries, FinancialResult, InvestmentAppraisal, Recommendation};

use super::discounting::{npv, roi};
use super::irr::irr;
use super::payback::{discounted_payback, payback};

/// Compose every metric over one series and score the investment.
///
/// The 0-7 score awards: NPV above zero +2, ROI above the policy threshold
/// +2, IRR above the discount rate +2, simple payback within the policy
/// horizon +1. The thresholds come from the injected
/// [`AppraisalPolicy`], not from constants baked into this function.
pub fn appraise(
    series: &CashFlowSeries,
    policy: &AppraisalPolicy,
) -> Result<FinancialResult, InputError> {
    series.validate()?;

    let roi_result = roi(series.initial_investment, series.total_inflow())?;
    let npv_result = npv(series)?;
    let irr_result = irr(series)?;
    let payback_result = payback(series)?;
    let discounted_payback_result = discounted_payback(series)?;

    let mut score: u8 = 0;
    if npv_result.npv > 0.0 {
        score += 2;
    }
    if roi_result.roi > policy.roi_threshold {
        score += 2;
    }
    if irr_result.rate > series.discount_rate {
        score += 2;
    }
    if payback_result
        .periods
        .is_some_and(|p| p <= policy.payback_horizon)
    {
        score += 1;
    }

    Ok(FinancialResult::Appraisal(InvestmentAppraisal {
        roi: roi_result,
        npv: npv_result,
        irr: irr_result,
        payback: payback_result,
        discounted_payback: discounted_payback_result,
        score,
        recommendation: Recommendation::from_score(score),
    }))
}
