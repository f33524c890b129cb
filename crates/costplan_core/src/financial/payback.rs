//! Simple and discounted payback periods.

use crate::error::InputError;
use crate::model::{CashFlowSeries, PaybackResult};

/// Payback period over undiscounted flows
pub fn payback(series: &CashFlowSeries) -> Result<PaybackResult, InputError> {
    series.validate()?;
    Ok(walk(series, false))
}

/// Payback period over flows discounted at the series rate
pub fn discounted_payback(series: &CashFlowSeries) -> Result<PaybackResult, InputError> {
    series.validate()?;
    Ok(walk(series, true))
}

/// Walk the cumulative flow period by period. When the running total
/// crosses from negative to non-negative inside period i, the fractional
/// period is interpolated as (i - 1) + |prior cumulative| / period flow.
fn walk(series: &CashFlowSeries, discounted: bool) -> PaybackResult {
    let rate = series.discount_rate;
    let mut cumulative = -series.initial_investment;
    let mut cumulative_series = Vec::with_capacity(series.flows.len());
    let mut periods = if cumulative >= 0.0 { Some(0.0) } else { None };

    for (i, flow) in series.flows.iter().enumerate() {
        let period_flow = if discounted {
            flow / (1.0 + rate).powi(i as i32 + 1)
        } else {
            *flow
        };

        let next = cumulative + period_flow;
        if periods.is_none() && cumulative < 0.0 && next >= 0.0 {
            periods = Some(i as f64 + (-cumulative) / period_flow);
        }
        cumulative = next;
        cumulative_series.push(cumulative);
    }

    PaybackResult {
        periods,
        cumulative: cumulative_series,
        discounted,
    }
}
