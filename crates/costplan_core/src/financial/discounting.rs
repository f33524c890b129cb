//! Return on investment and net present value.

use crate::error::InputError;
use crate::model::{CashFlowSeries, Interpretation, NpvResult, RoiResult};

/// Simple return on investment: (return - investment) / investment.
pub fn roi(total_investment: f64, total_return: f64) -> Result<RoiResult, InputError> {
    if total_investment <= 0.0 || !total_investment.is_finite() {
        return Err(InputError::NonPositiveInvestment(total_investment));
    }

    let net_profit = total_return - total_investment;
    Ok(RoiResult {
        roi: net_profit / total_investment,
        net_profit,
        interpretation: Interpretation::from_net_value(net_profit),
    })
}

/// Net present value: each period flow discounted by (1 + rate)^period,
/// summed, minus the initial investment.
pub fn npv(series: &CashFlowSeries) -> Result<NpvResult, InputError> {
    series.validate()?;

    let rate = series.discount_rate;
    let discounted_flows: Vec<f64> = series
        .flows
        .iter()
        .enumerate()
        .map(|(i, flow)| flow / (1.0 + rate).powi(i as i32 + 1))
        .collect();

    let present_value: f64 = discounted_flows.iter().sum();
    let npv = present_value - series.initial_investment;

    Ok(NpvResult {
        npv,
        present_value,
        discounted_flows,
        interpretation: Interpretation::from_net_value(npv),
    })
}
