//! Internal rate of return via Newton-Raphson.

use crate::error::InputError;
use crate::model::{CashFlowSeries, IrrResult, IrrTermination};

/// Absolute NPV below which the root counts as found; also the derivative
/// magnitude below which Newton restarts
pub const IRR_TOLERANCE: f64 = 1e-4;
pub const IRR_MAX_ITERATIONS: usize = 100;

const INITIAL_GUESS: f64 = 0.10;
const RESTART_GUESS: f64 = 0.05;

/// NPV of the series at an arbitrary rate (ignores the series' own
/// discount rate)
fn npv_at(series: &CashFlowSeries, rate: f64) -> f64 {
    let discounted: f64 = series
        .flows
        .iter()
        .enumerate()
        .map(|(i, flow)| flow / (1.0 + rate).powi(i as i32 + 1))
        .sum();
    discounted - series.initial_investment
}

/// d(NPV)/d(rate), analytic
fn npv_derivative_at(series: &CashFlowSeries, rate: f64) -> f64 {
    series
        .flows
        .iter()
        .enumerate()
        .map(|(i, flow)| {
            let period = (i + 1) as f64;
            -period * flow / (1.0 + rate).powi(i as i32 + 2)
        })
        .sum()
}

/// Find the rate at which NPV is zero.
///
/// Newton-Raphson from a 10% seed; a vanishing derivative triggers a
/// single restart from 5%. This is a pragmatic restart, not a bracketing
/// root finder: cash flows with multiple sign changes can have several or
/// no real roots, so the result always carries the residual NPV at the
/// reached rate and callers must inspect it before trusting the answer.
/// Non-convergence is reported as data, never as an error.
pub fn irr(series: &CashFlowSeries) -> Result<IrrResult, InputError> {
    if series.flows.is_empty() {
        return Err(InputError::EmptyCashFlows);
    }
    if series.initial_investment < 0.0 || !series.initial_investment.is_finite() {
        return Err(InputError::NegativeInvestment(series.initial_investment));
    }

    let mut rate = INITIAL_GUESS;
    let mut restarted = false;

    for iteration in 0..IRR_MAX_ITERATIONS {
        let residual = npv_at(series, rate);
        if residual.abs() < IRR_TOLERANCE {
            return Ok(IrrResult {
                rate,
                residual_npv: residual,
                iterations: iteration,
                termination: IrrTermination::Converged,
            });
        }

        let derivative = npv_derivative_at(series, rate);
        if derivative.abs() < IRR_TOLERANCE {
            if restarted {
                // Flat again after the restart; give up and report where
                // the iteration stands
                return Ok(IrrResult {
                    rate,
                    residual_npv: residual,
                    iterations: iteration,
                    termination: IrrTermination::MaxIterationsReached,
                });
            }
            rate = RESTART_GUESS;
            restarted = true;
            continue;
        }

        rate -= residual / derivative;
    }

    Ok(IrrResult {
        rate,
        residual_npv: npv_at(series, rate),
        iterations: IRR_MAX_ITERATIONS,
        termination: IrrTermination::MaxIterationsReached,
    })
}
