use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Empirical project class for the parametric effort model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectClass {
    /// Small teams, familiar in-house problems
    Organic,
    /// Mixed experience, moderate constraints
    SemiDetached,
    /// Tight hardware/regulatory constraints
    Embedded,
}

/// Complexity tier selecting a function-point weight row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplexityTier {
    Simple,
    Average,
    Complex,
}

/// Counted function-point categories.
///
/// Counts are unsigned, so the non-negativity invariant holds by
/// construction. All-zero counts are a valid (empty) profile that sizes
/// to zero function points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionPointCounts {
    pub external_inputs: u32,
    pub external_outputs: u32,
    pub external_inquiries: u32,
    pub internal_files: u32,
    pub external_interfaces: u32,
}

impl FunctionPointCounts {
    /// Total raw count across all five categories
    #[must_use]
    pub fn total(&self) -> u32 {
        self.external_inputs
            + self.external_outputs
            + self.external_inquiries
            + self.internal_files
            + self.external_interfaces
    }
}

/// An investment and its subsequent per-period cash flows.
///
/// `flows[i]` is the net flow of period `i + 1` after time zero; ordering
/// is significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSeries {
    pub initial_investment: f64,
    pub flows: Vec<f64>,
    /// Per-period discount rate as a fraction (0.10 = 10%)
    pub discount_rate: f64,
}

impl CashFlowSeries {
    #[must_use]
    pub fn new(initial_investment: f64, flows: Vec<f64>, discount_rate: f64) -> Self {
        Self {
            initial_investment,
            flows,
            discount_rate,
        }
    }

    /// Check the series invariants before any computation touches it
    pub fn validate(&self) -> Result<(), InputError> {
        if self.flows.is_empty() {
            return Err(InputError::EmptyCashFlows);
        }
        if self.discount_rate < 0.0 || !self.discount_rate.is_finite() {
            return Err(InputError::NegativeDiscountRate(self.discount_rate));
        }
        if self.initial_investment < 0.0 || !self.initial_investment.is_finite() {
            return Err(InputError::NegativeInvestment(self.initial_investment));
        }
        Ok(())
    }

    /// Sum of undiscounted period flows
    #[must_use]
    pub fn total_inflow(&self) -> f64 {
        self.flows.iter().sum()
    }
}

/// Variable of a base scenario that sensitivity analysis can sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioVariable {
    InitialInvestment,
    PeriodicFlow,
    Periods,
    DiscountRate,
}

/// A flat cash-flow scenario: one investment followed by a constant flow
/// repeated for a number of periods
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseScenario {
    pub initial_investment: f64,
    pub periodic_flow: f64,
    pub periods: u32,
    pub discount_rate: f64,
}

impl BaseScenario {
    /// Current value of one scenario variable
    #[must_use]
    pub fn value_of(&self, variable: ScenarioVariable) -> f64 {
        match variable {
            ScenarioVariable::InitialInvestment => self.initial_investment,
            ScenarioVariable::PeriodicFlow => self.periodic_flow,
            ScenarioVariable::Periods => f64::from(self.periods),
            ScenarioVariable::DiscountRate => self.discount_rate,
        }
    }

    /// Copy of the scenario with one variable replaced.
    ///
    /// `Periods` is rounded to the nearest whole period and floored at 1.
    #[must_use]
    pub fn with_value(&self, variable: ScenarioVariable, value: f64) -> Self {
        let mut scenario = *self;
        match variable {
            ScenarioVariable::InitialInvestment => scenario.initial_investment = value,
            ScenarioVariable::PeriodicFlow => scenario.periodic_flow = value,
            ScenarioVariable::Periods => scenario.periods = value.round().max(1.0) as u32,
            ScenarioVariable::DiscountRate => scenario.discount_rate = value,
        }
        scenario
    }

    /// Expand to the concrete cash-flow series the financial solver consumes
    #[must_use]
    pub fn to_cash_flows(&self) -> CashFlowSeries {
        CashFlowSeries::new(
            self.initial_investment,
            vec![self.periodic_flow; self.periods as usize],
            self.discount_rate,
        )
    }
}

/// One-at-a-time sweep over a scenario variable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRange {
    pub variable: ScenarioVariable,
    pub min: f64,
    pub max: f64,
    /// Number of evenly spaced sample points, endpoints inclusive
    pub steps: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cash_flow_validation() {
        let ok = CashFlowSeries::new(100.0, vec![50.0, 60.0], 0.1);
        assert!(ok.validate().is_ok());

        let empty = CashFlowSeries::new(100.0, vec![], 0.1);
        assert_eq!(empty.validate(), Err(InputError::EmptyCashFlows));

        let negative_rate = CashFlowSeries::new(100.0, vec![50.0], -0.1);
        assert!(matches!(
            negative_rate.validate(),
            Err(InputError::NegativeDiscountRate(_))
        ));
    }

    #[test]
    fn test_scenario_round_trip() {
        let base = BaseScenario {
            initial_investment: 1_000.0,
            periodic_flow: 400.0,
            periods: 5,
            discount_rate: 0.08,
        };
        let swept = base.with_value(ScenarioVariable::Periods, 7.4);
        assert_eq!(swept.periods, 7);
        assert_eq!(swept.to_cash_flows().flows.len(), 7);
        assert_eq!(base.value_of(ScenarioVariable::PeriodicFlow), 400.0);
    }
}
