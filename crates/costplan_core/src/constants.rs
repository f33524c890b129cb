//! Injected configuration for the estimation and appraisal models.
//!
//! Every empirical constant the engine uses (pay rates, hours per function
//! point, effort coefficients, scoring thresholds) lives here and is passed
//! by reference into the operations that need it. Nothing in this crate
//! reads module-level mutable state.

use serde::{Deserialize, Serialize};

use crate::model::ProjectClass;

/// Coefficient tuple for the parametric effort model:
/// effort = a * KLOC^b, schedule = c * effort^d.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffortCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl EffortCoefficients {
    // Basic-model coefficient sets (Boehm 1981). Exponent b > 1 makes
    // effort grow super-linearly in size; d < 1 makes schedule grow
    // sub-linearly in effort.
    pub const ORGANIC: EffortCoefficients = EffortCoefficients {
        a: 2.4,
        b: 1.05,
        c: 2.5,
        d: 0.38,
    };
    pub const SEMI_DETACHED: EffortCoefficients = EffortCoefficients {
        a: 3.0,
        b: 1.12,
        c: 2.5,
        d: 0.35,
    };
    pub const EMBEDDED: EffortCoefficients = EffortCoefficients {
        a: 3.6,
        b: 1.20,
        c: 2.5,
        d: 0.32,
    };
}

/// Cost-model constants shared by the estimation operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostModel {
    /// Monetary units per person-month of effort
    pub person_month_rate: f64,
    /// Monetary units per hour of effort (function-point costing)
    pub hourly_rate: f64,
    /// Delivery effort per adjusted function point
    pub hours_per_function_point: f64,
    /// Technical complexity multiplier applied to unadjusted function points
    pub technical_complexity_factor: f64,
    pub organic: EffortCoefficients,
    pub semi_detached: EffortCoefficients,
    pub embedded: EffortCoefficients,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            person_month_rate: 5_000.0,
            hourly_rate: 40.0,
            hours_per_function_point: 8.0,
            technical_complexity_factor: 1.0,
            organic: EffortCoefficients::ORGANIC,
            semi_detached: EffortCoefficients::SEMI_DETACHED,
            embedded: EffortCoefficients::EMBEDDED,
        }
    }
}

impl CostModel {
    /// Coefficient set for a project class
    #[must_use]
    pub fn coefficients(&self, class: ProjectClass) -> &EffortCoefficients {
        match class {
            ProjectClass::Organic => &self.organic,
            ProjectClass::SemiDetached => &self.semi_detached,
            ProjectClass::Embedded => &self.embedded,
        }
    }
}

/// Scoring thresholds for the comprehensive investment appraisal.
///
/// These are heuristic policy values, not laws of finance; callers with
/// different hurdle rates should inject their own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppraisalPolicy {
    /// ROI (as a fraction) above which the investment earns score points
    pub roi_threshold: f64,
    /// Payback horizon in periods considered fast enough to reward
    pub payback_horizon: f64,
}

impl Default for AppraisalPolicy {
    fn default() -> Self {
        Self {
            roi_threshold: 0.15,
            payback_horizon: 3.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients_by_class() {
        let model = CostModel::default();
        assert_eq!(
            model.coefficients(ProjectClass::Organic),
            &EffortCoefficients::ORGANIC
        );
        assert_eq!(
            model.coefficients(ProjectClass::Embedded),
            &EffortCoefficients::EMBEDDED
        );
    }

    #[test]
    fn test_effort_exponents_shape() {
        // The monotonicity properties of the parametric model rely on these.
        for coeffs in [
            EffortCoefficients::ORGANIC,
            EffortCoefficients::SEMI_DETACHED,
            EffortCoefficients::EMBEDDED,
        ] {
            assert!(coeffs.b > 1.0);
            assert!(coeffs.d < 1.0);
        }
    }
}
