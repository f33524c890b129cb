//! Parametric (power-law) effort model.

use crate::constants::CostModel;
use crate::error::InputError;
use crate::model::{EstimationResult, ParametricEstimate, ProjectClass};

/// Estimate effort, schedule, and cost from project size.
///
/// Effort (person-months) = a * KLOC^b and schedule (months) =
/// c * effort^d, with the coefficient tuple selected by `class` from the
/// injected model. When `team_size` is omitted, the average team size
/// effort/schedule is reported instead.
pub fn parametric_effort(
    kloc: f64,
    class: ProjectClass,
    team_size: Option<u32>,
    model: &CostModel,
) -> Result<EstimationResult, InputError> {
    if kloc <= 0.0 || !kloc.is_finite() {
        return Err(InputError::NonPositiveSize(kloc));
    }

    let coeffs = model.coefficients(class);
    let effort = coeffs.a * kloc.powf(coeffs.b);
    let schedule = coeffs.c * effort.powf(coeffs.d);

    Ok(EstimationResult::Parametric(ParametricEstimate {
        kloc,
        project_class: class,
        effort,
        schedule,
        team_size: team_size.map_or(effort / schedule, f64::from),
        cost: effort * model.person_month_rate,
        productivity: kloc / effort,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unwrap_parametric(result: EstimationResult) -> ParametricEstimate {
        match result {
            EstimationResult::Parametric(e) => e,
            other => panic!("expected parametric estimate, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_non_positive_size() {
        let model = CostModel::default();
        assert!(parametric_effort(0.0, ProjectClass::Organic, None, &model).is_err());
        assert!(parametric_effort(-3.0, ProjectClass::Organic, None, &model).is_err());
    }

    #[test]
    fn test_organic_reference_values() {
        let model = CostModel::default();
        let est = unwrap_parametric(
            parametric_effort(10.0, ProjectClass::Organic, None, &model).unwrap(),
        );
        // 2.4 * 10^1.05 = 26.93; 2.5 * 26.93^0.38 = 8.74
        assert!((est.effort - 26.93).abs() < 0.05);
        assert!((est.schedule - 8.74).abs() < 0.05);
        assert!((est.cost - est.effort * 5_000.0).abs() < 1e-9);
        assert!((est.productivity - 10.0 / est.effort).abs() < 1e-12);
    }

    #[test]
    fn test_effort_monotonic_in_size() {
        let model = CostModel::default();
        for class in [
            ProjectClass::Organic,
            ProjectClass::SemiDetached,
            ProjectClass::Embedded,
        ] {
            let mut previous = 0.0;
            for kloc in [1.0, 5.0, 20.0, 100.0, 500.0] {
                let est = unwrap_parametric(
                    parametric_effort(kloc, class, None, &model).unwrap(),
                );
                assert!(est.effort > previous);
                previous = est.effort;
            }
        }
    }

    #[test]
    fn test_explicit_team_size_echoed() {
        let model = CostModel::default();
        let est = unwrap_parametric(
            parametric_effort(25.0, ProjectClass::Embedded, Some(6), &model).unwrap(),
        );
        assert_eq!(est.team_size, 6.0);
    }
}
