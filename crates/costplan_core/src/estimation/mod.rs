//! Estimation model library: parametric effort, function-point sizing,
//! expert judgment, and regression over historical data.
//!
//! All models are pure functions over their inputs plus an injected
//! [`CostModel`](crate::constants::CostModel); none hold state.

mod expert;
mod function_points;
mod parametric;
mod regression;

pub use expert::expert_judgment;
pub use function_points::function_points;
pub use parametric::parametric_effort;
pub use regression::regression_estimate;
