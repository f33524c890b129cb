//! Risk analysis engine: sensitivity coefficients, decision-tree
//! expected values, and Monte Carlo simulation.
//!
//! Scenario scoring delegates to the financial metrics solver; nothing in
//! this module holds state between invocations.

mod formula;
mod monte_carlo;
mod sensitivity;
mod tree;

pub use formula::Expr;
pub use monte_carlo::{MAX_ITERATIONS, MIN_ITERATIONS, MonteCarloConfig, monte_carlo};
pub use sensitivity::sensitivity_analysis;
pub use tree::evaluate_tree;
