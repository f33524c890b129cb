//! Software-project economics computation core
//!
//! This crate is the pure computation engine behind a project-economics
//! decision-support system. It provides:
//! - Estimation models: parametric effort, function-point sizing, expert
//!   judgment aggregation, and regression over historical data
//! - Financial metrics: NPV, ROI, Newton-Raphson IRR, simple and
//!   discounted payback, and a composite scored appraisal
//! - Risk analysis: one-at-a-time sensitivity sweeps, decision-tree
//!   backward induction, and Monte Carlo simulation with VaR/CVaR
//! - Comparison utilities over heterogeneous results
//!
//! Everything is a synchronous pure function over plain serde-serializable
//! records: no I/O, no logging, no state between invocations. Empirical
//! constants are injected via [`constants::CostModel`] and
//! [`constants::AppraisalPolicy`] rather than read from globals.
//!
//! # Example
//!
//! ```ignore
//! use costplan_core::constants::CostModel;
//! use costplan_core::estimation::parametric_effort;
//! use costplan_core::model::ProjectClass;
//!
//! let model = CostModel::default();
//! let estimate = parametric_effort(25.0, ProjectClass::Organic, None, &model)?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod compare;
pub mod constants;
pub mod error;
pub mod estimation;
pub mod financial;
pub mod risk;
pub mod stats;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use compare::{ComparisonSummary, compare_appraisals, compare_estimates};
pub use constants::{AppraisalPolicy, CostModel, EffortCoefficients};
pub use risk::MonteCarloConfig;
