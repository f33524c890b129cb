//! Financial metrics solver: present-value discounting, rate-of-return
//! root finding, payback interpolation, and the composite appraisal.
//!
//! Every function here is a synchronous pure computation over a
//! [`CashFlowSeries`](crate::model::CashFlowSeries); all input validation
//! happens before any partial result is produced.

mod appraisal;
mod discounting;
mod irr;
mod payback;

pub use appraisal::appraise;
pub use discounting::{npv, roi};
pub use irr::{IRR_MAX_ITERATIONS, IRR_TOLERANCE, irr};
pub use payback::{discounted_payback, payback};
