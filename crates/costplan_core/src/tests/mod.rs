//! Integration tests for the computation core
//!
//! Tests are organized by topic:
//! - `estimation` - estimation models composed end to end
//! - `financial` - financial solver properties and the IRR/NPV law
//! - `risk` - sensitivity, decision trees, and Monte Carlo behavior
//! - `comparison` - cross-model aggregation and result serialization
