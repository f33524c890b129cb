//! Input and output record types for the computation core.
//!
//! Everything here is a plain serde-serializable value record: the core
//! receives these from the (out-of-scope) routing layer and hands results
//! back for it to persist or display.

mod distributions;
mod inputs;
mod results;
mod tree;

pub use distributions::*;
pub use inputs::*;
pub use results::*;
pub use tree::*;
