//! Technical indicator library.
//!
//! Every function is pure and total over non-empty input; short series
//! degrade to neutral values instead of failing.

pub mod momentum;
pub mod snapshot;
pub mod structure;
pub mod trend;
pub mod volatility;
