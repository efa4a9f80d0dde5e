//! Volatility indicators: Bollinger Bands, realized volatility

pub mod bollinger;
pub mod historical;

pub use bollinger::*;
pub use historical::*;
