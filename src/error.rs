use thiserror::Error;

/// Errors raised by the synthesizer and the prediction combinator.
///
/// Degenerate numeric input (flat prices, empty slices) is never an error;
/// the indicator functions substitute neutral sentinels instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("insufficient data: need at least {required} price points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error(
        "invalid horizon: {0} days (must be between 1 and {max})",
        max = crate::signals::engine::MAX_HORIZON_DAYS
    )]
    InvalidHorizon(u32),

    #[error("invalid price series: {0}")]
    InvalidSeries(String),
}
