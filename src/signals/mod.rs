//! Prediction combinator.

pub mod engine;
pub mod explanation;
pub mod scoring;

pub use engine::{EngineConfig, ExternalEstimate, PredictionEngine, MAX_HORIZON_DAYS, MIN_POINTS};
