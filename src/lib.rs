//! EquityPath forecasting engine.
//!
//! Synthetic market data, technical indicators and a heuristic price
//! prediction combinator, with remote-analysis and live-data clients that
//! fall back to the local engine.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
pub mod watchlist;

pub use error::EngineError;
pub use models::{Prediction, PricePoint, PriceSeries, TechnicalIndicators, Trend};
