//! Environment-driven configuration.
//!
//! Every setting has a default, so an empty environment yields a working
//! local-only engine.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

use crate::signals::engine::{DEFAULT_TREND_THRESHOLD_PCT, MAX_HORIZON_DAYS};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{key} is not a valid URL: {source}")]
    InvalidUrl {
        key: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("{key} has an invalid value: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Deployment environment from `APP_ENV`, defaulting to `sandbox`.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub port: u16,
    pub remote_analysis_url: Option<Url>,
    pub remote_timeout_ms: u64,
    pub live_data_url: Option<Url>,
    pub trend_threshold_pct: f64,
    pub default_horizon_days: u32,
    pub history_days: u32,
    pub watchlist_path: Option<PathBuf>,
    /// Fixed seed for the synthesizer and the prediction noise.
    pub rng_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            port: 8080,
            remote_analysis_url: None,
            remote_timeout_ms: 10_000,
            live_data_url: None,
            trend_threshold_pct: DEFAULT_TREND_THRESHOLD_PCT,
            default_horizon_days: 7,
            history_days: 90,
            watchlist_path: None,
            rng_seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let config = Self {
            environment: get_environment(),
            port: parse_var("PORT")?.unwrap_or(defaults.port),
            remote_analysis_url: parse_url("REMOTE_ANALYSIS_URL")?,
            remote_timeout_ms: parse_var("REMOTE_ANALYSIS_TIMEOUT_MS")?
                .unwrap_or(defaults.remote_timeout_ms),
            live_data_url: parse_url("LIVE_DATA_URL")?,
            trend_threshold_pct: parse_var("TREND_THRESHOLD_PCT")?
                .unwrap_or(defaults.trend_threshold_pct),
            default_horizon_days: parse_var("DEFAULT_HORIZON_DAYS")?
                .unwrap_or(defaults.default_horizon_days),
            history_days: parse_var("HISTORY_DAYS")?.unwrap_or(defaults.history_days),
            watchlist_path: env::var("WATCHLIST_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            rng_seed: parse_var("RNG_SEED")?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.trend_threshold_pct.is_finite() && self.trend_threshold_pct >= 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "TREND_THRESHOLD_PCT",
                value: self.trend_threshold_pct.to_string(),
            });
        }
        if !(1..=MAX_HORIZON_DAYS).contains(&self.default_horizon_days) {
            return Err(ConfigError::InvalidValue {
                key: "DEFAULT_HORIZON_DAYS",
                value: self.default_horizon_days.to_string(),
            });
        }
        if self.history_days < 5 {
            return Err(ConfigError::InvalidValue {
                key: "HISTORY_DAYS",
                value: self.history_days.to_string(),
            });
        }
        Ok(())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match non_empty_var(key) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(None),
    }
}

fn parse_url(key: &'static str) -> Result<Option<Url>, ConfigError> {
    match non_empty_var(key) {
        Some(value) => Url::parse(value.trim())
            .map(Some)
            .map_err(|source| ConfigError::InvalidUrl { key, source }),
        None => Ok(None),
    }
}
