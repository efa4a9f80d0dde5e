//! Unit tests for environment configuration

use std::env;
use std::sync::Mutex;

use equitypath::config::{Config, ConfigError};

/// Environment variables are process-wide; serialize the tests touching them.
static ENV_LOCK: Mutex<()> = Mutex::new(());

const KEYS: &[&str] = &[
    "APP_ENV",
    "PORT",
    "REMOTE_ANALYSIS_URL",
    "REMOTE_ANALYSIS_TIMEOUT_MS",
    "LIVE_DATA_URL",
    "TREND_THRESHOLD_PCT",
    "DEFAULT_HORIZON_DAYS",
    "HISTORY_DAYS",
    "WATCHLIST_PATH",
    "RNG_SEED",
];

fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());
    for key in KEYS {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }
    let result = f();
    for key in KEYS {
        env::remove_var(key);
    }
    result
}

#[test]
fn test_empty_environment_uses_defaults() {
    let config = with_env(&[], Config::from_env).unwrap();
    assert_eq!(config.environment, "sandbox");
    assert_eq!(config.port, 8080);
    assert!(config.remote_analysis_url.is_none());
    assert!(config.live_data_url.is_none());
    assert_eq!(config.remote_timeout_ms, 10_000);
    assert_eq!(config.trend_threshold_pct, 0.5);
    assert_eq!(config.default_horizon_days, 7);
    assert_eq!(config.history_days, 90);
    assert!(config.watchlist_path.is_none());
    assert!(config.rng_seed.is_none());
}

#[test]
fn test_environment_overrides() {
    let config = with_env(
        &[
            ("APP_ENV", "production"),
            ("PORT", "9090"),
            ("REMOTE_ANALYSIS_URL", "http://localhost:5000/analyze"),
            ("TREND_THRESHOLD_PCT", "1.5"),
            ("HISTORY_DAYS", "120"),
            ("WATCHLIST_PATH", "/tmp/watchlist.json"),
            ("RNG_SEED", "42"),
        ],
        Config::from_env,
    )
    .unwrap();

    assert_eq!(config.environment, "production");
    assert_eq!(config.port, 9090);
    assert_eq!(
        config.remote_analysis_url.unwrap().as_str(),
        "http://localhost:5000/analyze"
    );
    assert_eq!(config.trend_threshold_pct, 1.5);
    assert_eq!(config.history_days, 120);
    assert_eq!(config.watchlist_path.unwrap().to_str(), Some("/tmp/watchlist.json"));
    assert_eq!(config.rng_seed, Some(42));
}

#[test]
fn test_blank_values_are_ignored() {
    let config = with_env(&[("PORT", "  "), ("LIVE_DATA_URL", "")], Config::from_env).unwrap();
    assert_eq!(config.port, 8080);
    assert!(config.live_data_url.is_none());
}

#[test]
fn test_invalid_url_is_rejected() {
    let err = with_env(&[("LIVE_DATA_URL", "not a url")], Config::from_env).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidUrl { key: "LIVE_DATA_URL", .. }));
}

#[test]
fn test_invalid_numbers_are_rejected() {
    let err = with_env(&[("PORT", "eighty")], Config::from_env).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));

    let err = with_env(&[("DEFAULT_HORIZON_DAYS", "0")], Config::from_env).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { key: "DEFAULT_HORIZON_DAYS", .. }));

    let err = with_env(&[("DEFAULT_HORIZON_DAYS", "366")], Config::from_env).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { key: "DEFAULT_HORIZON_DAYS", .. }));

    let err = with_env(&[("HISTORY_DAYS", "3")], Config::from_env).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { key: "HISTORY_DAYS", .. }));

    let err = with_env(&[("TREND_THRESHOLD_PCT", "-1")], Config::from_env).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { key: "TREND_THRESHOLD_PCT", .. }));
}
