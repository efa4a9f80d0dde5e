//! Unit tests for the indicator snapshot

use equitypath::models::TechnicalIndicators;

use crate::helpers::{random_walk, series_from_closes};

#[test]
fn test_snapshot_is_deterministic() {
    let series = series_from_closes(&random_walk(90, 21));
    let first = TechnicalIndicators::from_series(&series);
    let second = TechnicalIndicators::from_series(&series);
    assert_eq!(first, second);
}

#[test]
fn test_snapshot_fields_are_finite() {
    let series = series_from_closes(&random_walk(8, 5));
    let snapshot = TechnicalIndicators::from_series(&series);

    for value in [
        snapshot.rsi,
        snapshot.macd.macd,
        snapshot.macd.signal,
        snapshot.sma20,
        snapshot.sma50,
        snapshot.ema12,
        snapshot.ema26,
        snapshot.bollinger_bands.upper,
        snapshot.bollinger_bands.lower,
        snapshot.volatility,
    ] {
        assert!(value.is_finite());
    }
}

#[test]
fn test_snapshot_serializes_camel_case() {
    let series = series_from_closes(&random_walk(30, 2));
    let json = serde_json::to_value(TechnicalIndicators::from_series(&series)).unwrap();
    assert!(json.get("bollingerBands").is_some());
    assert!(json.get("sma20").is_some());
    assert!(json["macd"].get("histogram").is_some());
}
