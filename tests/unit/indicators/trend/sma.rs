//! Unit tests for SMA indicator

use equitypath::indicators::trend::{calculate_sma, TrendAlignment};

use crate::helpers::linear_closes;

#[test]
fn test_sma_uses_trailing_window() {
    let prices = [1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(calculate_sma(&prices, 2), 4.5);
    assert_eq!(calculate_sma(&prices, 5), 3.0);
}

#[test]
fn test_sma_short_series_averages_everything() {
    let prices = linear_closes(10.0, 20.0, 11);
    assert_eq!(calculate_sma(&prices, 50), 15.0);
}

#[test]
fn test_sma_empty_is_zero() {
    assert_eq!(calculate_sma(&[], 20), 0.0);
}

#[test]
fn test_trend_alignment() {
    assert_eq!(TrendAlignment::classify(110.0, 105.0, 100.0), TrendAlignment::Uptrend);
    assert_eq!(TrendAlignment::classify(90.0, 95.0, 100.0), TrendAlignment::Downtrend);
    assert_eq!(TrendAlignment::classify(100.0, 100.0, 100.0), TrendAlignment::Mixed);
    assert_eq!(TrendAlignment::classify(110.0, 95.0, 100.0), TrendAlignment::Mixed);
}
