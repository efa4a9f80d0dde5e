//! Unit tests for support and resistance levels

use equitypath::indicators::structure::{calculate_support_resistance, calculate_support_resistance_default};
use equitypath::models::{PricePoint, PriceSeries};

use crate::helpers::{assert_close, date, series_from_closes};

#[test]
fn test_levels_use_trailing_window_only() {
    // An early extreme outside the 20-point window must be ignored
    let mut closes = vec![10.0];
    closes.extend((0..25).map(|i| 100.0 + i as f64));
    let series = series_from_closes(&closes);

    let levels = calculate_support_resistance_default(&series);
    assert_close(levels.support_level, 105.0 * 0.98, 1e-9);
    assert_close(levels.resistance_level, 124.0 * 1.02, 1e-9);
}

#[test]
fn test_levels_use_highs_and_lows() {
    let points = vec![
        PricePoint::new(date(2024, 1, 1), 100.0, 104.0, 97.0, 101.0, 10),
        PricePoint::new(date(2024, 1, 2), 101.0, 103.0, 99.0, 102.0, 10),
        PricePoint::new(date(2024, 1, 3), 102.0, 106.0, 100.0, 105.0, 10),
    ];
    let series = PriceSeries::new(points).unwrap();

    let levels = calculate_support_resistance(&series, 20);
    assert_close(levels.support_level, 97.0 * 0.98, 1e-9);
    assert_close(levels.resistance_level, 106.0 * 1.02, 1e-9);
}
