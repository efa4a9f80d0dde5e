//! Support and Resistance levels

use crate::models::indicators::SupportResistance;
use crate::models::market::PriceSeries;

const SUPPORT_DISCOUNT: f64 = 0.98;
const RESISTANCE_PREMIUM: f64 = 1.02;

/// Calculate support and resistance levels
///
/// Support is the lowest low of the trailing `lookback` points less 2 %;
/// resistance is the highest high plus 2 %.
pub fn calculate_support_resistance(series: &PriceSeries, lookback: usize) -> SupportResistance {
    let points = series.points();
    let recent = &points[points.len().saturating_sub(lookback.max(1))..];

    let lowest = recent.iter().map(|p| p.low).fold(f64::INFINITY, f64::min);
    let highest = recent.iter().map(|p| p.high).fold(f64::NEG_INFINITY, f64::max);

    SupportResistance {
        support_level: lowest * SUPPORT_DISCOUNT,
        resistance_level: highest * RESISTANCE_PREMIUM,
    }
}

/// Calculate support/resistance with default lookback (20)
pub fn calculate_support_resistance_default(series: &PriceSeries) -> SupportResistance {
    calculate_support_resistance(series, 20)
}
