//! EMA (Exponential Moving Average) indicator

use crate::common::math;

/// Calculate EMA for a specific period
///
/// Seeded with the first price; `ema_t = price_t * k + ema_{t-1} * (1 - k)`
/// with `k = 2 / (period + 1)`. Empty input yields 0.
pub fn calculate_ema(prices: &[f64], period: usize) -> f64 {
    ema_series(prices, period).last().copied().unwrap_or(0.0)
}

/// EMA value at every index of `prices`.
pub fn ema_series(prices: &[f64], period: usize) -> Vec<f64> {
    let mut series = Vec::with_capacity(prices.len());
    let mut iter = prices.iter();

    if let Some(&first) = iter.next() {
        let mut ema = first;
        series.push(ema);
        for &price in iter {
            ema = math::ema_from_previous(price, ema, period);
            series.push(ema);
        }
    }

    series
}

/// Check the EMA 12 / EMA 26 relationship
///
/// Returns 1 when the fast EMA is above the slow one, -1 below, 0 equal.
pub fn check_ema_cross(prices: &[f64], fast_period: usize, slow_period: usize) -> i32 {
    let fast = calculate_ema(prices, fast_period);
    let slow = calculate_ema(prices, slow_period);

    if fast > slow {
        1
    } else if fast < slow {
        -1
    } else {
        0
    }
}
