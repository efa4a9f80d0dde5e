//! Small numeric primitives shared by the indicator functions.

/// Trailing window of at most `period` values.
///
/// Returns the whole slice when it is shorter than `period`.
pub fn trailing(values: &[f64], period: usize) -> &[f64] {
    let start = values.len().saturating_sub(period);
    &values[start..]
}

/// Arithmetic mean. Empty input yields 0.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation around the mean of `values`.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// EMA smoothing multiplier `2 / (period + 1)`
pub fn ema_multiplier(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// One EMA recurrence step, `price * k + previous * (1 - k)`.
///
/// Written as `previous + k * (price - previous)` so a constant input stays
/// exactly constant.
pub fn ema_from_previous(price: f64, previous: f64, period: usize) -> f64 {
    previous + ema_multiplier(period) * (price - previous)
}

/// Natural-log returns between consecutive prices.
///
/// Pairs with a non-positive price are skipped.
pub fn log_returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .filter(|w| w[0] > 0.0 && w[1] > 0.0)
        .map(|w| (w[1] / w[0]).ln())
        .collect()
}

/// Coefficient of variation (std / mean). Zero mean yields 0.
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let avg = mean(values);
    if avg == 0.0 {
        return 0.0;
    }
    population_std_dev(values) / avg
}
