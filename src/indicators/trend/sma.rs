//! SMA (Simple Moving Average) indicator

use crate::common::math;

/// Mean of the trailing `period` prices, or of all prices when fewer exist.
pub fn calculate_sma(prices: &[f64], period: usize) -> f64 {
    math::mean(math::trailing(prices, period))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendAlignment {
    /// price > SMA20 > SMA50
    Uptrend,
    /// price < SMA20 < SMA50
    Downtrend,
    Mixed,
}

impl TrendAlignment {
    pub fn classify(price: f64, sma20: f64, sma50: f64) -> Self {
        if price > sma20 && sma20 > sma50 {
            TrendAlignment::Uptrend
        } else if price < sma20 && sma20 < sma50 {
            TrendAlignment::Downtrend
        } else {
            TrendAlignment::Mixed
        }
    }
}
