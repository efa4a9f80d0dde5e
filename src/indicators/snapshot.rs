//! Full indicator snapshot for a series.

use crate::indicators::momentum::{calculate_macd, calculate_rsi_default};
use crate::indicators::trend::{calculate_ema, calculate_sma};
use crate::indicators::volatility::{calculate_annualized_volatility, calculate_bollinger_bands_default};
use crate::models::indicators::TechnicalIndicators;
use crate::models::market::PriceSeries;

impl TechnicalIndicators {
    /// Compute every indicator at the most recent point of `series`.
    pub fn from_series(series: &PriceSeries) -> Self {
        Self::from_closes(&series.closes())
    }

    pub fn from_closes(closes: &[f64]) -> Self {
        Self {
            rsi: calculate_rsi_default(closes),
            macd: calculate_macd(closes),
            sma20: calculate_sma(closes, 20),
            sma50: calculate_sma(closes, 50),
            ema12: calculate_ema(closes, 12),
            ema26: calculate_ema(closes, 26),
            bollinger_bands: calculate_bollinger_bands_default(closes),
            volatility: calculate_annualized_volatility(closes),
        }
    }
}
