//! Bollinger Bands indicator

use crate::common::math;
use crate::indicators::trend::calculate_sma;
use crate::models::indicators::BollingerBands;

/// Calculate Bollinger Bands
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * standard deviation)
/// Lower Band = Middle - (std_dev * standard deviation)
///
/// The deviation is the population standard deviation of the same trailing
/// window the SMA uses.
pub fn calculate_bollinger_bands(prices: &[f64], period: usize, std_dev: f64) -> BollingerBands {
    let middle = calculate_sma(prices, period);
    let std = math::population_std_dev(math::trailing(prices, period));

    BollingerBands {
        upper: middle + std_dev * std,
        middle,
        lower: middle - std_dev * std,
    }
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_bands_default(prices: &[f64]) -> BollingerBands {
    calculate_bollinger_bands(prices, 20, 2.0)
}

/// Position of `price` inside the bands: 0 at the lower band, 1 at the upper.
///
/// Collapsed bands place every price at the midpoint.
pub fn bollinger_position(price: f64, bands: &BollingerBands) -> f64 {
    let width = bands.width();
    if width <= bands.middle.abs() * 1e-12 {
        return 0.5;
    }
    (price - bands.lower) / width
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandPosition {
    NearUpper,
    NearLower,
    WithinRange,
}

impl BandPosition {
    pub fn classify(position: f64) -> Self {
        if position > 0.8 {
            BandPosition::NearUpper
        } else if position < 0.2 {
            BandPosition::NearLower
        } else {
            BandPosition::WithinRange
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BandPosition::NearUpper => "near the upper band",
            BandPosition::NearLower => "near the lower band",
            BandPosition::WithinRange => "within range",
        }
    }
}
