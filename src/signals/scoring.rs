//! Heuristic multipliers and confidence scoring

use crate::common::math;
use crate::indicators::momentum::{MacdCondition, RsiCondition};
use crate::indicators::trend::TrendAlignment;
use crate::indicators::volatility::{bollinger_position, daily_from_annualized, BandPosition};
use crate::models::indicators::TechnicalIndicators;

pub const BASE_CONFIDENCE: f64 = 75.0;
pub const MIN_CONFIDENCE: f64 = 55.0;
pub const MAX_CONFIDENCE: f64 = 95.0;

const TIME_DECAY_PER_DAY: f64 = 0.95;
const RSI_EXTREMITY_WEIGHT: f64 = 10.0;
const VOLUME_CONSISTENCY_WEIGHT: f64 = 5.0;
const VOLUME_LOOKBACK: usize = 10;
const VOLATILITY_NOISE_SCALE: f64 = 0.5;
/// Lower bound on the noise factor so a predicted price stays positive.
pub const MIN_VOLATILITY_ADJUSTMENT: f64 = 0.1;

/// One applied adjustment, kept for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct Adjustment {
    pub factor: &'static str,
    pub multiplier: f64,
}

/// Combine the indicator snapshot into a price multiplier.
///
/// Each rule contributes an independent factor, so the result does not
/// depend on rule order.
pub fn base_multiplier(indicators: &TechnicalIndicators, current_price: f64) -> (f64, Vec<Adjustment>) {
    let mut adjustments = Vec::new();

    match RsiCondition::classify(indicators.rsi) {
        RsiCondition::Overbought => adjustments.push(Adjustment { factor: "rsi_overbought", multiplier: 0.98 }),
        RsiCondition::Oversold => adjustments.push(Adjustment { factor: "rsi_oversold", multiplier: 1.02 }),
        RsiCondition::Neutral => {}
    }

    match MacdCondition::classify(&indicators.macd) {
        MacdCondition::Bullish => adjustments.push(Adjustment { factor: "macd_above_signal", multiplier: 1.005 }),
        MacdCondition::Bearish => adjustments.push(Adjustment { factor: "macd_below_signal", multiplier: 0.995 }),
        MacdCondition::Flat => {}
    }

    match TrendAlignment::classify(current_price, indicators.sma20, indicators.sma50) {
        TrendAlignment::Uptrend => adjustments.push(Adjustment { factor: "sma_uptrend", multiplier: 1.01 }),
        TrendAlignment::Downtrend => adjustments.push(Adjustment { factor: "sma_downtrend", multiplier: 0.99 }),
        TrendAlignment::Mixed => {}
    }

    let position = bollinger_position(current_price, &indicators.bollinger_bands);
    match BandPosition::classify(position) {
        BandPosition::NearUpper => adjustments.push(Adjustment { factor: "bollinger_upper", multiplier: 0.995 }),
        BandPosition::NearLower => adjustments.push(Adjustment { factor: "bollinger_lower", multiplier: 1.005 }),
        BandPosition::WithinRange => {}
    }

    let multiplier = adjustments.iter().map(|a| a.multiplier).product();
    (multiplier, adjustments)
}

/// `0.95^days`
pub fn time_decay(days: u32) -> f64 {
    TIME_DECAY_PER_DAY.powf(f64::from(days))
}

/// Random price adjustment scaled by realized volatility and horizon.
///
/// `noise` is expected in `[-1, 1)`. Zero volatility yields exactly 1; the
/// result never drops below [`MIN_VOLATILITY_ADJUSTMENT`].
pub fn volatility_adjustment(annualized_volatility: f64, days: u32, noise: f64) -> f64 {
    let daily = daily_from_annualized(annualized_volatility);
    let adjustment = 1.0 + noise * daily * f64::from(days).sqrt() * VOLATILITY_NOISE_SCALE;
    adjustment.max(MIN_VOLATILITY_ADJUSTMENT)
}

/// Confidence score in `[55, 95]`.
///
/// Base 75, plus up to 10 for RSI extremity, plus or minus 5 for how steady
/// recent volume has been, all scaled by the time decay.
pub fn calculate_confidence(rsi: f64, volumes: &[f64], days: u32) -> f64 {
    let rsi_term = ((rsi - 50.0).abs() / 50.0) * RSI_EXTREMITY_WEIGHT;

    let recent = math::trailing(volumes, VOLUME_LOOKBACK);
    let variation = math::coefficient_of_variation(recent).min(1.0);
    let volume_term = (1.0 - 2.0 * variation) * VOLUME_CONSISTENCY_WEIGHT;

    clamp_confidence((BASE_CONFIDENCE + rsi_term + volume_term) * time_decay(days))
}

pub fn clamp_confidence(confidence: f64) -> f64 {
    if !confidence.is_finite() {
        return MIN_CONFIDENCE;
    }
    confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}
