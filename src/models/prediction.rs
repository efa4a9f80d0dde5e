//! Forecast output record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::indicators::TechnicalIndicators;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

impl Trend {
    /// Classify a percentage move: neutral inside `±threshold_pct`, otherwise
    /// by sign.
    pub fn from_change(change_percent: f64, threshold_pct: f64) -> Self {
        if change_percent.abs() < threshold_pct {
            Trend::Neutral
        } else if change_percent > 0.0 {
            Trend::Bullish
        } else {
            Trend::Bearish
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Bullish => "bullish",
            Trend::Bearish => "bearish",
            Trend::Neutral => "neutral",
        }
    }
}

/// Which analyzer produced a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionSource {
    Local,
    Remote,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceTargets {
    pub conservative: f64,
    pub moderate: f64,
    pub aggressive: f64,
}

impl PriceTargets {
    /// 30 %, 60 % and 100 % of the predicted move.
    pub fn from_move(current_price: f64, predicted_price: f64) -> Self {
        let delta = predicted_price - current_price;
        Self {
            conservative: current_price + delta * 0.3,
            moderate: current_price + delta * 0.6,
            aggressive: predicted_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub symbol: String,
    /// Horizon in days.
    pub timeframe: u32,
    pub current_price: f64,
    pub predicted_price: f64,
    pub confidence: f64,
    pub change_percent: f64,
    pub trend: Trend,
    pub explanation: String,
    pub technical_factors: TechnicalIndicators,
    pub support_level: f64,
    pub resistance_level: f64,
    pub price_targets: PriceTargets,
    pub source: PredictionSource,
    pub generated_at: DateTime<Utc>,
}
