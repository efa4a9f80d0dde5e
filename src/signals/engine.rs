//! Prediction combinator: indicator snapshot to forecast.

use chrono::Utc;
use rand::Rng;
use tracing::debug;

use crate::error::EngineError;
use crate::indicators::structure::calculate_support_resistance_default;
use crate::models::indicators::TechnicalIndicators;
use crate::models::market::PriceSeries;
use crate::models::prediction::{Prediction, PredictionSource, PriceTargets, Trend};
use crate::signals::explanation::{build_explanation, ExplanationInput};
use crate::signals::scoring;

pub const MIN_POINTS: usize = 5;
/// Longest forecast horizon accepted, in days.
pub const MAX_HORIZON_DAYS: u32 = 365;
pub const DEFAULT_TREND_THRESHOLD_PCT: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Moves smaller than this (percent, absolute) are classified neutral.
    pub trend_threshold_pct: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trend_threshold_pct: DEFAULT_TREND_THRESHOLD_PCT,
        }
    }
}

/// Prediction values produced outside the local heuristic.
pub struct ExternalEstimate {
    pub predicted_price: f64,
    pub confidence: Option<f64>,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PredictionEngine {
    config: EngineConfig,
}

impl PredictionEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Reject series shorter than [`MIN_POINTS`] and horizons outside
    /// `1..=MAX_HORIZON_DAYS`.
    pub fn validate(&self, series: &PriceSeries, days: u32) -> Result<(), EngineError> {
        if series.len() < MIN_POINTS {
            return Err(EngineError::InsufficientData {
                required: MIN_POINTS,
                actual: series.len(),
            });
        }
        if days == 0 || days > MAX_HORIZON_DAYS {
            return Err(EngineError::InvalidHorizon(days));
        }
        Ok(())
    }

    /// Forecast `symbol` `days` ahead from `series`.
    ///
    /// The indicator math is deterministic; only the final volatility
    /// adjustment draws from `rng`.
    pub fn predict<R: Rng + ?Sized>(
        &self,
        symbol: &str,
        series: &PriceSeries,
        days: u32,
        rng: &mut R,
    ) -> Result<Prediction, EngineError> {
        self.validate(series, days)?;

        let current_price = series.last().close;
        let indicators = TechnicalIndicators::from_series(series);

        let (multiplier, adjustments) = scoring::base_multiplier(&indicators, current_price);
        let noise = rng.gen_range(-1.0..1.0);
        let volatility_adjustment = scoring::volatility_adjustment(indicators.volatility, days, noise);
        let predicted_price = current_price * multiplier * volatility_adjustment;

        debug!(
            symbol = symbol,
            days = days,
            multiplier = multiplier,
            volatility_adjustment = volatility_adjustment,
            adjustments = ?adjustments,
            "Combined indicator adjustments"
        );

        Ok(self.compose(
            symbol,
            series,
            days,
            indicators,
            ExternalEstimate {
                predicted_price,
                confidence: None,
                explanation: None,
            },
            PredictionSource::Local,
        ))
    }

    /// Assemble the full record around a predicted price.
    ///
    /// Confidence defaults to the local score and is always clamped; the
    /// trend is re-derived from the change so every source uses the same
    /// threshold.
    pub fn compose(
        &self,
        symbol: &str,
        series: &PriceSeries,
        days: u32,
        indicators: TechnicalIndicators,
        estimate: ExternalEstimate,
        source: PredictionSource,
    ) -> Prediction {
        let current_price = series.last().close;
        let predicted_price = estimate.predicted_price;
        let change_percent = (predicted_price - current_price) / current_price * 100.0;
        let trend = Trend::from_change(change_percent, self.config.trend_threshold_pct);

        let confidence = match estimate.confidence {
            Some(confidence) => scoring::clamp_confidence(confidence),
            None => scoring::calculate_confidence(indicators.rsi, &series.volumes(), days),
        };

        let levels = calculate_support_resistance_default(series);

        let explanation = estimate.explanation.unwrap_or_else(|| {
            build_explanation(&ExplanationInput {
                symbol,
                days,
                current_price,
                predicted_price,
                change_percent,
                confidence,
                trend,
                indicators: &indicators,
            })
        });

        Prediction {
            symbol: symbol.to_string(),
            timeframe: days,
            current_price,
            predicted_price,
            confidence,
            change_percent,
            trend,
            explanation,
            technical_factors: indicators,
            support_level: levels.support_level,
            resistance_level: levels.resistance_level,
            price_targets: PriceTargets::from_move(current_price, predicted_price),
            source,
            generated_at: Utc::now(),
        }
    }
}
