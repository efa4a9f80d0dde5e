//! Templated rationale for a prediction

use crate::indicators::momentum::{MacdCondition, RsiCondition};
use crate::indicators::volatility::{bollinger_position, BandPosition, VolatilityTier};
use crate::models::indicators::TechnicalIndicators;
use crate::models::prediction::Trend;

pub struct ExplanationInput<'a> {
    pub symbol: &'a str,
    pub days: u32,
    pub current_price: f64,
    pub predicted_price: f64,
    pub change_percent: f64,
    pub confidence: f64,
    pub trend: Trend,
    pub indicators: &'a TechnicalIndicators,
}

pub fn build_explanation(input: &ExplanationInput<'_>) -> String {
    let indicators = input.indicators;
    let rsi_label = RsiCondition::classify(indicators.rsi).label();
    let macd_label = MacdCondition::classify(&indicators.macd).label();
    let volatility_label = VolatilityTier::classify(indicators.volatility).label();
    let band_label = BandPosition::classify(bollinger_position(
        input.current_price,
        &indicators.bollinger_bands,
    ))
    .label();

    format!(
        "Technical analysis for {symbol} over the next {days} day{plural} points to a {trend} outlook. \
         RSI at {rsi:.1} reads {rsi_label}, and MACD momentum is {macd_label} \
         (MACD {macd:.4} vs signal {signal:.4}). Volatility is {volatility_label} at \
         {volatility:.1}% annualized, with price trading {band_label} of the Bollinger Bands. \
         Projected price ${predicted:.2} ({change:+.2}%) from ${current:.2}, \
         confidence {confidence:.0}%.",
        symbol = input.symbol,
        days = input.days,
        plural = if input.days == 1 { "" } else { "s" },
        trend = input.trend.as_str(),
        rsi = indicators.rsi,
        macd = indicators.macd.macd,
        signal = indicators.macd.signal,
        volatility = indicators.volatility,
        predicted = input.predicted_price,
        change = input.change_percent,
        current = input.current_price,
        confidence = input.confidence,
    )
}
