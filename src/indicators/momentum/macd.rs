//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::indicators::trend::calculate_ema;
use crate::models::indicators::MacdIndicator;

const FAST_PERIOD: usize = 12;
const SLOW_PERIOD: usize = 26;
const SIGNAL_PERIOD: usize = 9;
const CROSSOVER_THRESHOLD: f64 = 1e-9;

/// Calculate MACD indicator
///
/// MACD = EMA(12) - EMA(26)
/// Signal = EMA(9) of the MACD history, which starts at index 25
/// Histogram = MACD - Signal
///
/// With fewer than 26 prices there is no history yet and the signal line
/// equals the MACD line.
pub fn calculate_macd(prices: &[f64]) -> MacdIndicator {
    let macd_line = calculate_ema(prices, FAST_PERIOD) - calculate_ema(prices, SLOW_PERIOD);
    let history = macd_history(prices);

    let signal = if history.is_empty() {
        macd_line
    } else {
        calculate_ema(&history, SIGNAL_PERIOD)
    };

    MacdIndicator {
        macd: macd_line,
        signal,
        histogram: macd_line - signal,
    }
}

/// MACD value at every index from `SLOW_PERIOD - 1` onward.
///
/// Both EMAs are seeded with the first price, so the running recurrence
/// yields the same values as recomputing each prefix.
pub fn macd_history(prices: &[f64]) -> Vec<f64> {
    let Some(&first) = prices.first() else {
        return Vec::new();
    };

    let mut fast = first;
    let mut slow = first;
    let mut history = Vec::with_capacity(prices.len().saturating_sub(SLOW_PERIOD - 1));

    for (i, &price) in prices.iter().enumerate().skip(1) {
        fast = math::ema_from_previous(price, fast, FAST_PERIOD);
        slow = math::ema_from_previous(price, slow, SLOW_PERIOD);
        if i >= SLOW_PERIOD - 1 {
            history.push(fast - slow);
        }
    }

    history
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdCondition {
    Bullish,
    Bearish,
    /// MACD line on the signal line, e.g. a flat series.
    Flat,
}

impl MacdCondition {
    pub fn classify(macd: &MacdIndicator) -> Self {
        let diff = macd.macd - macd.signal;
        if diff.abs() < CROSSOVER_THRESHOLD {
            MacdCondition::Flat
        } else if diff > 0.0 {
            MacdCondition::Bullish
        } else {
            MacdCondition::Bearish
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MacdCondition::Bullish => "bullish",
            MacdCondition::Bearish => "bearish",
            MacdCondition::Flat => "flat",
        }
    }
}
