//! RSI (Relative Strength Index) indicator

/// Neutral value returned when there is not enough history.
pub const NEUTRAL_RSI: f64 = 50.0;

/// Calculate RSI with Wilder's smoothing
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// The first averages cover the first `period` changes; every later change
/// is folded in with weight `1 / period`. A zero average loss is replaced
/// by 1. A series with neither gains nor losses reads as neutral.
pub fn calculate_rsi(prices: &[f64], period: usize) -> f64 {
    if period == 0 || prices.len() < period + 1 {
        return NEUTRAL_RSI;
    }

    let changes: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();

    let (seed, rest) = changes.split_at(period);
    let mut avg_gain = seed.iter().filter(|c| **c > 0.0).sum::<f64>() / period as f64;
    let mut avg_loss = seed.iter().filter(|c| **c < 0.0).map(|c| -c).sum::<f64>() / period as f64;

    for change in rest {
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);
        avg_gain = (avg_gain * (period as f64 - 1.0) + gain) / period as f64;
        avg_loss = (avg_loss * (period as f64 - 1.0) + loss) / period as f64;
    }

    if avg_gain == 0.0 && avg_loss == 0.0 {
        return NEUTRAL_RSI;
    }

    let divisor = if avg_loss == 0.0 { 1.0 } else { avg_loss };
    let rs = avg_gain / divisor;
    100.0 - (100.0 / (1.0 + rs))
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(prices: &[f64]) -> f64 {
    calculate_rsi(prices, 14)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsiCondition {
    Overbought,
    Oversold,
    Neutral,
}

impl RsiCondition {
    pub fn classify(rsi: f64) -> Self {
        if rsi > 70.0 {
            RsiCondition::Overbought
        } else if rsi < 30.0 {
            RsiCondition::Oversold
        } else {
            RsiCondition::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RsiCondition::Overbought => "overbought",
            RsiCondition::Oversold => "oversold",
            RsiCondition::Neutral => "neutral",
        }
    }
}
