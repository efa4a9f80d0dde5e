//! Realized (historical) volatility

use crate::common::math;

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Standard deviation of log returns, annualized, in percent.
///
/// Fewer than two prices yield 0.
pub fn calculate_annualized_volatility(prices: &[f64]) -> f64 {
    if prices.len() < 2 {
        return 0.0;
    }
    let returns = math::log_returns(prices);
    math::population_std_dev(&returns) * TRADING_DAYS_PER_YEAR.sqrt() * 100.0
}

/// Daily volatility (fraction) implied by an annualized percentage.
pub fn daily_from_annualized(annualized_pct: f64) -> f64 {
    annualized_pct / 100.0 / TRADING_DAYS_PER_YEAR.sqrt()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolatilityTier {
    High,
    Moderate,
    Low,
}

impl VolatilityTier {
    pub fn classify(annualized_pct: f64) -> Self {
        if annualized_pct > 40.0 {
            VolatilityTier::High
        } else if annualized_pct > 20.0 {
            VolatilityTier::Moderate
        } else {
            VolatilityTier::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VolatilityTier::High => "high",
            VolatilityTier::Moderate => "moderate",
            VolatilityTier::Low => "low",
        }
    }
}
