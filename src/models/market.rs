//! Market data models: price points, series and per-asset reference data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// One trading-day observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// `low ≤ open,close ≤ high` with every price positive and finite.
    pub fn is_consistent(&self) -> bool {
        let prices = [self.open, self.high, self.low, self.close];
        if prices.iter().any(|p| !p.is_finite() || *p <= 0.0) {
            return false;
        }
        self.low <= self.open.min(self.close) && self.high >= self.open.max(self.close)
    }
}

/// Ordered, validated sequence of [`PricePoint`]s (oldest first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Validate and wrap a list of points.
    ///
    /// Rejects empty input, non-ascending dates and points violating the
    /// OHLC invariant.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, EngineError> {
        if points.is_empty() {
            return Err(EngineError::InvalidSeries("series is empty".to_string()));
        }

        for (i, point) in points.iter().enumerate() {
            if !point.is_consistent() {
                return Err(EngineError::InvalidSeries(format!(
                    "point {} ({}) violates low <= open,close <= high",
                    i, point.date
                )));
            }
        }

        if let Some(pair) = points.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(EngineError::InvalidSeries(format!(
                "dates not strictly ascending: {} followed by {}",
                pair[0].date, pair[1].date
            )));
        }

        Ok(Self { points })
    }

    /// Build a series from closing prices alone, one point per calendar day
    /// ending at `end_date`. Open, high and low equal the close.
    pub fn from_closes(closes: &[f64], end_date: NaiveDate, volume: u64) -> Result<Self, EngineError> {
        let count = closes.len() as i64;
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                let date = end_date - chrono::Duration::days(count - 1 - i as i64);
                PricePoint::new(date, close, close, close, close, volume)
            })
            .collect();
        Self::new(points)
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent point. A series is never empty.
    pub fn last(&self) -> &PricePoint {
        &self.points[self.points.len() - 1]
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.low).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.volume as f64).collect()
    }
}

impl TryFrom<Vec<PricePoint>> for PriceSeries {
    type Error = EngineError;

    fn try_from(points: Vec<PricePoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(series: PriceSeries) -> Self {
        series.points
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Stock,
    Etf,
    Crypto,
    Index,
}

/// Static simulation parameters for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetProfile {
    pub base_price: f64,
    /// Daily volatility coefficient (fraction of price).
    pub volatility: f64,
    pub trend_strength: f64,
    pub mean_reversion: f64,
    /// Maximum intraday excursion as a fraction of the open.
    pub intraday_range: f64,
    /// Additive daily return per weekday, Monday first.
    pub weekday_effects: [f64; 7],
    pub base_volume: u64,
}

/// Search result for a known symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetData {
    pub symbol: String,
    pub name: String,
    pub asset_class: AssetClass,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub previous_close: f64,
    pub volume: u64,
}
