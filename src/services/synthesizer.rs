//! Synthetic OHLCV generator.
//!
//! Produces a plausible daily series for a symbol when no live feed is
//! available: a slow sinusoidal trend, mean reversion toward the profile's
//! base price, uniform shocks, weekday and month-end effects, and volume
//! that grows with the size of the move.

use std::f64::consts::TAU;

use chrono::{Datelike, Duration, NaiveDate, Utc};
use rand::Rng;

use crate::error::EngineError;
use crate::models::market::{AssetProfile, PricePoint, PriceSeries};
use crate::services::catalog;

const TREND_PERIOD_DAYS: f64 = 60.0;
const WEEKEND_DAMPENER: f64 = 0.3;
const MONTH_END_EFFECT: f64 = 0.001;
const MONTH_END_WINDOW_DAYS: u32 = 3;
const VOLUME_MOVE_SENSITIVITY: f64 = 25.0;
const VOLUME_JITTER: (f64, f64) = (0.7, 1.3);
const MAX_DAILY_DROP: f64 = 0.5;
const MIN_PRICE: f64 = 0.01;

/// Monday-first volume multipliers.
const WEEKDAY_VOLUME: [f64; 7] = [1.1, 1.0, 1.0, 1.0, 1.05, 0.4, 0.4];

pub struct MarketSynthesizer;

impl MarketSynthesizer {
    /// Generate `days + 1` points for `symbol` ending at `end_date`.
    ///
    /// Unknown symbols use the default profile.
    pub fn generate<R: Rng + ?Sized>(
        symbol: &str,
        days: u32,
        end_date: NaiveDate,
        rng: &mut R,
    ) -> Result<PriceSeries, EngineError> {
        Self::generate_with_profile(catalog::profile_for(symbol), days, end_date, rng)
    }

    /// [`generate`](Self::generate) ending at today's UTC date.
    pub fn generate_today<R: Rng + ?Sized>(symbol: &str, days: u32, rng: &mut R) -> Result<PriceSeries, EngineError> {
        Self::generate(symbol, days, Utc::now().date_naive(), rng)
    }

    pub fn generate_with_profile<R: Rng + ?Sized>(
        profile: &AssetProfile,
        days: u32,
        end_date: NaiveDate,
        rng: &mut R,
    ) -> Result<PriceSeries, EngineError> {
        if days == 0 {
            return Err(EngineError::InvalidHorizon(days));
        }

        let mut points = Vec::with_capacity(days as usize + 1);
        let mut price = profile.base_price;

        for step in 0..=days {
            let date = end_date - Duration::days(i64::from(days - step));
            let weekday = date.weekday().num_days_from_monday() as usize;

            let trend = profile.trend_strength * (TAU * f64::from(step) / TREND_PERIOD_DAYS).sin();
            let reversion = profile.mean_reversion * (profile.base_price - price) / profile.base_price;
            let shock = rng.gen_range(-1.0..1.0) * profile.volatility;

            let mut total_return =
                trend + reversion + shock + profile.weekday_effects[weekday] + month_end_effect(date);
            if weekday >= 5 {
                total_return *= WEEKEND_DAMPENER;
            }
            let total_return = total_return.max(-MAX_DAILY_DROP);

            let open = price;
            let close = (open * (1.0 + total_return)).max(MIN_PRICE);
            let realized = (close - open).abs();

            let high = open * (1.0 + rng.gen::<f64>() * profile.intraday_range) + rng.gen::<f64>() * realized;
            let low = open * (1.0 - rng.gen::<f64>() * profile.intraday_range) - rng.gen::<f64>() * realized;
            let high = high.max(open.max(close));
            let low = low.min(open.min(close)).max(f64::EPSILON);

            let volume = profile.base_volume as f64
                * (1.0 + total_return.abs() * VOLUME_MOVE_SENSITIVITY)
                * WEEKDAY_VOLUME[weekday]
                * rng.gen_range(VOLUME_JITTER.0..=VOLUME_JITTER.1);

            points.push(PricePoint::new(date, open, high, low, close, volume.round() as u64));
            price = close;
        }

        PriceSeries::new(points)
    }
}

/// Small positive drift over the last few calendar days of a month.
fn month_end_effect(date: NaiveDate) -> f64 {
    if days_in_month(date) - date.day() < MONTH_END_WINDOW_DAYS {
        MONTH_END_EFFECT
    } else {
        0.0
    }
}

fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}
