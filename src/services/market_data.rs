//! Market data providers: live history over HTTP, the synthesizer, and a
//! fallback wrapper that never surfaces a live-feed failure.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::error::EngineError;
use crate::metrics::Metrics;
use crate::models::market::{PricePoint, PriceSeries};
use crate::services::synthesizer::MarketSynthesizer;

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("market data request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("market data service returned status {0}")]
    Status(u16),

    #[error("market data endpoint cannot take a path: {0}")]
    Endpoint(Url),

    #[error("symbol cannot be used as a path segment: {0:?}")]
    InvalidSymbol(String),

    #[error(transparent)]
    Series(#[from] EngineError),
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily history for `symbol` covering the last `days` days.
    async fn history(&self, symbol: &str, days: u32) -> Result<PriceSeries, MarketDataError>;
}

/// Synthesizer-backed provider. Only fails for a zero-day request.
pub struct SyntheticMarketData {
    rng: Mutex<StdRng>,
    end_date: Option<NaiveDate>,
}

impl SyntheticMarketData {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
            end_date: None,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            end_date: None,
        }
    }

    /// Pin the last generated date instead of using today.
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn generate(&self, symbol: &str, days: u32) -> Result<PriceSeries, EngineError> {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        match self.end_date {
            Some(end_date) => MarketSynthesizer::generate(symbol, days, end_date, &mut *rng),
            None => MarketSynthesizer::generate_today(symbol, days, &mut *rng),
        }
    }
}

impl Default for SyntheticMarketData {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for SyntheticMarketData {
    async fn history(&self, symbol: &str, days: u32) -> Result<PriceSeries, MarketDataError> {
        Ok(self.generate(symbol, days)?)
    }
}

/// Live history client.
///
/// `GET {base}/history/{symbol}?days=N` returning a JSON array of price
/// points, oldest first.
pub struct HttpMarketData {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpMarketData {
    pub fn new(base_url: Url, timeout_ms: u64) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: Url, client: reqwest::Client) -> Self {
        Self { client, base_url }
    }

    /// `{base}/history/{symbol}` with the symbol as one escaped segment.
    ///
    /// `/`, `?`, `#` and `%` are percent-encoded; empty, `.` and `..`
    /// symbols are rejected since they would address another path.
    pub fn history_url(&self, symbol: &str) -> Result<Url, MarketDataError> {
        if matches!(symbol, "" | "." | "..") {
            return Err(MarketDataError::InvalidSymbol(symbol.to_string()));
        }

        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| MarketDataError::Endpoint(self.base_url.clone()))?
            .pop_if_empty()
            .push("history")
            .push(symbol);
        Ok(url)
    }
}

#[async_trait]
impl MarketDataProvider for HttpMarketData {
    async fn history(&self, symbol: &str, days: u32) -> Result<PriceSeries, MarketDataError> {
        let url = self.history_url(symbol)?;

        let response = self
            .client
            .get(url)
            .query(&[("days", days)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MarketDataError::Status(response.status().as_u16()));
        }

        let points: Vec<PricePoint> = response.json().await?;
        debug!(symbol = symbol, points = points.len(), "Fetched live history");
        Ok(PriceSeries::new(points)?)
    }
}

/// Live history when configured, the synthesizer otherwise or on any
/// live failure.
pub struct FallbackMarketData {
    live: Option<Arc<dyn MarketDataProvider>>,
    synthetic: SyntheticMarketData,
    metrics: Option<Arc<Metrics>>,
}

impl FallbackMarketData {
    pub fn new(live: Option<Arc<dyn MarketDataProvider>>, synthetic: SyntheticMarketData) -> Self {
        Self {
            live,
            synthetic,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub async fn history(&self, symbol: &str, days: u32) -> Result<PriceSeries, EngineError> {
        if days == 0 {
            return Err(EngineError::InvalidHorizon(days));
        }

        if let Some(live) = &self.live {
            match live.history(symbol, days).await {
                Ok(series) => return Ok(series),
                Err(e) => {
                    warn!(error = %e, symbol = symbol, "Live history unavailable, using synthesized data");
                    if let Some(metrics) = &self.metrics {
                        metrics.market_data_fallbacks_total.inc();
                    }
                }
            }
        }

        self.synthetic.generate(symbol, days)
    }
}
