//! In-process boundary of the engine: search, history and prediction.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::EngineError;
use crate::metrics::Metrics;
use crate::models::market::{AssetData, PriceSeries};
use crate::models::prediction::Prediction;
use crate::services::analysis::{
    AnalysisError, AnalysisProvider, AnalysisRequest, FallbackAnalyzer, LocalHeuristicAnalyzer,
    RemoteAnalyzer,
};
use crate::services::catalog;
use crate::services::market_data::{
    FallbackMarketData, HttpMarketData, MarketDataError, MarketDataProvider, SyntheticMarketData,
};
use crate::signals::{EngineConfig, PredictionEngine};

/// Days of history fetched to build a quote for a search result.
const QUOTE_LOOKBACK_DAYS: u32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ServiceBuildError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    MarketData(#[from] MarketDataError),
}

pub struct ForecastService {
    market_data: FallbackMarketData,
    analyzer: FallbackAnalyzer,
    history_days: u32,
}

impl ForecastService {
    pub fn new(market_data: FallbackMarketData, analyzer: FallbackAnalyzer, history_days: u32) -> Self {
        Self {
            market_data,
            analyzer,
            history_days,
        }
    }

    /// Wire providers from configuration: remote analysis and live data are
    /// used when their URLs are set, the local engine and synthesizer always
    /// back them.
    pub fn from_config(config: &Config, metrics: Option<Arc<Metrics>>) -> Result<Self, ServiceBuildError> {
        let engine = PredictionEngine::new(EngineConfig {
            trend_threshold_pct: config.trend_threshold_pct,
        });

        let local = match config.rng_seed {
            Some(seed) => LocalHeuristicAnalyzer::with_seed(engine.clone(), seed),
            None => LocalHeuristicAnalyzer::new(engine.clone()),
        };

        let remote: Option<Arc<dyn AnalysisProvider>> = match &config.remote_analysis_url {
            Some(url) => Some(Arc::new(RemoteAnalyzer::new(
                url.clone(),
                config.remote_timeout_ms,
                engine,
            )?)),
            None => None,
        };

        let live: Option<Arc<dyn MarketDataProvider>> = match &config.live_data_url {
            Some(url) => Some(Arc::new(HttpMarketData::new(url.clone(), config.remote_timeout_ms)?)),
            None => None,
        };

        let synthetic = match config.rng_seed {
            Some(seed) => SyntheticMarketData::with_seed(seed),
            None => SyntheticMarketData::new(),
        };

        let mut analyzer = FallbackAnalyzer::new(remote, local);
        let mut market_data = FallbackMarketData::new(live, synthetic);
        if let Some(metrics) = metrics {
            analyzer = analyzer.with_metrics(metrics.clone());
            market_data = market_data.with_metrics(metrics);
        }

        info!(
            remote_analysis = config.remote_analysis_url.is_some(),
            live_data = config.live_data_url.is_some(),
            "Forecast service configured"
        );

        Ok(Self::new(market_data, analyzer, config.history_days))
    }

    /// Quote for a known symbol; `None` when the catalog does not list it.
    pub async fn search_asset(&self, symbol: &str) -> Option<AssetData> {
        let entry = catalog::lookup(symbol)?;
        match self.market_data.history(entry.symbol, QUOTE_LOOKBACK_DAYS).await {
            Ok(series) => Some(catalog::asset_data(entry, &series)),
            Err(e) => {
                warn!(error = %e, symbol = entry.symbol, "Could not build quote");
                None
            }
        }
    }

    pub async fn get_extended_history(&self, symbol: &str, days: u32) -> Result<PriceSeries, EngineError> {
        self.market_data
            .history(&catalog::normalize_symbol(symbol), days)
            .await
    }

    pub async fn generate_prediction(
        &self,
        symbol: &str,
        series: &PriceSeries,
        horizon_days: u32,
    ) -> Result<Prediction, EngineError> {
        let request = AnalysisRequest {
            symbol: catalog::normalize_symbol(symbol),
            series: series.clone(),
            horizon_days,
        };
        self.analyzer.analyze(&request).await
    }

    /// History fetch followed by prediction.
    pub async fn forecast(&self, symbol: &str, horizon_days: u32) -> Result<Prediction, EngineError> {
        let series = self.get_extended_history(symbol, self.history_days).await?;
        self.generate_prediction(symbol, &series, horizon_days).await
    }
}
