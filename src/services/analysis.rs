//! Analysis providers.
//!
//! A remote LLM-backed service and the local heuristic engine implement the
//! same trait; [`FallbackAnalyzer`] prefers the remote one and answers with
//! the local engine whenever the remote call fails in any way.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::EngineError;
use crate::metrics::Metrics;
use crate::models::indicators::TechnicalIndicators;
use crate::models::market::{PricePoint, PriceSeries};
use crate::models::prediction::{Prediction, PredictionSource};
use crate::signals::{ExternalEstimate, PredictionEngine};

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("remote analysis request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote analysis returned status {0}")]
    Status(u16),

    #[error("malformed remote analysis: {0}")]
    Malformed(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub symbol: String,
    pub series: PriceSeries,
    pub horizon_days: u32,
}

#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    fn source(&self) -> PredictionSource;

    async fn analyze(&self, request: &AnalysisRequest) -> Result<Prediction, AnalysisError>;
}

/// The heuristic engine with its own seedable random source.
pub struct LocalHeuristicAnalyzer {
    engine: PredictionEngine,
    rng: Mutex<StdRng>,
}

impl LocalHeuristicAnalyzer {
    pub fn new(engine: PredictionEngine) -> Self {
        Self {
            engine,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_seed(engine: PredictionEngine, seed: u64) -> Self {
        Self {
            engine,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn engine(&self) -> &PredictionEngine {
        &self.engine
    }

    pub fn predict(&self, request: &AnalysisRequest) -> Result<Prediction, EngineError> {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.engine
            .predict(&request.symbol, &request.series, request.horizon_days, &mut *rng)
    }
}

#[async_trait]
impl AnalysisProvider for LocalHeuristicAnalyzer {
    fn source(&self) -> PredictionSource {
        PredictionSource::Local
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<Prediction, AnalysisError> {
        Ok(self.predict(request)?)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RemoteAnalysisBody<'a> {
    symbol: &'a str,
    current_price: f64,
    historical_data: &'a [PricePoint],
    market_context: MarketContext<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MarketContext<'a> {
    horizon_days: u32,
    indicators: &'a TechnicalIndicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteAnalysisResponse {
    predicted_price: f64,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    explanation: Option<String>,
}

/// Client for the remote analysis endpoint.
///
/// The response only has to carry `predictedPrice`; indicators, levels and
/// targets are filled in locally.
pub struct RemoteAnalyzer {
    client: reqwest::Client,
    endpoint: Url,
    engine: PredictionEngine,
}

impl RemoteAnalyzer {
    pub fn new(endpoint: Url, timeout_ms: u64, engine: PredictionEngine) -> Result<Self, AnalysisError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self::with_client(endpoint, client, engine))
    }

    pub fn with_client(endpoint: Url, client: reqwest::Client, engine: PredictionEngine) -> Self {
        Self {
            client,
            endpoint,
            engine,
        }
    }
}

#[async_trait]
impl AnalysisProvider for RemoteAnalyzer {
    fn source(&self) -> PredictionSource {
        PredictionSource::Remote
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<Prediction, AnalysisError> {
        self.engine.validate(&request.series, request.horizon_days)?;

        let indicators = TechnicalIndicators::from_series(&request.series);
        let body = RemoteAnalysisBody {
            symbol: &request.symbol,
            current_price: request.series.last().close,
            historical_data: request.series.points(),
            market_context: MarketContext {
                horizon_days: request.horizon_days,
                indicators: &indicators,
            },
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AnalysisError::Status(response.status().as_u16()));
        }

        let text = response.text().await?;
        let parsed: RemoteAnalysisResponse =
            serde_json::from_str(&text).map_err(|e| AnalysisError::Malformed(e.to_string()))?;

        if !parsed.predicted_price.is_finite() || parsed.predicted_price <= 0.0 {
            return Err(AnalysisError::Malformed(format!(
                "predictedPrice must be positive, got {}",
                parsed.predicted_price
            )));
        }

        debug!(
            symbol = %request.symbol,
            predicted_price = parsed.predicted_price,
            "Remote analysis received"
        );

        Ok(self.engine.compose(
            &request.symbol,
            &request.series,
            request.horizon_days,
            indicators,
            ExternalEstimate {
                predicted_price: parsed.predicted_price,
                confidence: parsed.confidence.filter(|c| c.is_finite()),
                explanation: parsed.explanation.filter(|e| !e.trim().is_empty()),
            },
            PredictionSource::Remote,
        ))
    }
}

/// Remote first, local heuristic on any remote failure.
///
/// Only the local engine's own precondition (too few points, zero horizon)
/// reaches the caller.
pub struct FallbackAnalyzer {
    remote: Option<Arc<dyn AnalysisProvider>>,
    local: LocalHeuristicAnalyzer,
    metrics: Option<Arc<Metrics>>,
}

impl FallbackAnalyzer {
    pub fn new(remote: Option<Arc<dyn AnalysisProvider>>, local: LocalHeuristicAnalyzer) -> Self {
        Self {
            remote,
            local,
            metrics: None,
        }
    }

    pub fn local_only(local: LocalHeuristicAnalyzer) -> Self {
        Self::new(None, local)
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<Prediction, EngineError> {
        self.local
            .engine()
            .validate(&request.series, request.horizon_days)?;

        if let Some(remote) = &self.remote {
            match remote.analyze(request).await {
                Ok(prediction) => {
                    self.record(prediction.source);
                    return Ok(prediction);
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        symbol = %request.symbol,
                        "Remote analysis failed, falling back to local heuristic"
                    );
                    if let Some(metrics) = &self.metrics {
                        metrics.remote_analysis_failures_total.inc();
                    }
                }
            }
        }

        let prediction = self.local.predict(request)?;
        info!(
            symbol = %prediction.symbol,
            trend = prediction.trend.as_str(),
            confidence = prediction.confidence,
            "Local prediction generated"
        );
        self.record(prediction.source);
        Ok(prediction)
    }

    fn record(&self, source: PredictionSource) {
        if let Some(metrics) = &self.metrics {
            let label = match source {
                PredictionSource::Local => "local",
                PredictionSource::Remote => "remote",
            };
            metrics.predictions_total.with_label_values(&[label]).inc();
        }
    }
}
