//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::config::Config;
use crate::error::EngineError;
use crate::metrics::Metrics;
use crate::models::market::{AssetData, PriceSeries};
use crate::models::prediction::Prediction;
use crate::services::catalog;
use crate::services::forecast::ForecastService;
use crate::watchlist::{
    InMemoryWatchlist, JsonFileWatchlist, Watchlist, WatchlistError, WatchlistItem, WatchlistRepository,
};

const MAX_HISTORY_DAYS: u32 = 365;

type ApiError = (StatusCode, Json<Value>);
type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub service: Arc<ForecastService>,
    pub watchlist: Arc<Watchlist>,
    pub default_horizon_days: u32,
    pub history_days: u32,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

fn engine_error(e: EngineError) -> ApiError {
    api_error(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
}

/// Run a watchlist mutation on the blocking pool; file-backed saves do
/// synchronous I/O.
async fn with_watchlist<T, F>(watchlist: &Arc<Watchlist>, op: F) -> Result<T, ApiError>
where
    F: FnOnce(&Watchlist) -> Result<T, WatchlistError> + Send + 'static,
    T: Send + 'static,
{
    let watchlist = watchlist.clone();
    let result = tokio::task::spawn_blocking(move || op(&watchlist))
        .await
        .map_err(|e| {
            error!(error = %e, "Watchlist task failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "watchlist task failed")
        })?;

    result.map_err(|e| {
        error!(error = %e, "Failed to save watchlist");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "failed to save watchlist")
    })
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "equitypath-engine"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

/// Quote for a known symbol
async fn get_asset(State(state): State<AppState>, Path(symbol): Path<String>) -> ApiResult<AssetData> {
    state
        .service
        .search_asset(&symbol)
        .await
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("unknown symbol: {}", symbol)))
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    days: Option<u32>,
}

/// Daily history, live or synthesized
async fn get_history(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(params): Query<HistoryQuery>,
) -> ApiResult<PriceSeries> {
    let days = params.days.unwrap_or(state.history_days);
    if days > MAX_HISTORY_DAYS {
        return Err(api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("days must be at most {}", MAX_HISTORY_DAYS),
        ));
    }

    state
        .service
        .get_extended_history(&symbol, days)
        .await
        .map(Json)
        .map_err(engine_error)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PredictionRequest {
    symbol: String,
    days: Option<u32>,
    /// Caller-supplied history; fetched when absent.
    series: Option<PriceSeries>,
}

/// Forecast a symbol
async fn create_prediction(
    State(state): State<AppState>,
    Json(request): Json<PredictionRequest>,
) -> ApiResult<Prediction> {
    let days = request.days.unwrap_or(state.default_horizon_days);

    let result = match &request.series {
        Some(series) => {
            state
                .service
                .generate_prediction(&request.symbol, series, days)
                .await
        }
        None => state.service.forecast(&request.symbol, days).await,
    };

    let prediction = result.map_err(|e| {
        info!(error = %e, symbol = %request.symbol, "Prediction rejected");
        engine_error(e)
    })?;

    let cached = prediction.clone();
    if with_watchlist(&state.watchlist, move |w| w.update_prediction(&cached))
        .await
        .is_err()
    {
        error!(symbol = %prediction.symbol, "Failed to cache prediction on watchlist");
    }

    Ok(Json(prediction))
}

async fn list_watchlist(State(state): State<AppState>) -> Json<Vec<WatchlistItem>> {
    Json(state.watchlist.items())
}

#[derive(Debug, Deserialize)]
struct WatchlistRequest {
    symbol: String,
}

/// Add a catalog symbol to the watchlist
async fn add_to_watchlist(
    State(state): State<AppState>,
    Json(request): Json<WatchlistRequest>,
) -> Result<(StatusCode, Json<WatchlistItem>), ApiError> {
    let entry = catalog::lookup(&request.symbol).ok_or_else(|| {
        api_error(StatusCode::NOT_FOUND, format!("unknown symbol: {}", request.symbol))
    })?;

    let item = WatchlistItem::new(entry.symbol, entry.name);
    let to_add = item.clone();
    let added = with_watchlist(&state.watchlist, move |w| w.add(to_add)).await?;

    if !added {
        return Err(api_error(
            StatusCode::CONFLICT,
            format!("{} is already on the watchlist", entry.symbol),
        ));
    }

    Ok((StatusCode::CREATED, Json(item)))
}

/// Remove a symbol from the watchlist
async fn remove_from_watchlist(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<StatusCode, ApiError> {
    let symbol = catalog::normalize_symbol(&symbol);
    let target = symbol.clone();
    let removed = with_watchlist(&state.watchlist, move |w| w.remove(&target)).await?;

    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(api_error(
            StatusCode::NOT_FOUND,
            format!("{} is not on the watchlist", symbol),
        ))
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/assets/{symbol}", get(get_asset))
        .route("/api/history/{symbol}", get(get_history))
        .route("/api/predictions", post(create_prediction))
        .route("/api/watchlist", get(list_watchlist).post(add_to_watchlist))
        .route("/api/watchlist/{symbol}", delete(remove_from_watchlist))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Build application state from configuration.
pub fn build_state(config: &Config) -> Result<AppState, Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let service = ForecastService::from_config(config, Some(metrics.clone()))?;

    let repository: Box<dyn WatchlistRepository> = match &config.watchlist_path {
        Some(path) => {
            info!(path = %path.display(), "Using JSON file watchlist");
            Box::new(JsonFileWatchlist::new(path.clone()))
        }
        None => Box::new(InMemoryWatchlist::new()),
    };

    Ok(AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics,
        start_time: Arc::new(Instant::now()),
        service: Arc::new(service),
        watchlist: Arc::new(Watchlist::open(repository)?),
        default_horizon_days: config.default_horizon_days,
        history_days: config.history_days,
    })
}

pub async fn start_server(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state(config)?;
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        config.port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
