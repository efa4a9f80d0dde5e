//! Integration tests for the remote analyzer against a mocked endpoint

use std::sync::Arc;

use chrono::NaiveDate;
use equitypath::metrics::Metrics;
use equitypath::models::{PredictionSource, PriceSeries};
use equitypath::services::{AnalysisProvider, AnalysisRequest, FallbackAnalyzer, LocalHeuristicAnalyzer, RemoteAnalyzer};
use equitypath::signals::PredictionEngine;
use equitypath::EngineError;
use serde_json::{json, Value};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TestAnalyzer {
    server: MockServer,
    analyzer: FallbackAnalyzer,
    metrics: Arc<Metrics>,
}

impl TestAnalyzer {
    async fn new() -> Self {
        let server = MockServer::start().await;
        let endpoint = Url::parse(&format!("{}/analyze", server.uri())).expect("mock url");
        let remote = RemoteAnalyzer::new(endpoint, 2_000, PredictionEngine::default()).expect("remote client");
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));

        let remote: Arc<dyn AnalysisProvider> = Arc::new(remote);
        let analyzer = FallbackAnalyzer::new(
            Some(remote),
            LocalHeuristicAnalyzer::with_seed(PredictionEngine::default(), 3),
        )
        .with_metrics(metrics.clone());

        Self {
            server,
            analyzer,
            metrics,
        }
    }
}

fn request(points: usize) -> AnalysisRequest {
    let closes: Vec<f64> = (0..points).map(|i| 100.0 + i as f64).collect();
    let end_date = NaiveDate::from_ymd_opt(2024, 6, 28).expect("valid date");
    AnalysisRequest {
        symbol: "AAPL".to_string(),
        series: PriceSeries::from_closes(&closes, end_date, 5_000).expect("valid series"),
        horizon_days: 7,
    }
}

#[tokio::test]
async fn remote_prediction_is_used_and_clamped() {
    let app = TestAnalyzer::new().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictedPrice": 140.0,
            "confidence": 99.5,
            "explanation": "Momentum remains strong."
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let prediction = app.analyzer.analyze(&request(30)).await.expect("prediction");

    assert_eq!(prediction.source, PredictionSource::Remote);
    assert_eq!(prediction.predicted_price, 140.0);
    assert_eq!(prediction.confidence, 95.0);
    assert_eq!(prediction.explanation, "Momentum remains strong.");
    assert_eq!(prediction.current_price, 129.0);
    assert_eq!(prediction.trend.as_str(), "bullish");
    assert_eq!(app.metrics.remote_analysis_failures_total.get(), 0);
    assert_eq!(app.metrics.predictions_total.with_label_values(&["remote"]).get(), 1);
}

#[tokio::test]
async fn remote_request_carries_history_and_indicators() {
    let app = TestAnalyzer::new().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "predictedPrice": 120.0 })))
        .mount(&app.server)
        .await;

    let prediction = app.analyzer.analyze(&request(12)).await.expect("prediction");
    assert!((55.0..=95.0).contains(&prediction.confidence));
    assert!(prediction.explanation.contains("AAPL"));

    let requests = app.server.received_requests().await.expect("wiremock requests");
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body).expect("json body");
    assert_eq!(body["symbol"], "AAPL");
    assert_eq!(body["currentPrice"], 111.0);
    assert_eq!(body["historicalData"].as_array().unwrap().len(), 12);
    assert_eq!(body["marketContext"]["horizonDays"], 7);
    assert!(body["marketContext"]["indicators"]["rsi"].as_f64().is_some());
}

#[tokio::test]
async fn server_error_falls_back_to_local() {
    let app = TestAnalyzer::new().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.server)
        .await;

    let prediction = app.analyzer.analyze(&request(30)).await.expect("prediction");

    assert_eq!(prediction.source, PredictionSource::Local);
    assert_eq!(app.metrics.remote_analysis_failures_total.get(), 1);
    assert_eq!(app.metrics.predictions_total.with_label_values(&["local"]).get(), 1);
}

#[tokio::test]
async fn malformed_response_falls_back_to_local() {
    let app = TestAnalyzer::new().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("The stock will go up."))
        .mount(&app.server)
        .await;

    let prediction = app.analyzer.analyze(&request(30)).await.expect("prediction");
    assert_eq!(prediction.source, PredictionSource::Local);
    assert_eq!(app.metrics.remote_analysis_failures_total.get(), 1);
}

#[tokio::test]
async fn non_positive_price_falls_back_to_local() {
    let app = TestAnalyzer::new().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "predictedPrice": -5.0 })))
        .mount(&app.server)
        .await;

    let prediction = app.analyzer.analyze(&request(30)).await.expect("prediction");
    assert_eq!(prediction.source, PredictionSource::Local);
}

#[tokio::test]
async fn short_series_is_rejected_without_calling_remote() {
    let app = TestAnalyzer::new().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "predictedPrice": 101.0 })))
        .expect(0)
        .mount(&app.server)
        .await;

    let err = app.analyzer.analyze(&request(4)).await.unwrap_err();
    assert_eq!(
        err,
        EngineError::InsufficientData {
            required: 5,
            actual: 4
        }
    );
}
