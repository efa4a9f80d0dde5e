//! Prometheus metrics exported on `/metrics`.

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_requests_in_flight: IntGauge,
    pub http_request_duration_seconds: Histogram,
    pub predictions_total: IntCounterVec,
    pub remote_analysis_failures_total: IntCounter,
    pub market_data_fallbacks_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total HTTP requests handled")?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently being served")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let predictions_total = IntCounterVec::new(
            Opts::new("predictions_total", "Predictions produced, by analyzer"),
            &["source"],
        )?;
        let remote_analysis_failures_total = IntCounter::new(
            "remote_analysis_failures_total",
            "Remote analysis calls that fell back to the local engine",
        )?;
        let market_data_fallbacks_total = IntCounter::new(
            "market_data_fallbacks_total",
            "Live history requests that fell back to synthesized data",
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(predictions_total.clone()))?;
        registry.register(Box::new(remote_analysis_failures_total.clone()))?;
        registry.register(Box::new(market_data_fallbacks_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
            predictions_total,
            remote_analysis_failures_total,
            market_data_fallbacks_total,
        })
    }

    /// Text exposition format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
