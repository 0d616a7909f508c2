// Prometheus metrics for the prediction service

use anyhow::{Context, Result};
use prometheus::{Encoder, Gauge, IntCounter, Opts, Registry, TextEncoder};

/// Request counter and last-prediction gauge, registered on a private registry.
///
/// Both metrics are atomics, so handlers update them through `&self`.
#[derive(Clone)]
pub struct PredictorMetrics {
    registry: Registry,
    requests_total: IntCounter,
    last_prediction: Gauge,
}

impl PredictorMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let requests_total = IntCounter::with_opts(Opts::new(
            "model_api_requests_total",
            "Total number of requests to the model API",
        ))?;
        let last_prediction = Gauge::with_opts(Opts::new(
            "model_api_last_prediction",
            "Last prediction made by the model",
        ))?;

        registry
            .register(Box::new(requests_total.clone()))
            .context("Failed to register request counter")?;
        registry
            .register(Box::new(last_prediction.clone()))
            .context("Failed to register prediction gauge")?;

        Ok(Self {
            registry,
            requests_total,
            last_prediction,
        })
    }

    /// Count one `/predict` call, successful or not
    pub fn record_request(&self) {
        self.requests_total.inc();
    }

    pub fn record_prediction(&self, prediction: f64) {
        self.last_prediction.set(prediction);
    }

    pub fn requests_total(&self) -> u64 {
        self.requests_total.get()
    }

    pub fn last_prediction(&self) -> f64 {
        self.last_prediction.get()
    }

    /// Content type of `render()` output
    pub fn content_type(&self) -> String {
        TextEncoder::new().format_type().to_string()
    }

    /// Text exposition of every registered metric
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder
            .encode(&self.registry.gather(), &mut buffer)
            .context("Failed to encode metrics")?;
        Ok(String::from_utf8(buffer)?)
    }
}
