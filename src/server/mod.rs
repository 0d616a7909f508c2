// Prediction Server Module
// HTTP service around a model loaded once at startup

mod handlers;
mod types;

pub use handlers::{create_router, health_check, metrics_endpoint};
pub use types::{HealthStatus, PredictRequest, PredictResponse};

use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::errors::{
    log_file_error, model_loading_error, model_not_found_error, wrap_error_with_suggestion,
    PredictError,
};
use crate::metrics::{PredictionLog, PredictorMetrics};
use crate::models::{load_model, model_exists, LinearModel};

/// Prediction service state. Built only once the model is loaded, so a
/// running server is always ready to predict.
pub struct PredictorServer {
    /// Fitted model (read-only for the process lifetime)
    model: LinearModel,
    /// Request counter and last-prediction gauge
    metrics: PredictorMetrics,
    /// One line per /predict call
    prediction_log: PredictionLog,
    /// Server configuration
    config: ServerConfig,
    started_at: Instant,
}

impl PredictorServer {
    /// Create a server around an already loaded model
    pub fn new(
        config: ServerConfig,
        model: LinearModel,
        prediction_log: PredictionLog,
    ) -> Result<Self> {
        Ok(Self {
            model,
            metrics: PredictorMetrics::new()?,
            prediction_log,
            config,
            started_at: Instant::now(),
        })
    }

    /// Load the model artifact and open the prediction log.
    ///
    /// Any failure here is fatal: the service never runs without a model.
    pub fn load(config: ServerConfig) -> Result<Self> {
        let model_path = config.model_path.display().to_string();

        if !model_exists(&config.model_path) {
            bail!(model_not_found_error(&model_path));
        }

        let (model, artifact) = load_model(&config.model_path)
            .map_err(|e| anyhow::anyhow!(model_loading_error(&model_path, &format!("{:#}", e))))?;

        tracing::info!(
            n_features = model.n_features(),
            r2 = artifact.evaluation.r2,
            "Model ready"
        );

        let prediction_log = PredictionLog::open(&config.log_path).map_err(|e| {
            anyhow::anyhow!(log_file_error(
                &config.log_path.display().to_string(),
                &format!("{:#}", e)
            ))
        })?;

        Self::new(config, model, prediction_log)
    }

    /// Start the HTTP server
    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = self
            .config
            .bind_address
            .parse()
            .with_context(|| format!("Invalid bind address: {}", self.config.bind_address))?;

        // Create application state
        let app_state = Arc::new(self);

        // Build router
        let app = create_router(app_state).layer(TraceLayer::new_for_http());

        tracing::info!("Starting prediction server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            anyhow::anyhow!(wrap_error_with_suggestion(
                format!("Failed to bind {}: {}", addr, e),
                "choose another address with --bind"
            ))
        })?;

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Prediction server stopped");
        Ok(())
    }

    /// Run one prediction from a raw request body.
    ///
    /// Counts the request, parses and validates the body, predicts, updates
    /// the gauge and appends exactly one line to the prediction log.
    pub fn predict(&self, body: &[u8]) -> Result<f64, PredictError> {
        self.metrics.record_request();

        let outcome = PredictRequest::parse(body).and_then(|request| {
            request.validate(self.model.n_features())?;
            let prediction = self.model.predict_one(&request.features)?;
            Ok((prediction, request.features))
        });

        self.complete(outcome)
    }

    /// Account for a /predict call whose body could not be read at all.
    ///
    /// Counted and logged like any other failed prediction.
    pub fn reject(&self, error: PredictError) -> Result<f64, PredictError> {
        self.metrics.record_request();
        self.complete(Err(error))
    }

    fn complete(
        &self,
        outcome: Result<(f64, Vec<f64>), PredictError>,
    ) -> Result<f64, PredictError> {
        match outcome {
            Ok((prediction, features)) => {
                self.metrics.record_prediction(prediction);
                tracing::debug!(prediction, "Prediction served");
                self.append_log(|log| {
                    log.info(&format!("Prediction: {:?}, Features: {:?}", prediction, features))
                });
                Ok(prediction)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Prediction failed");
                self.append_log(|log| log.error(&format!("Error during prediction: {}", e)));
                Err(e)
            }
        }
    }

    fn append_log(&self, write: impl FnOnce(&PredictionLog) -> std::io::Result<()>) {
        if let Err(e) = write(&self.prediction_log) {
            tracing::warn!(
                error = %e,
                path = %self.prediction_log.path().display(),
                "Failed to append prediction log"
            );
        }
    }

    /// Get reference to the loaded model
    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    /// Get reference to the metrics
    pub fn metrics(&self) -> &PredictorMetrics {
        &self.metrics
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
