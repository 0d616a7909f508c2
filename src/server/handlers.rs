// HTTP request handlers

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::types::{HealthStatus, PredictResponse};
use super::PredictorServer;
use crate::errors::PredictError;

/// Create the main application router
pub fn create_router(server: Arc<PredictorServer>) -> Router {
    Router::new()
        .route("/predict", post(handle_predict))
        // Health and metrics
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_endpoint))
        .with_state(server)
}

/// Handle POST /predict
///
/// The body is taken raw, and its rejection kept, so that malformed JSON and
/// unreadable bodies (e.g. over the size limit) become error payloads instead
/// of extractor responses.
#[tracing::instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
async fn handle_predict(
    State(server): State<Arc<PredictorServer>>,
    body: Result<Bytes, BytesRejection>,
) -> Json<PredictResponse> {
    let result = match body {
        Ok(body) => server.predict(&body),
        Err(rejection) => server.reject(PredictError::BodyRejected(rejection.body_text())),
    };
    Json(PredictResponse::from(result))
}

/// Handle GET /health - Health check endpoint
pub async fn health_check(State(server): State<Arc<PredictorServer>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        uptime_seconds: server.uptime().as_secs(),
        n_features: server.model().n_features(),
        requests_total: server.metrics().requests_total(),
    })
}

/// Handle GET /metrics - Prometheus metrics endpoint
pub async fn metrics_endpoint(
    State(server): State<Arc<PredictorServer>>,
) -> Result<Response, AppError> {
    let metrics = server.metrics();
    let body = metrics.render()?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, metrics.content_type())],
        body,
    )
        .into_response())
}

/// Application error wrapper for proper HTTP error responses
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "Request failed");

        let body = serde_json::json!({ "error": self.0.to_string() });

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
