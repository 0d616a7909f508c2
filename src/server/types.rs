// Prediction API types

use serde::{Deserialize, Serialize};

use crate::errors::PredictError;

/// Request body for POST /predict
#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    /// One row of features, in training column order
    pub features: Vec<f64>,
}

impl PredictRequest {
    /// Parse a raw request body
    pub fn parse(body: &[u8]) -> Result<Self, PredictError> {
        serde_json::from_slice(body).map_err(|e| PredictError::MalformedInput(e.to_string()))
    }

    /// Check the feature vector fits a model trained on `n_features` columns
    pub fn validate(&self, n_features: usize) -> Result<(), PredictError> {
        if self.features.len() != n_features {
            return Err(PredictError::DimensionMismatch {
                expected: n_features,
                actual: self.features.len(),
            });
        }
        Ok(())
    }
}

/// Response body for POST /predict. Both variants are sent with HTTP 200.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictResponse {
    Prediction { prediction: f64 },
    Error { error: String },
}

impl From<Result<f64, PredictError>> for PredictResponse {
    fn from(result: Result<f64, PredictError>) -> Self {
        match result {
            Ok(prediction) => Self::Prediction { prediction },
            Err(e) => Self::Error {
                error: e.to_string(),
            },
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub uptime_seconds: u64,
    pub n_features: usize,
    pub requests_total: u64,
}
