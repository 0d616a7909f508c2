// Error types and user-friendly startup messages
//
// Request-level and training failures are typed (`PredictError`,
// `TrainError`, `ArtifactError`). Startup failures are plain anyhow errors
// whose text points the user at the fix.

use std::fmt;
use thiserror::Error;

/// Failure of a single `/predict` call. Never fatal to the service.
#[derive(Debug, Error, PartialEq)]
pub enum PredictError {
    /// Body was not JSON, lacked `features`, or held non-numeric entries
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Prediction is not a finite number")]
    NonFinitePrediction,

    /// Body could not be read (e.g. over the size limit)
    #[error("Request body rejected: {0}")]
    BodyRejected(String),
}

/// Failure while fitting a model
#[derive(Debug, Error, PartialEq)]
pub enum TrainError {
    #[error("Dataset is empty")]
    EmptyDataset,

    #[error("Feature matrix has {rows} rows but there are {targets} targets")]
    ShapeMismatch { rows: usize, targets: usize },

    #[error("Row {row} has {actual} features, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Cannot split {rows} rows with test_size {test_size}")]
    InvalidSplit { rows: usize, test_size: f64 },

    #[error("Design matrix is rank deficient (column {column} is linearly dependent)")]
    RankDeficient { column: usize },
}

/// A model artifact that parsed but cannot be served
#[derive(Debug, Error, PartialEq)]
pub enum ArtifactError {
    #[error("Artifact declares {expected} features but stores {actual} coefficients")]
    CoefficientCount { expected: usize, actual: usize },

    #[error("Artifact contains a non-finite parameter")]
    NonFinite,

    #[error("Unsupported artifact format version {0}")]
    UnsupportedVersion(u32),
}

/// Format a missing model artifact error with helpful suggestions
pub fn model_not_found_error(path: &str) -> String {
    format!(
        "Model artifact not found: {}\n\n\
        \x1b[1;33mPossible causes:\x1b[0m\n\
        • The model has not been trained yet\n\
        • The service runs from a different directory than the trainer\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Train the model:\n\
           \x1b[36mdiabetes-predictor train\x1b[0m\n\n\
        2. Point the service at the artifact:\n\
           \x1b[36mdiabetes-predictor serve --model-path {}\x1b[0m",
        path, path
    )
}

/// Format a model loading error with helpful suggestions
pub fn model_loading_error(path: &str, error: &str) -> String {
    format!(
        "Failed to load model '{}'\n\n\
        \x1b[1;33mError:\x1b[0m {}\n\n\
        \x1b[1;33mPossible causes:\x1b[0m\n\
        • Corrupted or truncated artifact\n\
        • Artifact written by an incompatible version\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Retrain to regenerate the artifact:\n\
           \x1b[36mdiabetes-predictor train --model-path {}\x1b[0m",
        path, error, path
    )
}

/// Format a config parse error with helpful suggestions
pub fn config_parse_error(path: &str, error: &str) -> String {
    format!(
        "Failed to parse config file {}\n\n\
        \x1b[1;33mError:\x1b[0m {}\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Check config file syntax:\n\
           \x1b[36mcat {}\x1b[0m\n\n\
        2. Common mistakes:\n\
           • Missing quotes around strings\n\
           • Keys outside the [trainer] or [server] tables",
        path, error, path
    )
}

/// Format an error opening the prediction log
pub fn log_file_error(path: &str, error: &str) -> String {
    format!(
        "Cannot open prediction log {}: {}\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Check parent directory permissions:\n\
           \x1b[36mls -la $(dirname \"{}\")\x1b[0m\n\n\
        2. Use a different location:\n\
           \x1b[36mdiabetes-predictor serve --log-path /tmp/prediction.log\x1b[0m",
        path, error, path
    )
}

/// Wrap a generic error with a suggestion
pub fn wrap_error_with_suggestion(error: impl fmt::Display, suggestion: &str) -> String {
    format!("{}\n\n\x1b[1;33mSuggestion:\x1b[0m {}", error, suggestion)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_not_found_suggests_training() {
        let msg = model_not_found_error("diabetes_model.json");
        assert!(msg.contains("diabetes-predictor train"));
        assert!(msg.contains("--model-path diabetes_model.json"));
    }

    #[test]
    fn test_predict_error_messages() {
        let err = PredictError::DimensionMismatch {
            expected: 10,
            actual: 3,
        };
        assert_eq!(err.to_string(), "Expected 10 features, got 3");

        let err = PredictError::MalformedInput("missing field `features`".to_string());
        assert!(err.to_string().starts_with("Malformed input"));
    }

    #[test]
    fn test_suggestion_follows_error_text() {
        let msg = wrap_error_with_suggestion("address in use", "pick another port");
        assert!(msg.starts_with("address in use"));
        assert!(msg.contains("pick another port"));
    }
}
