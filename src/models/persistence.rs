// Model persistence utilities
// Handles saving/loading the fitted model as a JSON artifact

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::linear::{Evaluation, LinearModel};
use crate::errors::ArtifactError;

/// Version of the artifact layout written by this build
pub const FORMAT_VERSION: u32 = 1;

/// Everything written to disk for a fitted model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Version of the persistence format
    pub format_version: u32,
    /// Model type identifier
    pub model_type: String,
    /// Timestamp of the training run
    pub trained_at: DateTime<Utc>,
    /// Input dimensionality
    pub n_features: usize,
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    /// Split parameters the model was fitted with
    pub seed: u64,
    pub test_size: f64,
    /// Scores on the held-out split
    pub evaluation: Evaluation,
}

impl ModelArtifact {
    pub fn new(
        model: &LinearModel,
        feature_names: Vec<String>,
        seed: u64,
        test_size: f64,
        evaluation: Evaluation,
    ) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            model_type: "linear_regression".to_string(),
            trained_at: Utc::now(),
            n_features: model.n_features(),
            feature_names,
            coefficients: model.coefficients().to_vec(),
            intercept: model.intercept(),
            seed,
            test_size,
            evaluation,
        }
    }

    /// Check the artifact can be served and build the model from it
    pub fn to_model(&self) -> Result<LinearModel, ArtifactError> {
        if self.format_version != FORMAT_VERSION {
            return Err(ArtifactError::UnsupportedVersion(self.format_version));
        }
        if self.coefficients.len() != self.n_features {
            return Err(ArtifactError::CoefficientCount {
                expected: self.n_features,
                actual: self.coefficients.len(),
            });
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ArtifactError::NonFinite);
        }

        Ok(LinearModel::new(
            Array1::from(self.coefficients.clone()),
            self.intercept,
        ))
    }
}

/// Write the artifact to `path`, replacing any existing file
pub fn save_model(path: &Path, artifact: &ModelArtifact) -> Result<()> {
    let json = serde_json::to_string_pretty(artifact).context("Failed to serialize model artifact")?;

    fs::write(path, json)
        .with_context(|| format!("Failed to write model artifact to {:?}", path))?;

    tracing::info!(
        path = %path.display(),
        n_features = artifact.n_features,
        "Saved model artifact"
    );

    Ok(())
}

/// Read and validate an artifact, returning the servable model with it
pub fn load_model(path: &Path) -> Result<(LinearModel, ModelArtifact)> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read model artifact from {:?}", path))?;

    let artifact: ModelArtifact =
        serde_json::from_str(&json).context("Failed to parse model artifact JSON")?;

    let model = artifact.to_model()?;

    tracing::info!(
        path = %path.display(),
        n_features = artifact.n_features,
        trained_at = %artifact.trained_at,
        "Loaded model artifact"
    );

    Ok((model, artifact))
}

/// Check if a saved model exists
pub fn model_exists(path: &Path) -> bool {
    path.is_file()
}
