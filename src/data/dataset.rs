// Tabular regression dataset

use anyhow::{Context, Result};
use ndarray::{Array1, Array2};
use serde::Deserialize;

use crate::errors::TrainError;

/// Efron et al. diabetes data (442 patients, 10 baseline variables, disease
/// progression after one year), columns centered and scaled to unit norm
const BUNDLED_DIABETES: &str = include_str!("../../data/diabetes.json");

/// On-disk layout: row-major feature rows plus one target per row
#[derive(Debug, Deserialize)]
struct RawDataset {
    name: String,
    feature_names: Vec<String>,
    data: Vec<Vec<f64>>,
    target: Vec<f64>,
}

/// Numeric feature matrix with scalar targets. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub name: String,
    pub feature_names: Vec<String>,
    /// One row per sample, `feature_names.len()` columns
    pub features: Array2<f64>,
    pub target: Array1<f64>,
}

impl Dataset {
    /// The diabetes dataset shipped with the crate (442 rows, 10 features)
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_DIABETES).context("Bundled diabetes dataset is invalid")
    }

    /// Parse a dataset from its JSON representation, checking shapes
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawDataset = serde_json::from_str(json).context("Failed to parse dataset JSON")?;

        let n_features = raw.feature_names.len();
        if raw.data.is_empty() || n_features == 0 {
            return Err(TrainError::EmptyDataset.into());
        }
        if raw.data.len() != raw.target.len() {
            return Err(TrainError::ShapeMismatch {
                rows: raw.data.len(),
                targets: raw.target.len(),
            }
            .into());
        }
        if let Some((row, values)) = raw
            .data
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != n_features)
        {
            return Err(TrainError::RaggedRow {
                row,
                expected: n_features,
                actual: values.len(),
            }
            .into());
        }

        let n_rows = raw.data.len();
        let flat: Vec<f64> = raw.data.into_iter().flatten().collect();
        let features = Array2::from_shape_vec((n_rows, n_features), flat)?;

        Ok(Self {
            name: raw.name,
            feature_names: raw.feature_names,
            features,
            target: Array1::from(raw.target),
        })
    }

    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }
}
