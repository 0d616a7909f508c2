// Offline training run
// Bundled dataset -> seeded split -> OLS fit -> held-out evaluation -> artifact

use anyhow::{Context, Result};
use std::time::Instant;

use super::ols::fit_ols;
use crate::config::TrainerConfig;
use crate::data::{train_test_split, Dataset, Split};
use crate::models::{save_model, Evaluation, LinearModel, ModelArtifact};

/// Result of a training run
#[derive(Debug, Clone)]
pub struct TrainingResult {
    /// Artifact as written to disk
    pub artifact: ModelArtifact,
    /// Number of rows fitted on
    pub train_rows: usize,
    /// Number of rows held out
    pub test_rows: usize,
    /// Training duration in seconds
    pub duration_secs: f64,
}

/// Fit on the train split and score on the test split
pub fn fit_on_split(split: &Split) -> Result<(LinearModel, Evaluation)> {
    let model = fit_ols(&split.x_train, &split.y_train)?;
    let evaluation = model.evaluate(&split.x_test, &split.y_test);
    Ok((model, evaluation))
}

/// Trains the linear model and writes its artifact
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    /// Train on the bundled diabetes dataset
    pub fn run(&self) -> Result<TrainingResult> {
        let dataset = Dataset::bundled()?;
        self.run_on(&dataset)
    }

    /// Train on `dataset`, overwriting the configured artifact path
    pub fn run_on(&self, dataset: &Dataset) -> Result<TrainingResult> {
        let start = Instant::now();

        tracing::info!(
            dataset = %dataset.name,
            samples = dataset.n_samples(),
            features = dataset.n_features(),
            seed = self.config.seed,
            "Training linear regression"
        );

        let split = train_test_split(dataset, self.config.test_size, self.config.seed)
            .context("Failed to split dataset")?;
        let (model, evaluation) = fit_on_split(&split).context("Failed to fit model")?;

        tracing::info!(
            r2 = evaluation.r2,
            mse = evaluation.mse,
            mae = evaluation.mae,
            "Held-out evaluation"
        );

        let artifact = ModelArtifact::new(
            &model,
            dataset.feature_names.clone(),
            self.config.seed,
            self.config.test_size,
            evaluation,
        );
        save_model(&self.config.model_path, &artifact)?;

        Ok(TrainingResult {
            artifact,
            train_rows: split.x_train.nrows(),
            test_rows: split.x_test.nrows(),
            duration_secs: start.elapsed().as_secs_f64(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::load_model;
    use tempfile::TempDir;

    #[test]
    fn test_run_writes_loadable_artifact() {
        let dir = TempDir::new().unwrap();
        let config = TrainerConfig {
            model_path: dir.path().join("model.json"),
            ..TrainerConfig::default()
        };

        let result = Trainer::new(config.clone()).run().unwrap();
        assert_eq!(result.train_rows, 353);
        assert_eq!(result.test_rows, 89);

        let (model, artifact) = load_model(&config.model_path).unwrap();
        assert_eq!(model.n_features(), 10);
        assert_eq!(artifact.coefficients, result.artifact.coefficients);
        assert_eq!(artifact.feature_names.len(), 10);
        assert_eq!(artifact.seed, 42);
    }

    #[test]
    fn test_bundled_fit_explains_variance() {
        let dataset = Dataset::bundled().unwrap();
        let split = train_test_split(&dataset, 0.2, 42).unwrap();
        let (_, evaluation) = fit_on_split(&split).unwrap();
        assert!(evaluation.r2 > 0.2, "r2 was {}", evaluation.r2);
        assert!(evaluation.r2 < 1.0);
    }
}
