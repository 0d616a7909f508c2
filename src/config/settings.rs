// Configuration structs

use serde::Deserialize;
use std::path::PathBuf;

/// Default artifact file shared by the trainer and the service
pub const DEFAULT_MODEL_PATH: &str = "diabetes_model.json";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings for the `train` command
    pub trainer: TrainerConfig,

    /// Settings for the `serve` command
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Where the fitted model is written (overwritten on every run)
    pub model_path: PathBuf,

    /// Fraction of rows held out for evaluation (default: 0.2)
    pub test_size: f64,

    /// Seed for the train/test shuffle (default: 42)
    pub seed: u64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            test_size: 0.2,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (default: all interfaces, port 5000)
    pub bind_address: String,

    /// Model artifact loaded at startup
    pub model_path: PathBuf,

    /// Append-only prediction log
    pub log_path: PathBuf,

    /// Verbose logging unless RUST_LOG says otherwise
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            log_path: PathBuf::from("prediction.log"),
            debug: true,
        }
    }
}
