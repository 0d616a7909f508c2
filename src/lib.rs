// Diabetes Predictor - Linear regression trainer and prediction service
// Library exports

pub mod config;
pub mod data; // Bundled dataset and train/test split
pub mod errors;
pub mod metrics; // Prometheus metrics and prediction log
pub mod models; // Linear model and artifact persistence
pub mod server; // HTTP prediction service
pub mod training; // OLS fitting and the training run
