// Metrics module
// Prometheus counters for the service and the per-request prediction log

mod logger;
mod registry;

pub use logger::PredictionLog;
pub use registry::PredictorMetrics;
