// Models module
// Fitted linear regression and its on-disk artifact

mod linear;
mod persistence;

pub use linear::{Evaluation, LinearModel};
pub use persistence::{load_model, model_exists, save_model, ModelArtifact, FORMAT_VERSION};
