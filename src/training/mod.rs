// Training module
// Least-squares fitting and the offline training run

mod ols;
mod trainer;

pub use ols::fit_ols;
pub use trainer::{fit_on_split, Trainer, TrainingResult};
