// Training data
// Bundled dataset and the seeded train/test split

mod dataset;
mod split;

pub use dataset::Dataset;
pub use split::{train_test_split, Split};
