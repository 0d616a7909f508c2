// Seeded train/test split

use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::Dataset;
use crate::errors::TrainError;

/// Disjoint train and test partitions of a dataset
#[derive(Debug, Clone)]
pub struct Split {
    pub x_train: Array2<f64>,
    pub x_test: Array2<f64>,
    pub y_train: Array1<f64>,
    pub y_test: Array1<f64>,
}

/// Shuffle row indices with `seed` and hold out `ceil(n * test_size)` rows.
///
/// The first indices of the permutation form the test split, the rest train.
/// Same seed, same split.
pub fn train_test_split(
    dataset: &Dataset,
    test_size: f64,
    seed: u64,
) -> Result<Split, TrainError> {
    let n = dataset.n_samples();
    let n_test = (n as f64 * test_size).ceil() as usize;

    if !(test_size > 0.0 && test_size < 1.0) || n_test == 0 || n_test >= n {
        return Err(TrainError::InvalidSplit { rows: n, test_size });
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(n_test);

    tracing::debug!(
        train_rows = train_idx.len(),
        test_rows = test_idx.len(),
        seed,
        "Split dataset"
    );

    Ok(Split {
        x_train: dataset.features.select(Axis(0), train_idx),
        x_test: dataset.features.select(Axis(0), test_idx),
        y_train: dataset.target.select(Axis(0), train_idx),
        y_test: dataset.target.select(Axis(0), test_idx),
    })
}
