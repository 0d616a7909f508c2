// Ordinary least squares with intercept
//
// X and y are centered on their means, the centered problem is solved with a
// Householder QR decomposition, and the intercept is recovered from the means.

use ndarray::{s, Array1, Array2, Axis};

use crate::errors::TrainError;
use crate::models::LinearModel;

/// Columns whose remaining norm falls below this fraction of the largest
/// column norm are treated as linearly dependent
const RANK_TOLERANCE: f64 = 1e-10;

/// Fit `y ≈ intercept + x . coef` minimizing squared error
pub fn fit_ols(x: &Array2<f64>, y: &Array1<f64>) -> Result<LinearModel, TrainError> {
    let (n_rows, _) = x.dim();
    if n_rows == 0 {
        return Err(TrainError::EmptyDataset);
    }
    if y.len() != n_rows {
        return Err(TrainError::ShapeMismatch {
            rows: n_rows,
            targets: y.len(),
        });
    }

    let x_mean = x.mean_axis(Axis(0)).ok_or(TrainError::EmptyDataset)?;
    let y_mean = y.mean().ok_or(TrainError::EmptyDataset)?;

    let centered_x = x - &x_mean;
    let centered_y = y - y_mean;

    let coefficients = solve_least_squares(centered_x, centered_y)?;
    let intercept = y_mean - x_mean.dot(&coefficients);

    Ok(LinearModel::new(coefficients, intercept))
}

/// Minimize ||a c - b|| for full-column-rank `a`
fn solve_least_squares(mut a: Array2<f64>, mut b: Array1<f64>) -> Result<Array1<f64>, TrainError> {
    let (m, p) = a.dim();

    let max_norm = a
        .columns()
        .into_iter()
        .map(|col| col.dot(&col).sqrt())
        .fold(0.0_f64, f64::max);
    let tolerance = RANK_TOLERANCE * max_norm.max(f64::MIN_POSITIVE);

    // Reduce a to upper-triangular R in place, applying the same reflections to b
    for k in 0..p {
        if k >= m {
            return Err(TrainError::RankDeficient { column: k });
        }

        let column = a.slice(s![k.., k]);
        let norm = column.dot(&column).sqrt();
        if norm <= tolerance {
            return Err(TrainError::RankDeficient { column: k });
        }

        // Reflect onto -sign(a_kk) * norm * e1 to avoid cancellation
        let alpha = if a[[k, k]] > 0.0 { -norm } else { norm };
        let mut v = column.to_owned();
        v[0] -= alpha;
        let v_norm_sq = v.dot(&v);

        for j in k..p {
            let mut target = a.slice_mut(s![k.., j]);
            let factor = 2.0 * v.dot(&target) / v_norm_sq;
            target.scaled_add(-factor, &v);
        }

        let mut tail = b.slice_mut(s![k..]);
        let factor = 2.0 * v.dot(&tail) / v_norm_sq;
        tail.scaled_add(-factor, &v);
    }

    // Back substitution: R c = (Q^T b)[..p]
    let mut coefficients = Array1::zeros(p);
    for i in (0..p).rev() {
        let mut acc = b[i];
        for j in (i + 1)..p {
            acc -= a[[i, j]] * coefficients[j];
        }
        coefficients[i] = acc / a[[i, i]];
    }

    Ok(coefficients)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_recovers_exact_coefficients() {
        // y = 3 + 2 x0 - 0.5 x1 + 4 x2, no noise
        let x = array![
            [1.0, 2.0, 0.5],
            [2.0, -1.0, 1.5],
            [0.0, 3.0, -2.0],
            [4.0, 0.5, 0.0],
            [-1.0, 1.0, 3.0],
            [2.5, -2.0, 1.0],
        ];
        let y = x.dot(&array![2.0, -0.5, 4.0]) + 3.0;

        let model = fit_ols(&x, &y).unwrap();
        assert_close(model.intercept(), 3.0);
        assert_close(model.coefficients()[0], 2.0);
        assert_close(model.coefficients()[1], -0.5);
        assert_close(model.coefficients()[2], 4.0);
    }

    #[test]
    fn test_simple_line_with_noise_matches_closed_form() {
        let x = array![[1.0], [2.0], [3.0], [4.0]];
        let y = array![2.0, 4.5, 5.5, 8.0];

        // slope = cov(x, y) / var(x), intercept = mean(y) - slope * mean(x)
        let model = fit_ols(&x, &y).unwrap();
        assert_close(model.coefficients()[0], 1.9);
        assert_close(model.intercept(), 5.0 - 1.9 * 2.5);
    }

    #[test]
    fn test_residuals_orthogonal_to_features() {
        let dataset = crate::data::Dataset::bundled().unwrap();
        let model = fit_ols(&dataset.features, &dataset.target).unwrap();

        let residuals = &dataset.target - &model.predict(&dataset.features);
        assert!(residuals.sum().abs() < 1e-6);
        for column in dataset.features.columns() {
            assert!(column.dot(&residuals).abs() < 1e-6);
        }
    }

    #[test]
    fn test_duplicate_column_is_rank_deficient() {
        let x = array![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0], [5.0, 5.0]];
        let y = array![1.0, 2.0, 3.0, 4.0];
        assert_eq!(
            fit_ols(&x, &y),
            Err(TrainError::RankDeficient { column: 1 })
        );
    }

    #[test]
    fn test_too_few_rows_is_rank_deficient() {
        let x = array![[1.0, 2.0, 3.0], [4.0, 5.0, 7.0]];
        let y = array![1.0, 2.0];
        assert!(matches!(
            fit_ols(&x, &y),
            Err(TrainError::RankDeficient { .. })
        ));
    }

    #[test]
    fn test_target_length_mismatch() {
        let x = array![[1.0], [2.0]];
        let y = array![1.0];
        assert_eq!(
            fit_ols(&x, &y),
            Err(TrainError::ShapeMismatch {
                rows: 2,
                targets: 1
            })
        );
    }
}
