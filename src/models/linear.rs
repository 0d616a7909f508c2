// Linear regression model
// y = intercept + coefficients . x

use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::errors::PredictError;

/// Fitted linear regression: one coefficient per feature plus an intercept
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    coefficients: Array1<f64>,
    intercept: f64,
}

/// Held-out scores for a fitted model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Coefficient of determination (1.0 is a perfect fit)
    pub r2: f64,
    /// Mean squared error
    pub mse: f64,
    /// Mean absolute error
    pub mae: f64,
}

impl LinearModel {
    pub fn new(coefficients: Array1<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    pub fn coefficients(&self) -> ArrayView1<'_, f64> {
        self.coefficients.view()
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Input dimensionality the model was trained on
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    /// Predict for a single feature vector (a one-row input)
    pub fn predict_one(&self, features: &[f64]) -> Result<f64, PredictError> {
        if features.len() != self.n_features() {
            return Err(PredictError::DimensionMismatch {
                expected: self.n_features(),
                actual: features.len(),
            });
        }

        let row = ArrayView1::from(features);
        let prediction = self.intercept + self.coefficients.dot(&row);

        if prediction.is_finite() {
            Ok(prediction)
        } else {
            Err(PredictError::NonFinitePrediction)
        }
    }

    /// Predict for every row of `x`. Caller guarantees `x.ncols() == n_features()`.
    pub fn predict(&self, x: &Array2<f64>) -> Array1<f64> {
        x.dot(&self.coefficients) + self.intercept
    }

    /// Score predictions on `x` against `y`
    pub fn evaluate(&self, x: &Array2<f64>, y: &Array1<f64>) -> Evaluation {
        let predictions = self.predict(x);
        let n = y.len().max(1) as f64;

        let residuals = y - &predictions;
        let ss_res = residuals.mapv(|r| r * r).sum();
        let mae = residuals.mapv(f64::abs).sum() / n;

        let y_mean = y.mean().unwrap_or(0.0);
        let ss_tot = y.mapv(|v| (v - y_mean) * (v - y_mean)).sum();

        // Constant targets: perfect predictions score 1, anything else 0
        let r2 = if ss_tot > 0.0 {
            1.0 - ss_res / ss_tot
        } else if ss_res == 0.0 {
            1.0
        } else {
            0.0
        };

        Evaluation {
            r2,
            mse: ss_res / n,
            mae,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn model() -> LinearModel {
        LinearModel::new(array![2.0, -1.0, 0.5], 10.0)
    }

    #[test]
    fn test_predict_one() {
        let prediction = model().predict_one(&[1.0, 2.0, 4.0]).unwrap();
        assert_eq!(prediction, 10.0 + 2.0 - 2.0 + 2.0);
    }

    #[test]
    fn test_predict_one_dimension_mismatch() {
        assert_eq!(
            model().predict_one(&[1.0, 2.0]),
            Err(PredictError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_predict_one_rejects_overflow() {
        let result = model().predict_one(&[f64::MAX, -f64::MAX, 0.0]);
        assert_eq!(result, Err(PredictError::NonFinitePrediction));
    }

    #[test]
    fn test_batch_predict_matches_single() {
        let x = array![[1.0, 2.0, 4.0], [0.0, 0.0, 0.0]];
        let batch = model().predict(&x);
        assert_eq!(batch[0], model().predict_one(&[1.0, 2.0, 4.0]).unwrap());
        assert_eq!(batch[1], 10.0);
    }

    #[test]
    fn test_evaluate_perfect_fit() {
        let x = array![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 2.0]];
        let y = model().predict(&x);
        let scores = model().evaluate(&x, &y);
        assert_eq!(scores.r2, 1.0);
        assert_eq!(scores.mse, 0.0);
        assert_eq!(scores.mae, 0.0);
    }

    #[test]
    fn test_evaluate_errors() {
        let model = LinearModel::new(array![0.0], 0.0);
        let x = array![[0.0], [0.0]];
        let y = array![1.0, 3.0];
        let scores = model.evaluate(&x, &y);
        assert_eq!(scores.mse, 5.0);
        assert_eq!(scores.mae, 2.0);
        // Predicting 0 is worse than predicting the mean
        assert!(scores.r2 < 0.0);
    }
}
