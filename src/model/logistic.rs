//! Gradient-descent logistic regression over a design matrix.

use tracing::debug;

use crate::dataset::Dataset;
use crate::pbp::ShotRecord;

use super::design::{encode, DesignMatrix, FeatureColumn};
use super::metrics::{evaluate, Metrics};
use super::ModelError;

/// Fit hyper-parameters.
#[derive(Debug, Clone, Copy)]
pub struct FitOptions {
    pub max_iters: usize,
    /// Initial learning rate; decays as `lr / (1 + 0.01 i)`.
    pub learning_rate: f64,
    /// L2 strength applied to weights, not the bias.
    pub l2: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        FitOptions {
            max_iters: 500,
            learning_rate: 0.1,
            l2: 1e-4,
        }
    }
}

/// Binary shot-make classifier: logistic regression over the encoded
/// feature columns of a [`DesignMatrix`].
#[derive(Debug, Clone)]
pub struct Estimator {
    columns: Vec<FeatureColumn>,
    weights: Vec<f64>,
    bias: f64,
}

/// Encode `dataset` over `features` and fit a classifier in one step.
pub fn build_estimator(
    dataset: &Dataset,
    features: &[String],
    options: FitOptions,
) -> Result<Estimator, ModelError> {
    let matrix = DesignMatrix::build(dataset, features)?;
    Estimator::fit(&matrix, options)
}

impl Estimator {
    /// Batch gradient descent on the logistic loss.
    pub fn fit(matrix: &DesignMatrix, options: FitOptions) -> Result<Self, ModelError> {
        if matrix.rows().is_empty() {
            return Err(ModelError::EmptyInput);
        }
        let n = matrix.rows().len() as f64;
        let width = matrix.width();
        let mut weights = vec![0.0; width];
        let mut bias = 0.0;

        for i in 0..options.max_iters.max(1) {
            let lr = options.learning_rate / (1.0 + 0.01 * i as f64);
            let mut grad_w = vec![0.0; width];
            let mut grad_b = 0.0;
            for (x, y) in matrix.rows().iter().zip(matrix.labels()) {
                let p = sigmoid(dot(&weights, x) + bias);
                let err = p - y;
                for (g, xi) in grad_w.iter_mut().zip(x) {
                    *g += err * xi;
                }
                grad_b += err;
            }
            for (w, g) in weights.iter_mut().zip(&grad_w) {
                *w -= lr * (g / n + options.l2 * *w);
            }
            bias -= lr * (grad_b / n);
            if !bias.is_finite() || weights.iter().any(|w| !w.is_finite()) {
                return Err(ModelError::Diverged);
            }
        }
        debug!("fit {} weights over {} rows", width, matrix.rows().len());

        Ok(Estimator {
            columns: matrix.columns().to_vec(),
            weights,
            bias,
        })
    }

    /// Probability in [0, 1] that the shot is made.
    pub fn predict_probability(&self, record: &ShotRecord) -> f64 {
        let x = encode(&self.columns, record);
        sigmoid(dot(&self.weights, &x) + self.bias)
    }

    /// Predict every record at a 0.5 threshold and score against its
    /// `made` label.
    pub fn evaluate_records(&self, records: &[ShotRecord]) -> Result<Metrics, ModelError> {
        let predictions: Vec<bool> = records
            .iter()
            .map(|r| self.predict_probability(r) >= 0.5)
            .collect();
        let actuals: Vec<bool> = records.iter().map(|r| r.made).collect();
        evaluate(&predictions, &actuals)
    }
}

fn dot(w: &[f64], x: &[f64]) -> f64 {
    w.iter().zip(x).map(|(a, b)| a * b).sum()
}

/// Numerically stable sigmoid.
fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}
