pub mod design;
pub mod logistic;
pub mod metrics;

pub use design::{DesignMatrix, FeatureColumn};
pub use logistic::{build_estimator, Estimator, FitOptions};
pub use metrics::{evaluate, ConfusionCounts, Metrics};

use thiserror::Error;

/// Failures in dataset-to-matrix encoding, model fitting and evaluation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// A ratio would be undefined over zero rows.
    #[error("empty input")]
    EmptyInput,

    #[error("prediction/actual length mismatch ({predictions} vs {actuals})")]
    LengthMismatch { predictions: usize, actuals: usize },

    /// Feature name outside the dataset schema.
    #[error("unknown feature column: {name:?}")]
    UnknownFeature { name: String },

    /// Gradient descent produced non-finite weights.
    #[error("model fit diverged")]
    Diverged,
}
