//! Design-matrix construction: numeric encoding of selected dataset columns.
//!
//! Numeric columns (`home`, `distance`, `assisted`) are z-scored against the
//! training set so gradient descent sees comparably-scaled inputs. The
//! open-vocabulary `shot_type` column is one-hot encoded over the categories
//! observed in the training set, in first-appearance order; a category never
//! seen in training encodes as all-zeros at prediction time.

use crate::dataset::Dataset;
use crate::pbp::ShotRecord;

use super::ModelError;

/// Mean and standard deviation used to z-score one numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub mean: f64,
    pub stdev: f64,
}

/// Threshold below which a standard deviation is treated as zero.
const STDEV_EPSILON: f64 = 1e-9;

/// Population mean/stdev of a value slice. Empty slices yield 0/0.
pub fn column_stats(values: &[f64]) -> ColumnStats {
    if values.is_empty() {
        return ColumnStats {
            mean: 0.0,
            stdev: 0.0,
        };
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    ColumnStats {
        mean,
        stdev: variance.sqrt(),
    }
}

/// One column of the design matrix.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureColumn {
    /// Z-scored numeric column.
    Numeric {
        name: &'static str,
        stats: ColumnStats,
    },
    /// One-hot indicator for a single `shot_type` category.
    TypeIndicator { category: String },
}

impl FeatureColumn {
    /// Encoded value of this column for one record.
    pub fn value(&self, record: &ShotRecord) -> f64 {
        match self {
            FeatureColumn::Numeric { name, stats } => {
                let raw = numeric_value(record, name);
                if stats.stdev < STDEV_EPSILON {
                    0.0
                } else {
                    (raw - stats.mean) / stats.stdev
                }
            }
            FeatureColumn::TypeIndicator { category } => {
                if record.shot_type == *category {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

fn numeric_value(record: &ShotRecord, name: &str) -> f64 {
    match name {
        "home" => f64::from(u8::from(record.is_home)),
        "distance" => f64::from(record.distance_ft),
        "assisted" => f64::from(u8::from(record.assisted)),
        // build_columns only constructs Numeric columns for the names above
        _ => 0.0,
    }
}

/// Numeric encoding of a feature selection, learned from a training dataset
/// and reusable at prediction time.
#[derive(Debug, Clone)]
pub struct DesignMatrix {
    columns: Vec<FeatureColumn>,
    rows: Vec<Vec<f64>>,
    labels: Vec<f64>,
}

impl DesignMatrix {
    /// Build the matrix for `features`, a subset of the dataset schema
    /// (`home`, `distance`, `type`, `assisted`). The `result` column becomes
    /// the label vector.
    pub fn build(dataset: &Dataset, features: &[String]) -> Result<Self, ModelError> {
        if dataset.is_empty() {
            return Err(ModelError::EmptyInput);
        }
        let columns = build_columns(dataset, features)?;
        let rows = dataset.iter().map(|r| encode(&columns, r)).collect();
        let labels = dataset
            .iter()
            .map(|r| f64::from(u8::from(r.made)))
            .collect();
        Ok(DesignMatrix {
            columns,
            rows,
            labels,
        })
    }

    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

/// Encode one record against a fixed column layout.
pub fn encode(columns: &[FeatureColumn], record: &ShotRecord) -> Vec<f64> {
    columns.iter().map(|c| c.value(record)).collect()
}

fn build_columns(
    dataset: &Dataset,
    features: &[String],
) -> Result<Vec<FeatureColumn>, ModelError> {
    let mut columns = Vec::new();
    for feature in features {
        match feature.as_str() {
            "home" | "distance" | "assisted" => {
                let name = match feature.as_str() {
                    "home" => "home",
                    "distance" => "distance",
                    _ => "assisted",
                };
                let values: Vec<f64> = dataset.iter().map(|r| numeric_value(r, name)).collect();
                columns.push(FeatureColumn::Numeric {
                    name,
                    stats: column_stats(&values),
                });
            }
            "type" => {
                for record in dataset.iter() {
                    let seen = columns.iter().any(|c| {
                        matches!(c, FeatureColumn::TypeIndicator { category } if *category == record.shot_type)
                    });
                    if !seen {
                        columns.push(FeatureColumn::TypeIndicator {
                            category: record.shot_type.clone(),
                        });
                    }
                }
            }
            other => {
                return Err(ModelError::UnknownFeature {
                    name: other.to_string(),
                })
            }
        }
    }
    Ok(columns)
}
