//! Binary-classification metrics from confusion counts.

use serde::Serialize;

use super::ModelError;

/// The four confusion-matrix tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionCounts {
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub confusion: ConfusionCounts,
}

/// Compute metrics from aligned prediction/actual sequences.
///
/// A zero denominator resolves precision or recall to `0.0` rather than
/// erroring: it is a common, meaningful state at small sample sizes. Only
/// empty input is an error, since accuracy is then undefined.
pub fn evaluate(predictions: &[bool], actuals: &[bool]) -> Result<Metrics, ModelError> {
    if predictions.len() != actuals.len() {
        return Err(ModelError::LengthMismatch {
            predictions: predictions.len(),
            actuals: actuals.len(),
        });
    }
    if predictions.is_empty() {
        return Err(ModelError::EmptyInput);
    }

    let mut confusion = ConfusionCounts::default();
    for (&predicted, &actual) in predictions.iter().zip(actuals) {
        match (predicted, actual) {
            (true, true) => confusion.true_positives += 1,
            (true, false) => confusion.false_positives += 1,
            (false, false) => confusion.true_negatives += 1,
            (false, true) => confusion.false_negatives += 1,
        }
    }

    Ok(Metrics {
        accuracy: (confusion.true_positives + confusion.true_negatives) as f64
            / predictions.len() as f64,
        precision: ratio(
            confusion.true_positives,
            confusion.true_positives + confusion.false_positives,
        ),
        recall: ratio(
            confusion.true_positives,
            confusion.true_positives + confusion.false_negatives,
        ),
        confusion,
    })
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
