//! Binary classification metrics. Class `1` is the positive class.
//!
//! Undefined ratios (no predicted or no actual positives) are reported as
//! `0.0`.

use serde::{Deserialize, Serialize};

/// Fraction of predictions equal to the truth.
pub fn accuracy_score(y_true: &[u8], y_pred: &[u8]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    correct as f64 / y_true.len() as f64
}

/// Confusion counts for the positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Confusion {
    true_positive: usize,
    false_positive: usize,
    false_negative: usize,
}

impl Confusion {
    fn from_labels(y_true: &[u8], y_pred: &[u8]) -> Self {
        y_true
            .iter()
            .zip(y_pred)
            .fold(Confusion::default(), |mut acc, (&t, &p)| {
                match (t == 1, p == 1) {
                    (true, true) => acc.true_positive += 1,
                    (false, true) => acc.false_positive += 1,
                    (true, false) => acc.false_negative += 1,
                    (false, false) => {}
                }
                acc
            })
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

pub fn precision_score(y_true: &[u8], y_pred: &[u8]) -> f64 {
    let c = Confusion::from_labels(y_true, y_pred);
    ratio(c.true_positive, c.true_positive + c.false_positive)
}

pub fn recall_score(y_true: &[u8], y_pred: &[u8]) -> f64 {
    let c = Confusion::from_labels(y_true, y_pred);
    ratio(c.true_positive, c.true_positive + c.false_negative)
}

pub fn f1_score(y_true: &[u8], y_pred: &[u8]) -> f64 {
    let precision = precision_score(y_true, y_pred);
    let recall = recall_score(y_true, y_pred);
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

/// All four metrics for one set of predictions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl ClassificationMetrics {
    pub fn compute(y_true: &[u8], y_pred: &[u8]) -> Self {
        Self {
            accuracy: accuracy_score(y_true, y_pred),
            precision: precision_score(y_true, y_pred),
            recall: recall_score(y_true, y_pred),
            f1: f1_score(y_true, y_pred),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics() {
        let y_true = [0, 0, 1, 1, 1];
        let y_pred = [0, 1, 1, 1, 0];

        assert!((accuracy_score(&y_true, &y_pred) - 0.6).abs() < 1e-12);
        assert!((precision_score(&y_true, &y_pred) - 2.0 / 3.0).abs() < 1e-12);
        assert!((recall_score(&y_true, &y_pred) - 2.0 / 3.0).abs() < 1e-12);
        assert!((f1_score(&y_true, &y_pred) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_positive_predictions() {
        let metrics = ClassificationMetrics::compute(&[1, 1, 0], &[0, 0, 0]);
        assert!((metrics.accuracy - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(metrics.precision, 0.0);
        assert_eq!(metrics.recall, 0.0);
        assert_eq!(metrics.f1, 0.0);
    }

    #[test]
    fn test_empty() {
        assert_eq!(accuracy_score(&[], &[]), 0.0);
    }
}
