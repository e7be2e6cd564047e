//! Estimators used to detect fabricated resumes.
//!
//! - [`TfIdfVectorizer`]: text to fixed-width TF-IDF feature vectors
//! - [`LogisticRegression`]: supervised real/fake classifier
//! - [`IsolationForest`]: unsupervised outlier detector
//! - [`metrics`]: training-set classification metrics
//!
//! Every estimator must be fitted before it scores anything, and the two
//! models remember the feature width they were trained on so that a vector
//! from a different vectorizer is rejected instead of silently misread.

pub mod isolation_forest;
pub mod logistic;
pub mod metrics;
pub mod tfidf;

pub use isolation_forest::{IsolationForest, IsolationForestConfig};
pub use logistic::{LogisticRegression, LogisticRegressionConfig};
pub use metrics::ClassificationMetrics;
pub use tfidf::{TfIdfConfig, TfIdfVectorizer};

/// Errors specific to estimator fitting and inference.
#[derive(Debug, thiserror::Error)]
pub enum MLError {
    #[error("{model} must be fitted before use")]
    NotFitted { model: String },

    #[error("Feature vector has {actual} dimensions, model expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Training data insufficient: need at least {min_samples} samples, got {actual}")]
    InsufficientTrainingData { min_samples: usize, actual: usize },

    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    #[error("Empty vocabulary: the documents contain only stop words or no words at all")]
    EmptyVocabulary,
}

/// Logistic function, evaluated without overflow for large `|x|`.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Check that every row of a training matrix has the same width and return it.
pub(crate) fn feature_width(rows: &[Vec<f64>]) -> Result<usize, MLError> {
    let width = rows.first().map(Vec::len).unwrap_or(0);
    if let Some(row) = rows.iter().find(|row| row.len() != width) {
        return Err(MLError::DimensionMismatch {
            expected: width,
            actual: row.len(),
        });
    }
    Ok(width)
}
