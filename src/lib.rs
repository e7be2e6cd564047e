//! # fakeresume
//!
//! Detects fabricated resumes with classic text classification.
//!
//! - [`analysis`]: regex tokenizer, stop words and word shingles
//! - [`ml`]: TF-IDF vectorizer, logistic regression, isolation forest
//! - [`training`]: fits the models on the embedded [`corpus`] and writes
//!   [`artifact`] files
//! - [`scoring`]: loads the artifacts and scores one resume text
//!
//! The `train_model`, `predict` and `anomaly_predict` binaries wrap these
//! modules; see [`cli`].

pub mod analysis;
pub mod artifact;
pub mod cli;
pub mod corpus;
pub mod error;
pub mod ml;
pub mod scoring;
pub mod training;

pub mod prelude {
    pub use crate::error::{FakeResumeError, Result};
    pub use crate::scoring::{AnomalyScorer, FakeScorePredictor, ResumeScorer, Score, ScoreError};
    pub use crate::training::{Trainer, TrainingConfig, TrainingReport};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
