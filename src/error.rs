//! Error types for the fakeresume crate.
//!
//! All fallible library operations return [`Result`], whose error side is the
//! [`FakeResumeError`] enum. Estimator-specific failures live in
//! [`MLError`](crate::ml::MLError) and scoring failures in
//! [`ScoreError`](crate::scoring::ScoreError); both convert into this type.
//!
//! # Examples
//!
//! ```
//! use fakeresume::error::{FakeResumeError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(FakeResumeError::invalid_argument("Invalid input"))
//! }
//!
//! assert!(example_operation().is_err());
//! ```

use std::io;

use thiserror::Error;

use crate::ml::MLError;

/// The main error type for fakeresume operations.
#[derive(Error, Debug)]
pub enum FakeResumeError {
    /// I/O errors (artifact files, output directory)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Artifact envelope errors (bad magic, wrong kind, checksum mismatch)
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// Estimator errors
    #[error("Model error: {0}")]
    Ml(#[from] MLError),

    /// Binary (de)serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid argument errors
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Errors with context attached through anyhow; the whole chain is shown
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with FakeResumeError.
pub type Result<T> = std::result::Result<T, FakeResumeError>;

impl FakeResumeError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        FakeResumeError::Analysis(msg.into())
    }

    /// Create a new artifact error.
    pub fn artifact<S: Into<String>>(msg: S) -> Self {
        FakeResumeError::Artifact(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        FakeResumeError::Serialization(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        FakeResumeError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        FakeResumeError::InvalidArgument(msg.into())
    }
}

impl From<bincode::Error> for FakeResumeError {
    fn from(err: bincode::Error) -> Self {
        FakeResumeError::Serialization(err.to_string())
    }
}
