//! Scoring a single resume text against persisted models.
//!
//! Library callers get a typed [`ScoreError`] for every failure. The scorer
//! binaries collapse failures into a [`ScoreOutcome::Fallback`], which still
//! prints the neutral [`FALLBACK_SCORE`] so that the caller always reads one
//! number.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::artifact::{ArtifactKind, ModelPaths, load_artifact};
use crate::error::FakeResumeError;
use crate::ml::{IsolationForest, LogisticRegression, TfIdfVectorizer, sigmoid};

/// Score printed when no score could be computed.
pub const FALLBACK_SCORE: f64 = 0.5;

/// A score in `[0, 1]`. Only the scorers construct one.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Score(f64);

impl Score {
    /// Clamp `value` into `[0, 1]`; NaN is rejected.
    pub(crate) fn new(value: f64) -> Result<Self, ScoreError> {
        if value.is_nan() {
            return Err(ScoreError::NotANumber);
        }
        Ok(Score(value.clamp(0.0, 1.0)))
    }

    pub fn fallback() -> Self {
        Score(FALLBACK_SCORE)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Four decimal places, the format the scorer binaries print.
impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// Why a score could not be computed.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// An artifact is missing, unreadable, corrupt or of the wrong kind.
    #[error("failed to load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: FakeResumeError,
    },

    /// The vectorizer rejected the input.
    #[error("failed to vectorize input: {0}")]
    Transform(#[source] FakeResumeError),

    /// The model rejected the feature vector.
    #[error("inference failed: {0}")]
    Inference(#[source] FakeResumeError),

    /// The model produced NaN.
    #[error("inference produced a score that is not a number")]
    NotANumber,
}

impl From<ScoreError> for FakeResumeError {
    fn from(err: ScoreError) -> Self {
        FakeResumeError::Other(err.to_string())
    }
}

/// A scorer backed by artifacts in a model directory.
pub trait ResumeScorer: Sized {
    /// Load the artifacts this scorer needs from `model_dir`.
    fn load(model_dir: &Path) -> Result<Self, ScoreError>;

    /// Score one resume text.
    fn score(&self, text: &str) -> Result<Score, ScoreError>;
}

fn load_part<T: DeserializeOwned>(path: PathBuf, kind: ArtifactKind) -> Result<T, ScoreError> {
    log::debug!("loading {kind} from {}", path.display());
    load_artifact(&path, kind).map_err(|source| ScoreError::Load { path, source })
}

/// Probability that a resume is fake, from the logistic-regression classifier.
#[derive(Debug, Clone)]
pub struct FakeScorePredictor {
    vectorizer: TfIdfVectorizer,
    classifier: LogisticRegression,
}

impl FakeScorePredictor {
    pub fn from_models(vectorizer: TfIdfVectorizer, classifier: LogisticRegression) -> Self {
        Self {
            vectorizer,
            classifier,
        }
    }
}

impl ResumeScorer for FakeScorePredictor {
    fn load(model_dir: &Path) -> Result<Self, ScoreError> {
        let paths = ModelPaths::new(model_dir);
        Ok(Self {
            vectorizer: load_part(paths.vectorizer(), ArtifactKind::Vectorizer)?,
            classifier: load_part(paths.classifier(), ArtifactKind::Classifier)?,
        })
    }

    fn score(&self, text: &str) -> Result<Score, ScoreError> {
        let features = self.vectorizer.transform(text).map_err(ScoreError::Transform)?;
        let [_, fake] = self
            .classifier
            .predict_proba(&features)
            .map_err(ScoreError::Inference)?;
        Score::new(fake)
    }
}

/// Sigmoid-squashed isolation-forest score. Raw scores lie in `[-1, 0)`, so
/// results fall in roughly `[0.27, 0.5)`; lower means more anomalous.
#[derive(Debug, Clone)]
pub struct AnomalyScorer {
    vectorizer: TfIdfVectorizer,
    anomaly_model: IsolationForest,
}

impl AnomalyScorer {
    pub fn from_models(vectorizer: TfIdfVectorizer, anomaly_model: IsolationForest) -> Self {
        Self {
            vectorizer,
            anomaly_model,
        }
    }
}

impl ResumeScorer for AnomalyScorer {
    fn load(model_dir: &Path) -> Result<Self, ScoreError> {
        let paths = ModelPaths::new(model_dir);
        Ok(Self {
            vectorizer: load_part(paths.vectorizer(), ArtifactKind::Vectorizer)?,
            anomaly_model: load_part(paths.anomaly_model(), ArtifactKind::AnomalyModel)?,
        })
    }

    fn score(&self, text: &str) -> Result<Score, ScoreError> {
        let features = self.vectorizer.transform(text).map_err(ScoreError::Transform)?;
        let raw = self
            .anomaly_model
            .score_samples(&features)
            .map_err(ScoreError::Inference)?;
        Score::new(sigmoid(raw))
    }
}

/// What a scorer binary reports for one invocation.
#[derive(Debug)]
pub enum ScoreOutcome {
    /// No text was given.
    NoInput,
    Scored(Score),
    /// Scoring failed; the neutral score is printed instead.
    Fallback(ScoreError),
}

impl ScoreOutcome {
    pub fn from_result(result: Result<Score, ScoreError>) -> Self {
        match result {
            Ok(score) => ScoreOutcome::Scored(score),
            Err(err) => ScoreOutcome::Fallback(err),
        }
    }

    /// The line written to stdout.
    pub fn stdout_line(&self) -> String {
        match self {
            ScoreOutcome::NoInput => FALLBACK_SCORE.to_string(),
            ScoreOutcome::Scored(score) => score.to_string(),
            ScoreOutcome::Fallback(_) => Score::fallback().to_string(),
        }
    }

    /// The diagnostic written to stderr, if any.
    pub fn stderr_line(&self) -> Option<String> {
        match self {
            ScoreOutcome::Fallback(err) => Some(format!("Error: {err}")),
            _ => None,
        }
    }
}

/// Load a scorer from `model_dir` and score `text`.
pub fn score_text<S: ResumeScorer>(model_dir: &Path, text: &str) -> Result<Score, ScoreError> {
    S::load(model_dir)?.score(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{FAKE_RESUMES, REAL_RESUMES, sample_corpus};
    use crate::ml::MLError;
    use crate::training::{Trainer, TrainingConfig};
    use tempfile::tempdir;

    fn in_memory_scorers() -> (FakeScorePredictor, AnomalyScorer) {
        let models = Trainer::new(TrainingConfig::default())
            .unwrap()
            .fit(&sample_corpus())
            .unwrap();
        (
            FakeScorePredictor::from_models(models.vectorizer.clone(), models.classifier),
            AnomalyScorer::from_models(models.vectorizer, models.anomaly_model),
        )
    }

    #[test]
    fn test_score_display() {
        assert_eq!(Score::new(0.84213).unwrap().to_string(), "0.8421");
        assert_eq!(Score::new(1.0).unwrap().to_string(), "1.0000");
        assert_eq!(Score::fallback().to_string(), "0.5000");
    }

    #[test]
    fn test_score_range() {
        assert_eq!(Score::new(1.5).unwrap().value(), 1.0);
        assert_eq!(Score::new(-0.25).unwrap().value(), 0.0);
        assert_eq!(Score::new(f64::INFINITY).unwrap().value(), 1.0);
        assert!(matches!(Score::new(f64::NAN), Err(ScoreError::NotANumber)));

        let outcome = ScoreOutcome::from_result(Score::new(f64::NAN));
        assert_eq!(outcome.stdout_line(), "0.5000");
        assert!(outcome.stderr_line().unwrap().starts_with("Error: "));
    }

    #[test]
    fn test_fake_score_separates_samples() {
        let (predictor, _) = in_memory_scorers();
        assert!(predictor.score(FAKE_RESUMES[1]).unwrap().value() > 0.5);
        assert!(predictor.score(REAL_RESUMES[1]).unwrap().value() < 0.5);
    }

    #[test]
    fn test_scores_stay_in_range() {
        let (predictor, anomaly) = in_memory_scorers();
        for text in ["", "zzzz qqqq", "-starts with a dash", "Python Docker Kubernetes"] {
            let fake = predictor.score(text).unwrap().value();
            assert!((0.0..=1.0).contains(&fake), "{fake}");
            let anomalous = anomaly.score(text).unwrap().value();
            assert!(anomalous > 0.0 && anomalous < 1.0, "{anomalous}");
        }
    }

    #[test]
    fn test_scoring_is_repeatable() {
        let (predictor, anomaly) = in_memory_scorers();
        let text = REAL_RESUMES[2];
        assert_eq!(predictor.score(text).unwrap(), predictor.score(text).unwrap());
        assert_eq!(anomaly.score(text).unwrap(), anomaly.score(text).unwrap());
    }

    #[test]
    fn test_missing_artifacts() {
        let dir = tempdir().unwrap();
        let err = FakeScorePredictor::load(dir.path()).unwrap_err();
        match &err {
            ScoreError::Load { path, .. } => assert!(path.ends_with("vectorizer.bin")),
            other => panic!("unexpected error: {other}"),
        }

        let outcome = ScoreOutcome::from_result(score_text::<AnomalyScorer>(dir.path(), "text"));
        assert_eq!(outcome.stdout_line(), "0.5000");
        assert!(outcome.stderr_line().unwrap().starts_with("Error: failed to load"));
    }

    #[test]
    fn test_mismatched_width_is_an_inference_error() {
        let (predictor, _) = in_memory_scorers();
        let narrow = Trainer::new(TrainingConfig::default().with_max_features(Some(5)))
            .unwrap()
            .fit(&sample_corpus())
            .unwrap();
        let mixed = FakeScorePredictor::from_models(narrow.vectorizer, predictor.classifier);

        let err = mixed.score(FAKE_RESUMES[0]).unwrap_err();
        assert!(matches!(
            err,
            ScoreError::Inference(FakeResumeError::Ml(MLError::DimensionMismatch { .. }))
        ));
    }

    #[test]
    fn test_no_input_outcome() {
        let outcome = ScoreOutcome::NoInput;
        assert_eq!(outcome.stdout_line(), "0.5");
        assert!(outcome.stderr_line().is_none());
    }
}
