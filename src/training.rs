//! Model training.
//!
//! A [`Trainer`] fits the vectorizer on the labeled corpus, then fits the
//! classifier and the anomaly detector on the vectorized texts. [`Trainer::train`]
//! additionally writes the three artifacts and `metadata.json` to the
//! configured output directory.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::artifact::{
    ArtifactKind, DEFAULT_TRAINER_OUTPUT_DIR, ModelPaths, TrainingMetadata, save_artifact,
};
use crate::corpus::{Label, LabeledSample, count_label};
use crate::error::{FakeResumeError, Result};
use crate::ml::isolation_forest::Outlier;
use crate::ml::metrics::accuracy_score;
use crate::ml::{
    ClassificationMetrics, IsolationForest, IsolationForestConfig, LogisticRegression,
    LogisticRegressionConfig, TfIdfConfig, TfIdfVectorizer,
};

/// Everything the trainer needs to know.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    /// Directory receiving the artifacts. Created if missing.
    pub output_dir: PathBuf,
    pub tfidf: TfIdfConfig,
    pub logistic: LogisticRegressionConfig,
    pub isolation: IsolationForestConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_TRAINER_OUTPUT_DIR),
            tfidf: TfIdfConfig::default(),
            logistic: LogisticRegressionConfig::default(),
            isolation: IsolationForestConfig::default(),
        }
    }
}

impl TrainingConfig {
    pub fn with_output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_max_features(mut self, max_features: Option<usize>) -> Self {
        self.tfidf.max_features = max_features;
        self
    }

    /// Seed for the only randomized estimator, the isolation forest.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.isolation.random_state = seed;
        self
    }
}

/// The three fitted models plus their training-set diagnostics.
#[derive(Debug, Clone)]
pub struct TrainedModels {
    pub vectorizer: TfIdfVectorizer,
    pub classifier: LogisticRegression,
    pub anomaly_model: IsolationForest,
    pub lr_metrics: ClassificationMetrics,
    /// Share of samples where "outlier" coincides with the fake label.
    pub iso_accuracy: f64,
    pub real_samples: usize,
    pub fake_samples: usize,
}

/// Outcome of a full training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub metadata: TrainingMetadata,
    /// Gradient steps taken by the classifier.
    pub lr_iterations: usize,
    pub output_dir: PathBuf,
    /// Files written, in write order.
    pub saved: Vec<PathBuf>,
}

/// Fits and persists the models.
#[derive(Debug, Clone)]
pub struct Trainer {
    config: TrainingConfig,
}

impl Trainer {
    /// Validate the estimator configurations and build a trainer.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        TfIdfVectorizer::new(config.tfidf.clone())?;
        LogisticRegression::new(config.logistic.clone())?;
        IsolationForest::new(config.isolation.clone())?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Fit all models on `samples` without touching the filesystem.
    pub fn fit(&self, samples: &[LabeledSample]) -> Result<TrainedModels> {
        if samples.is_empty() {
            return Err(FakeResumeError::invalid_argument("training corpus is empty"));
        }
        let real_samples = count_label(samples, Label::Real);
        let fake_samples = count_label(samples, Label::Fake);
        log::info!("training on {real_samples} real and {fake_samples} fake resumes");

        let texts: Vec<&str> = samples.iter().map(|s| s.text.as_str()).collect();
        let labels: Vec<u8> = samples.iter().map(|s| s.label.as_class()).collect();

        let mut vectorizer = TfIdfVectorizer::new(self.config.tfidf.clone())?;
        let features = vectorizer.fit_transform(&texts)?;
        log::info!("vocabulary size: {}", vectorizer.vocabulary_size());

        let mut classifier = LogisticRegression::new(self.config.logistic.clone())?;
        classifier.fit(&features, &labels)?;
        let lr_predictions = features
            .iter()
            .map(|row| classifier.predict(row))
            .collect::<Result<Vec<_>>>()?;
        let lr_metrics = ClassificationMetrics::compute(&labels, &lr_predictions);
        log::info!("logistic regression training accuracy: {:.2}", lr_metrics.accuracy);

        let mut anomaly_model = IsolationForest::new(self.config.isolation.clone())?;
        anomaly_model.fit(&features)?;
        let iso_predictions = features
            .iter()
            .map(|row| {
                anomaly_model
                    .predict(row)
                    .map(|outlier| u8::from(outlier == Outlier::Outlier))
            })
            .collect::<Result<Vec<_>>>()?;
        let iso_accuracy = accuracy_score(&labels, &iso_predictions);
        log::info!("isolation forest agreement with labels: {iso_accuracy:.2}");

        Ok(TrainedModels {
            vectorizer,
            classifier,
            anomaly_model,
            lr_metrics,
            iso_accuracy,
            real_samples,
            fake_samples,
        })
    }

    /// Fit all models on `samples` and write them to the output directory.
    ///
    /// Existing artifacts are overwritten.
    pub fn train(&self, samples: &[LabeledSample]) -> Result<TrainingReport> {
        let models = self.fit(samples)?;

        let output_dir = &self.config.output_dir;
        fs::create_dir_all(output_dir)
            .with_context(|| format!("creating output directory {}", output_dir.display()))?;
        let paths = ModelPaths::new(output_dir);

        let vectorizer_path = paths.vectorizer();
        save_artifact(&vectorizer_path, ArtifactKind::Vectorizer, &models.vectorizer)
            .with_context(|| format!("writing {}", vectorizer_path.display()))?;
        let classifier_path = paths.classifier();
        save_artifact(&classifier_path, ArtifactKind::Classifier, &models.classifier)
            .with_context(|| format!("writing {}", classifier_path.display()))?;
        let anomaly_path = paths.anomaly_model();
        save_artifact(&anomaly_path, ArtifactKind::AnomalyModel, &models.anomaly_model)
            .with_context(|| format!("writing {}", anomaly_path.display()))?;

        let metadata = TrainingMetadata {
            vectorizer_features: models.vectorizer.vocabulary_size(),
            real_samples: models.real_samples,
            fake_samples: models.fake_samples,
            lr_accuracy: models.lr_metrics.accuracy,
            lr_precision: models.lr_metrics.precision,
            lr_recall: models.lr_metrics.recall,
            lr_f1: models.lr_metrics.f1,
            iso_accuracy: models.iso_accuracy,
            iso_offset: models.anomaly_model.offset(),
            max_features: self.config.tfidf.max_features,
            training_date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            crate_version: crate::VERSION.to_string(),
        };
        let metadata_path = paths.metadata();
        metadata
            .save(&metadata_path)
            .with_context(|| format!("writing {}", metadata_path.display()))?;

        Ok(TrainingReport {
            metadata,
            lr_iterations: models.classifier.n_iter(),
            output_dir: output_dir.clone(),
            saved: vec![vectorizer_path, classifier_path, anomaly_path, metadata_path],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::load_artifact;
    use crate::corpus::{FAKE_RESUMES, REAL_RESUMES, sample_corpus};
    use tempfile::tempdir;

    #[test]
    fn test_fit_on_sample_corpus() {
        let trainer = Trainer::new(TrainingConfig::default()).unwrap();
        let models = trainer.fit(&sample_corpus()).unwrap();

        assert_eq!(models.real_samples, 5);
        assert_eq!(models.fake_samples, 5);
        assert!(models.vectorizer.vocabulary_size() <= 100);
        assert!(models.vectorizer.vocabulary_size() > 0);
        assert_eq!(models.lr_metrics.accuracy, 1.0);
        assert!((0.0..=1.0).contains(&models.iso_accuracy));

        let fake = models.vectorizer.transform(FAKE_RESUMES[0]).unwrap();
        let real = models.vectorizer.transform(REAL_RESUMES[0]).unwrap();
        assert!(models.classifier.predict_proba(&fake).unwrap()[1] > 0.5);
        assert!(models.classifier.predict_proba(&real).unwrap()[1] < 0.5);
    }

    #[test]
    fn test_anomaly_model_flags_at_most_contamination_share() {
        let trainer = Trainer::new(TrainingConfig::default()).unwrap();
        let corpus = sample_corpus();
        let models = trainer.fit(&corpus).unwrap();

        let outliers = corpus
            .iter()
            .map(|s| models.vectorizer.transform(&s.text).unwrap())
            .filter(|row| models.anomaly_model.predict(row).unwrap() == Outlier::Outlier)
            .count();
        assert!(outliers <= 3);
    }

    #[test]
    fn test_train_writes_artifacts() {
        let dir = tempdir().unwrap();
        let output_dir = dir.path().join("nested").join("models");
        let trainer =
            Trainer::new(TrainingConfig::default().with_output_dir(&output_dir)).unwrap();
        let report = trainer.train(&sample_corpus()).unwrap();

        assert_eq!(report.saved.len(), 4);
        for path in &report.saved {
            assert!(path.exists(), "{} missing", path.display());
        }
        assert_eq!(report.metadata.real_samples, 5);
        assert_eq!(report.metadata.fake_samples, 5);
        assert_eq!(report.metadata.training_date.len(), 10);

        let paths = ModelPaths::new(&output_dir);
        let vectorizer: TfIdfVectorizer =
            load_artifact(&paths.vectorizer(), ArtifactKind::Vectorizer).unwrap();
        assert_eq!(
            vectorizer.vocabulary_size(),
            report.metadata.vectorizer_features
        );
        assert_eq!(TrainingMetadata::load(&paths.metadata()).unwrap(), report.metadata);
    }

    #[test]
    fn test_max_features_is_honoured() {
        let trainer =
            Trainer::new(TrainingConfig::default().with_max_features(Some(10))).unwrap();
        let models = trainer.fit(&sample_corpus()).unwrap();
        assert_eq!(models.vectorizer.vocabulary_size(), 10);
    }

    #[test]
    fn test_empty_corpus_is_rejected() {
        let trainer = Trainer::new(TrainingConfig::default()).unwrap();
        assert!(matches!(
            trainer.fit(&[]),
            Err(FakeResumeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = TrainingConfig::default();
        config.isolation.contamination = 0.9;
        assert!(Trainer::new(config).is_err());
    }
}
