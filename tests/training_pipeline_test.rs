//! Train on the sample corpus and score with the persisted artifacts.

use std::fs;

use fakeresume::artifact::{ModelPaths, TrainingMetadata};
use fakeresume::corpus::{FAKE_RESUMES, REAL_RESUMES, sample_corpus};
use fakeresume::error::FakeResumeError;
use fakeresume::scoring::{AnomalyScorer, FakeScorePredictor, ResumeScorer, ScoreError};
use fakeresume::training::{Trainer, TrainingConfig};
use tempfile::TempDir;

fn train_into(dir: &TempDir) -> ModelPaths {
    let output_dir = dir.path().join("models");
    Trainer::new(TrainingConfig::default().with_output_dir(&output_dir))
        .unwrap()
        .train(&sample_corpus())
        .unwrap();
    ModelPaths::new(output_dir)
}

#[test]
fn test_fake_and_real_resumes_are_separated() {
    let dir = TempDir::new().unwrap();
    let paths = train_into(&dir);
    let predictor = FakeScorePredictor::load(paths.dir()).unwrap();

    for fake in FAKE_RESUMES {
        assert!(predictor.score(fake).unwrap().value() > 0.5);
    }
    for real in REAL_RESUMES {
        assert!(predictor.score(real).unwrap().value() < 0.5);
    }
}

#[test]
fn test_anomaly_scores_are_in_open_unit_interval() {
    let dir = TempDir::new().unwrap();
    let paths = train_into(&dir);
    let scorer = AnomalyScorer::load(paths.dir()).unwrap();

    for text in FAKE_RESUMES.iter().chain(REAL_RESUMES.iter()) {
        let score = scorer.score(text).unwrap().value();
        assert!(score > 0.0 && score < 1.0);
    }
    let unseen = scorer.score("Quantum blockchain wizard, 500 years").unwrap();
    assert!(unseen.value() > 0.0 && unseen.value() < 1.0);
}

#[test]
fn test_metadata_after_training() {
    let dir = TempDir::new().unwrap();
    let paths = train_into(&dir);
    let metadata = TrainingMetadata::load(&paths.metadata()).unwrap();

    assert_eq!(metadata.real_samples, 5);
    assert_eq!(metadata.fake_samples, 5);
    assert!(metadata.vectorizer_features <= 100);
    assert_eq!(metadata.max_features, Some(100));
    assert_eq!(metadata.lr_accuracy, 1.0);
    assert!((0.0..=1.0).contains(&metadata.iso_accuracy));
    assert!(chrono::NaiveDate::parse_from_str(&metadata.training_date, "%Y-%m-%d").is_ok());
}

#[test]
fn test_retraining_produces_identical_artifacts() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let a = train_into(&first);
    let b = train_into(&second);

    for (left, right) in [
        (a.vectorizer(), b.vectorizer()),
        (a.classifier(), b.classifier()),
        (a.anomaly_model(), b.anomaly_model()),
    ] {
        assert_eq!(fs::read(&left).unwrap(), fs::read(&right).unwrap());
    }
}

#[test]
fn test_artifact_in_wrong_slot_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let paths = train_into(&dir);
    fs::copy(paths.anomaly_model(), paths.classifier()).unwrap();

    match FakeScorePredictor::load(paths.dir()) {
        Err(ScoreError::Load { path, source }) => {
            assert_eq!(path, paths.classifier());
            assert!(matches!(source, FakeResumeError::Artifact(_)));
        }
        other => panic!("expected load error, got {other:?}"),
    }
}

#[test]
fn test_truncated_artifact_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let paths = train_into(&dir);
    let bytes = fs::read(paths.vectorizer()).unwrap();
    fs::write(paths.vectorizer(), &bytes[..bytes.len() / 2]).unwrap();

    assert!(matches!(
        AnomalyScorer::load(paths.dir()),
        Err(ScoreError::Load { .. })
    ));
}
