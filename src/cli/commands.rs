//! Command implementations for the fakeresume binaries.

use std::io::Write;

use crate::cli::args::{ScoreArgs, TrainArgs};
use crate::cli::output::{output_score_outcome, output_training_report};
use crate::corpus::sample_corpus;
use crate::error::Result;
use crate::scoring::{ResumeScorer, ScoreOutcome, score_text};
use crate::training::{Trainer, TrainingConfig, TrainingReport};

/// Train on the sample corpus, write the artifacts and report to `out`.
pub fn run_train<W: Write>(args: &TrainArgs, out: &mut W) -> Result<TrainingReport> {
    let config = TrainingConfig::default()
        .with_output_dir(&args.output_dir)
        .with_max_features(Some(args.max_features))
        .with_seed(args.seed);
    log::info!("writing models to {}", config.output_dir.display());

    let trainer = Trainer::new(config)?;
    let report = trainer.train(&sample_corpus())?;
    output_training_report(out, &report, args)?;
    Ok(report)
}

/// Score the text named on the command line with scorer `S`.
pub fn run_score<S: ResumeScorer>(args: &ScoreArgs) -> ScoreOutcome {
    match &args.text {
        None => ScoreOutcome::NoInput,
        Some(text) => {
            if !args.ignored.is_empty() {
                log::debug!("ignoring {} extra argument(s)", args.ignored.len());
            }
            ScoreOutcome::from_result(score_text::<S>(&args.model_dir, text))
        }
    }
}

/// Run scorer `S` end to end and write its outcome to the standard streams.
pub fn execute_score<S: ResumeScorer>(args: &ScoreArgs) -> ScoreOutcome {
    let outcome = run_score::<S>(args);
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    if let Err(e) = output_score_outcome(&mut stdout.lock(), &mut stderr.lock(), &outcome) {
        log::error!("failed to write score: {e}");
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::FAKE_RESUMES;
    use crate::scoring::{AnomalyScorer, FakeScorePredictor};
    use clap::Parser;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn score_args(model_dir: &std::path::Path, text: Option<&str>) -> ScoreArgs {
        ScoreArgs {
            model_dir: model_dir.to_path_buf(),
            text: text.map(str::to_string),
            ignored: Vec::new(),
        }
    }

    #[test]
    fn test_train_then_score() {
        let dir = tempdir().unwrap();
        let output_dir = dir.path().join("models");
        let args = TrainArgs::try_parse_from([
            "train_model",
            "--quiet",
            "--output-dir",
            output_dir.to_str().unwrap(),
        ])
        .unwrap();

        let mut out = Vec::new();
        let report = run_train(&args, &mut out).unwrap();
        assert_eq!(report.output_dir, output_dir);
        assert_eq!(report.metadata.max_features, Some(100));

        match run_score::<FakeScorePredictor>(&score_args(&output_dir, Some(FAKE_RESUMES[3]))) {
            ScoreOutcome::Scored(score) => assert!(score.value() > 0.5),
            other => panic!("unexpected outcome: {other:?}"),
        }
        match run_score::<AnomalyScorer>(&score_args(&output_dir, Some(FAKE_RESUMES[3]))) {
            ScoreOutcome::Scored(score) => assert!(score.value() > 0.0 && score.value() < 0.5),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_score_without_text() {
        let outcome = run_score::<FakeScorePredictor>(&score_args(&PathBuf::from("missing"), None));
        assert!(matches!(outcome, ScoreOutcome::NoInput));
    }

    #[test]
    fn test_score_without_models_falls_back() {
        let dir = tempdir().unwrap();
        let outcome = run_score::<AnomalyScorer>(&score_args(dir.path(), Some("text")));
        assert!(matches!(outcome, ScoreOutcome::Fallback(_)));
        assert_eq!(outcome.stdout_line(), "0.5000");
    }

    #[test]
    fn test_train_into_unwritable_location() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let args = TrainArgs::try_parse_from([
            "train_model",
            "--output-dir",
            blocker.join("models").to_str().unwrap(),
        ])
        .unwrap();

        let err = run_train(&args, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("creating output directory"));
    }
}
