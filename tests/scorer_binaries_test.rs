//! Drive the compiled binaries the way an external caller does.

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output};

use fakeresume::corpus::{FAKE_RESUMES, REAL_RESUMES, sample_corpus};
use fakeresume::training::{Trainer, TrainingConfig};
use tempfile::TempDir;

const PREDICT: &str = env!("CARGO_BIN_EXE_predict");
const ANOMALY_PREDICT: &str = env!("CARGO_BIN_EXE_anomaly_predict");
const TRAIN_MODEL: &str = env!("CARGO_BIN_EXE_train_model");

fn run(binary: &str, cwd: &Path, args: &[&str]) -> Output {
    let args: Vec<&OsStr> = args.iter().map(OsStr::new).collect();
    run_os(binary, cwd, &args)
}

fn run_os(binary: &str, cwd: &Path, args: &[&OsStr]) -> Output {
    Command::new(binary)
        .args(args)
        .current_dir(cwd)
        .env_remove("FAKERESUME_MODEL_DIR")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

/// A working directory with trained models at the scorers' default location.
fn trained_workdir() -> TempDir {
    let dir = TempDir::new().unwrap();
    Trainer::new(TrainingConfig::default().with_output_dir(dir.path().join("python/models")))
        .unwrap()
        .train(&sample_corpus())
        .unwrap();
    dir
}

fn parse_score(output: &Output) -> f64 {
    let text = stdout(output);
    let line = text.strip_suffix('\n').unwrap();
    assert!(!line.contains('\n'), "more than one line: {text:?}");
    let (_, decimals) = line.split_once('.').unwrap();
    assert_eq!(decimals.len(), 4, "not four decimals: {line}");
    line.parse().unwrap()
}

#[test]
fn test_no_argument_prints_neutral_score() {
    let dir = TempDir::new().unwrap();
    for binary in [PREDICT, ANOMALY_PREDICT] {
        let output = run(binary, dir.path(), &[]);
        assert!(output.status.success());
        assert_eq!(stdout(&output), "0.5\n");
    }
}

#[test]
fn test_missing_models_fall_back() {
    let dir = TempDir::new().unwrap();
    for binary in [PREDICT, ANOMALY_PREDICT] {
        let output = run(binary, dir.path(), &["Senior Engineer, Google"]);
        assert!(output.status.success());
        assert_eq!(stdout(&output), "0.5000\n");
        assert!(stderr(&output).starts_with("Error: "));
    }
}

#[test]
fn test_predict_scores_samples() {
    let dir = trained_workdir();

    let fake = run(PREDICT, dir.path(), &[FAKE_RESUMES[0]]);
    assert!(fake.status.success());
    assert!(parse_score(&fake) > 0.5);

    let real = run(PREDICT, dir.path(), &[REAL_RESUMES[0]]);
    assert!(parse_score(&real) < 0.5);
    assert!(stderr(&real).is_empty());
}

#[test]
fn test_anomaly_predict_range_and_repeatability() {
    let dir = trained_workdir();
    let first = run(ANOMALY_PREDICT, dir.path(), &[FAKE_RESUMES[2]]);
    let second = run(ANOMALY_PREDICT, dir.path(), &[FAKE_RESUMES[2]]);

    let score = parse_score(&first);
    assert!(score > 0.0 && score < 1.0);
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_hyphen_text_and_extra_arguments() {
    let dir = trained_workdir();
    let output = run(PREDICT, dir.path(), &["--help", "ignored", "arguments"]);
    assert!(output.status.success());
    let score = parse_score(&output);
    assert!((0.0..=1.0).contains(&score));
}

#[test]
fn test_option_like_text_is_scored() {
    let dir = trained_workdir();
    for binary in [PREDICT, ANOMALY_PREDICT] {
        for text in ["--", "--model-dir=/nonexistent", "-"] {
            let output = run(binary, dir.path(), &[text]);
            assert!(output.status.success());
            let score = parse_score(&output);
            assert!((0.0..=1.0).contains(&score), "{text}: {score}");
            assert!(stderr(&output).is_empty(), "{text}: {}", stderr(&output));
        }
    }

    // Same text as an empty resume, not the no-input literal.
    let empty = run(PREDICT, dir.path(), &[""]);
    let dashes = run(PREDICT, dir.path(), &["--"]);
    assert_eq!(empty.stdout, dashes.stdout);
}

#[cfg(unix)]
#[test]
fn test_text_not_utf8_is_scored() {
    use std::os::unix::ffi::OsStrExt;

    let dir = trained_workdir();
    let text = OsStr::from_bytes(b"Senior Engineer \xff\xfe Google");
    for binary in [PREDICT, ANOMALY_PREDICT] {
        let output = run_os(binary, dir.path(), &[text]);
        assert_eq!(output.status.code(), Some(0));
        let score = parse_score(&output);
        assert!((0.0..=1.0).contains(&score));
    }
}

#[test]
fn test_model_dir_from_environment() {
    let dir = TempDir::new().unwrap();
    let models = dir.path().join("elsewhere");
    Trainer::new(TrainingConfig::default().with_output_dir(&models))
        .unwrap()
        .train(&sample_corpus())
        .unwrap();

    let output = Command::new(PREDICT)
        .arg(FAKE_RESUMES[4])
        .current_dir(dir.path())
        .env("FAKERESUME_MODEL_DIR", &models)
        .output()
        .unwrap();
    assert!(parse_score(&output) > 0.5);
}

#[test]
fn test_train_model_binary() {
    let dir = TempDir::new().unwrap();
    let output = run(TRAIN_MODEL, dir.path(), &["--format", "json"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["metadata"]["real_samples"], 5);
    assert_eq!(report["metadata"]["fake_samples"], 5);
    for file in ["vectorizer.bin", "lr_classifier.bin", "isolation_forest.bin", "metadata.json"] {
        assert!(dir.path().join("models").join(file).exists(), "{file} missing");
    }
}

#[test]
fn test_train_model_failure_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("models"), b"a file, not a directory").unwrap();

    let output = run(TRAIN_MODEL, dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error: "));
}
