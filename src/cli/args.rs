//! Command line argument parsing for the fakeresume binaries using clap.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::artifact::{DEFAULT_SCORER_MODEL_DIR, DEFAULT_TRAINER_OUTPUT_DIR};

/// Environment variable overriding the model directory of every binary.
pub const MODEL_DIR_ENV: &str = "FAKERESUME_MODEL_DIR";

/// Train the fake resume detection models on the built-in sample corpus
#[derive(Parser, Debug, Clone)]
#[command(name = "train_model")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TrainArgs {
    /// Verbosity level (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Directory receiving the model artifacts
    #[arg(short, long, env = MODEL_DIR_ENV, default_value = DEFAULT_TRAINER_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Maximum vocabulary size of the TF-IDF vectorizer
    #[arg(long, default_value_t = 100)]
    pub max_features: usize,

    /// Seed for the isolation forest
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

impl TrainArgs {
    /// Effective verbosity: 0 quiet, 1 normal, 2 verbose, 3+ debug.
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        level_for_verbosity(self.verbosity())
    }
}

/// Map a verbosity level to a log filter.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

/// Arguments of the scorer binaries: one resume text.
///
/// No flags or options are recognized. The first argument is the text,
/// whatever it looks like (`--`, `-h` and `--model-dir=x` included), and
/// arguments after it are ignored. Arguments that are not valid UTF-8 are
/// converted lossily. The model directory comes from `FAKERESUME_MODEL_DIR`.
#[derive(Debug, Clone)]
pub struct ScoreArgs {
    /// Directory holding the model artifacts
    pub model_dir: PathBuf,

    /// Resume text to score
    pub text: Option<String>,

    /// Arguments after the text
    pub ignored: Vec<String>,
}

impl ScoreArgs {
    /// Build the scorer arguments from the process command line and
    /// environment. Never fails.
    pub fn from_env() -> Self {
        Self::from_parts(std::env::args_os(), std::env::var_os(MODEL_DIR_ENV))
    }

    /// Build the scorer arguments from raw arguments (program name first)
    /// and an optional model directory override.
    pub fn from_parts<I, T>(args: I, model_dir: Option<OsString>) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args = args
            .into_iter()
            .skip(1)
            .map(|arg| arg.into().to_string_lossy().into_owned());
        let text = args.next();
        let ignored = args.collect();
        let model_dir = model_dir
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCORER_MODEL_DIR));

        ScoreArgs {
            model_dir,
            text,
            ignored,
        }
    }
}

/// Output formats for the trainer report
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
