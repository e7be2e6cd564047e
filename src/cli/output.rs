//! Output formatting for CLI commands.

use std::io::{self, Write};

use crate::cli::args::{OutputFormat, TrainArgs};
use crate::error::Result;
use crate::scoring::ScoreOutcome;
use crate::training::TrainingReport;

const RULE_WIDTH: usize = 60;

/// Write the training report in the format selected on the command line.
pub fn output_training_report<W: Write>(
    out: &mut W,
    report: &TrainingReport,
    args: &TrainArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(out, report, args),
        OutputFormat::Json => output_json(out, report, args),
    }
}

fn output_human<W: Write>(out: &mut W, report: &TrainingReport, args: &TrainArgs) -> Result<()> {
    let metadata = &report.metadata;
    let rule = "=".repeat(RULE_WIDTH);

    if args.verbosity() == 0 {
        writeln!(out, "Training complete: {}", report.output_dir.display())?;
        return Ok(());
    }

    writeln!(out, "{rule}")?;
    writeln!(out, "FAKE RESUME DETECTOR - ML MODEL TRAINING")?;
    writeln!(out, "{rule}")?;
    writeln!(out)?;
    writeln!(out, "Training data prepared:")?;
    writeln!(out, "  Real resumes: {}", metadata.real_samples)?;
    writeln!(out, "  Fake resumes: {}", metadata.fake_samples)?;
    writeln!(
        out,
        "  Total samples: {}",
        metadata.real_samples + metadata.fake_samples
    )?;
    writeln!(out)?;

    writeln!(out, "TF-IDF Vectorizer")?;
    writeln!(out, "  Vocabulary size: {}", metadata.vectorizer_features)?;
    writeln!(out)?;

    writeln!(out, "Logistic Regression Classifier")?;
    writeln!(out, "  Accuracy: {:.4}", metadata.lr_accuracy)?;
    if args.verbosity() > 1 {
        writeln!(out, "  Precision: {:.4}", metadata.lr_precision)?;
        writeln!(out, "  Recall: {:.4}", metadata.lr_recall)?;
        writeln!(out, "  F1: {:.4}", metadata.lr_f1)?;
        writeln!(out, "  Iterations: {}", report.lr_iterations)?;
    }
    writeln!(out)?;

    writeln!(out, "Isolation Forest (Anomaly Detection)")?;
    writeln!(out, "  Anomaly Detection Accuracy: {:.4}", metadata.iso_accuracy)?;
    if args.verbosity() > 1 {
        writeln!(out, "  Offset: {:.4}", metadata.iso_offset)?;
    }
    writeln!(out)?;

    for path in &report.saved {
        writeln!(out, "  Saved: {}", path.display())?;
    }

    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "TRAINING COMPLETE!")?;
    writeln!(out, "{rule}")?;
    writeln!(
        out,
        "Models saved in '{}' ({})",
        report.output_dir.display(),
        metadata.training_date
    )?;
    Ok(())
}

fn output_json<W: Write>(out: &mut W, report: &TrainingReport, args: &TrainArgs) -> Result<()> {
    if args.pretty {
        serde_json::to_writer_pretty(&mut *out, report)?;
    } else {
        serde_json::to_writer(&mut *out, report)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Write a scorer outcome: one line on `stdout`, and a diagnostic on
/// `stderr` when scoring failed.
pub fn output_score_outcome<O: Write, E: Write>(
    stdout: &mut O,
    stderr: &mut E,
    outcome: &ScoreOutcome,
) -> io::Result<()> {
    if let Some(line) = outcome.stderr_line() {
        writeln!(stderr, "{line}")?;
    }
    writeln!(stdout, "{}", outcome.stdout_line())?;
    stdout.flush()
}
