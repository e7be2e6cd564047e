//! Anomaly scorer binary. Prints the sigmoid of the isolation-forest score of
//! the resume text given as the first argument. Always exits 0.

use log::LevelFilter;

use fakeresume::cli::{ScoreArgs, execute_score, init_logging};
use fakeresume::scoring::AnomalyScorer;

fn main() {
    init_logging(LevelFilter::Warn);
    let args = ScoreArgs::from_env();
    execute_score::<AnomalyScorer>(&args);
}
