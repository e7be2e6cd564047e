//! Fake-score predictor binary. Prints the probability that the resume text
//! given as the first argument is fake. Always exits 0.

use log::LevelFilter;

use fakeresume::cli::{ScoreArgs, execute_score, init_logging};
use fakeresume::scoring::FakeScorePredictor;

fn main() {
    init_logging(LevelFilter::Warn);
    let args = ScoreArgs::from_env();
    execute_score::<FakeScorePredictor>(&args);
}
