//! Model trainer binary.

use std::process;

use clap::Parser;

use fakeresume::cli::{TrainArgs, init_logging, run_train};

fn main() {
    let args = TrainArgs::parse();
    init_logging(args.log_level());

    if let Err(e) = run_train(&args, &mut std::io::stdout().lock()) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
