//! Command line interface shared by the fakeresume binaries.

use std::io::Write;

use env_logger::Builder;
use log::LevelFilter;

pub mod args;
pub mod commands;
pub mod output;

// Re-export commonly used types
pub use args::*;
pub use commands::*;
pub use output::*;

/// Install the stderr logger. `RUST_LOG`, when set, overrides `level`.
pub fn init_logging(level: LevelFilter) {
    Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}
