use std::process::ExitCode;

use clap::Parser;
use spending_tracker::cli::{self, output, Cli};

fn main() -> ExitCode {
    let args = Cli::parse();
    spending_tracker::init();

    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            output::error(err);
            ExitCode::FAILURE
        }
    }
}
