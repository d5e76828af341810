use std::process::ExitCode;

use boltslot::{cli, init_logging, Cli};
use clap::Parser;

fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();

    // Initialize logging
    init_logging(args.log_json)?;

    if cli::run(args)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
