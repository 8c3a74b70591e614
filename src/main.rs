//! `perms-migrate` binary entry point.
use anyhow::Result;
use clap::Parser;

use perms_migrate::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);
    let log = logging::Logger::new();

    commands::convert::run(&args, &log)
}
