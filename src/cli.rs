//! Command-line argument definitions.
use std::path::PathBuf;

use clap::Parser;

use crate::config::Dialect;

/// Command-line entry point for the permissions converter.
#[derive(Parser, Debug)]
#[command(
    name = "perms-migrate",
    about = "Convert PermissionsEx or bPermissions configuration into zPermissions commands",
    version = crate::VERSION
)]
pub struct Cli {
    /// File to write the generated commands to
    pub output: PathBuf,

    /// Configuration files to convert, applied in order (reads stdin when omitted)
    pub inputs: Vec<PathBuf>,

    /// Layout of the input configuration
    #[arg(short, long, value_enum, default_value_t = Dialect::PermissionsEx)]
    pub dialect: Dialect,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
