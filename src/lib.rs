//! Permissions configuration converter.
//!
//! Reads PermissionsEx (or bPermissions) YAML configuration and writes an
//! ordered stream of zPermissions `permissions ...` commands that rebuild the
//! same groups, players, inheritance, memberships, and display metadata.
//!
//! The library is organised into these layers:
//!
//! - **[`config`]** — read YAML sources and fold them into an [`model::Accumulator`]
//! - **[`normalize`]** — expand permission patterns and merge world scopes
//! - **[`linker`]** — turn player group lists into group member lists
//! - **[`hierarchy`]** — order groups so parents are created before children
//! - **[`emit`]** — write the command stream
//! - **[`commands`]** — the end-to-end pipeline used by the binary
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod emit;
pub mod error;
pub mod hierarchy;
pub mod linker;
pub mod logging;
pub mod model;
pub mod normalize;

/// Version string reported by `--version`.
pub const VERSION: &str = match option_env!("PERMS_MIGRATE_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};
