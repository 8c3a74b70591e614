//! Input source loading.
//!
//! Each source is parsed into the generic YAML tree and folded into an
//! explicit [`Accumulator`]. Sources are applied in order; an entity redefined
//! by a later source replaces the earlier record wholesale.
pub mod bperms;
pub mod pex;
pub mod yaml_loader;

use std::fmt;

pub use yaml_loader::Source;

use crate::error::ConfigError;
use crate::model::Accumulator;

/// Layout of the input configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Dialect {
    /// PermissionsEx `permissions.yml` (groups and users).
    #[default]
    #[value(name = "pex")]
    PermissionsEx,
    /// bPermissions `groups.yml` (groups only).
    #[value(name = "bperms")]
    BPermissions,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PermissionsEx => "pex",
            Self::BPermissions => "bperms",
        })
    }
}

/// Fold already-read document `text` into `acc`.
///
/// # Errors
///
/// Returns an error if the document is not valid YAML or an entity has the
/// wrong shape.
pub fn load_document(
    label: &str,
    text: &str,
    dialect: Dialect,
    acc: &mut Accumulator,
) -> Result<(), ConfigError> {
    let doc = yaml_loader::parse_document(label, text)?;
    match dialect {
        Dialect::PermissionsEx => pex::load(label, &doc, acc),
        Dialect::BPermissions => bperms::load(label, &doc, acc),
    }
}

/// Read `source` and fold it into `acc`.
///
/// # Errors
///
/// Returns an error if the source cannot be read or loaded.
pub fn load_source(
    source: &Source,
    dialect: Dialect,
    acc: &mut Accumulator,
) -> Result<(), ConfigError> {
    let text = source.read()?;
    load_document(&source.to_string(), &text, dialect, acc)
}
