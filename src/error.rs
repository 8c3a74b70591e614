//! Domain-specific error types for the converter.
//!
//! Internal modules return typed errors while the command handler at the CLI
//! boundary converts them to [`anyhow::Error`] via `?`.
//!
//! # Error hierarchy
//!
//! ```text
//! ConvertError
//! ├── Config(ConfigError) — reading or parsing an input source
//! └── Output              — creating or writing the command file
//! ```

use std::io;

use thiserror::Error;

/// Top-level error type for a conversion run.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// An input source could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The output file could not be created or written.
    #[error("Failed to write commands to {path}: {source}")]
    Output {
        /// Output path as given on the command line.
        path: String,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Errors that arise while reading and interpreting an input source.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The source could not be read.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// Source label (file path or `<stdin>`).
        path: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The source is not a valid YAML document.
    #[error("Invalid YAML in {file}: {source}")]
    Parse {
        /// Source label.
        file: String,
        /// Parser error.
        source: serde_yaml::Error,
    },

    /// A mapping key is not a scalar that can name an entity.
    #[error("Unsupported key under '{section}' in {file}: {key}")]
    InvalidKey {
        /// Source label.
        file: String,
        /// Section holding the key (e.g. `groups`).
        section: String,
        /// Debug rendering of the offending key.
        key: String,
    },

    /// An entity body does not have the expected shape.
    #[error("Invalid entry '{entity}' under '{section}' in {file}: {source}")]
    InvalidEntry {
        /// Source label.
        file: String,
        /// Section holding the entity.
        section: String,
        /// Entity name.
        entity: String,
        /// Deserialization error.
        source: serde_yaml::Error,
    },
}
