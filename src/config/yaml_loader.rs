//! YAML source reading and generic mapping helpers.
use std::fmt;
use std::io::Read as _;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

use crate::error::ConfigError;

/// Where a configuration document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A file on disk.
    File(PathBuf),
    /// Standard input.
    Stdin,
}

impl Source {
    /// File sources for `paths`, or a single stdin source when empty.
    #[must_use]
    pub fn from_args(paths: &[PathBuf]) -> Vec<Self> {
        if paths.is_empty() {
            vec![Self::Stdin]
        } else {
            paths.iter().cloned().map(Self::File).collect()
        }
    }

    /// Read the raw document text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the source cannot be read.
    pub fn read(&self) -> Result<String, ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: self.to_string(),
            source,
        };
        match self {
            Self::File(path) => std::fs::read_to_string(path).map_err(io_err),
            Self::Stdin => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text).map_err(io_err)?;
                Ok(text)
            }
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdin => f.write_str("<stdin>"),
        }
    }
}

/// Parse `text` into the generic YAML tree. An empty document is `Null`.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] on malformed YAML.
pub fn parse_document(label: &str, text: &str) -> Result<Value, ConfigError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
        file: label.to_string(),
        source,
    })
}

/// The mapping stored under `key`, if `value` is a mapping that has one.
///
/// Missing keys, `null`, and non-mapping values all read as absent.
#[must_use]
pub fn section<'a>(value: &'a Value, key: &str) -> Option<&'a Mapping> {
    value.get(key).and_then(Value::as_mapping)
}

/// Render a scalar mapping key as an entity name.
#[must_use]
pub fn key_name(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Deserialize every entry of `mapping` in document order.
///
/// A `null` body deserializes to `T::default()`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidKey`] for non-scalar keys and
/// [`ConfigError::InvalidEntry`] when a body does not match `T`.
pub fn entries<T>(
    label: &str,
    section_name: &str,
    mapping: &Mapping,
) -> Result<Vec<(String, T)>, ConfigError>
where
    T: DeserializeOwned + Default,
{
    mapping
        .iter()
        .map(|(key, body)| -> Result<(String, T), ConfigError> {
            let name = key_name(key).ok_or_else(|| ConfigError::InvalidKey {
                file: label.to_string(),
                section: section_name.to_string(),
                key: format!("{key:?}"),
            })?;
            if body.is_null() {
                return Ok((name, T::default()));
            }
            let entity = serde_yaml::from_value(body.clone()).map_err(|source| {
                ConfigError::InvalidEntry {
                    file: label.to_string(),
                    section: section_name.to_string(),
                    entity: name.clone(),
                    source,
                }
            })?;
            Ok((name, entity))
        })
        .collect()
}
