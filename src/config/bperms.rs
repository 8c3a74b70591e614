//! bPermissions `groups.yml` loading.
//!
//! Only groups are converted. Permissions are literal, `^` negates, parents
//! come from the `groups` list and display metadata from `meta`.
use serde::Deserialize;
use serde_yaml::Value;

use super::pex::non_empty;
use super::yaml_loader::{entries, section};
use crate::error::ConfigError;
use crate::model::{Accumulator, Group};
use crate::normalize::{PatternRules, parse_permissions};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Meta {
    prefix: Option<String>,
    suffix: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GroupDef {
    permissions: Option<Vec<String>>,
    groups: Option<Vec<String>>,
    meta: Option<Meta>,
}

/// Fold one bPermissions document into `acc`.
///
/// # Errors
///
/// Returns an error if a group body does not have the expected shape.
pub fn load(label: &str, doc: &Value, acc: &mut Accumulator) -> Result<(), ConfigError> {
    let Some(groups) = section(doc, "groups") else {
        return Ok(());
    };
    for (name, def) in entries::<GroupDef>(label, "groups", groups)? {
        let meta = def.meta.unwrap_or_default();
        let group = Group {
            permissions: parse_permissions(
                None,
                &def.permissions.unwrap_or_default(),
                PatternRules::BPERMS,
            ),
            parents: def.groups.unwrap_or_default(),
            prefix: non_empty(meta.prefix),
            suffix: non_empty(meta.suffix),
            members: Vec::new(),
        };
        acc.groups.insert(name, group);
    }
    Ok(())
}
