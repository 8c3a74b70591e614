//! PermissionsEx `permissions.yml` loading.
//!
//! ```yaml
//! groups:
//!   Default:
//!     permissions: [modifyworld.*]
//!     worlds:
//!       nether:
//!         permissions: [-modifyworld.(place|break)]
//!     prefix: '&7'
//!   Mods:
//!     inheritance: [Default]
//! users:
//!   alice:
//!     group: [Mods]
//!     permissions: [worldedit.*]
//! ```
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use super::yaml_loader::{entries, section};
use crate::error::ConfigError;
use crate::linker::link_memberships;
use crate::model::{Accumulator, Group, PermissionSet, Player};
use crate::normalize::{PatternRules, normalize};

/// A list that may also be written as a single bare string.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(s) => vec![s],
            Self::Many(v) => v,
        }
    }
}

fn list(value: Option<OneOrMany>) -> Vec<String> {
    value.map(OneOrMany::into_vec).unwrap_or_default()
}

/// Per-world override block.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WorldDef {
    permissions: Option<OneOrMany>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GroupDef {
    permissions: Option<OneOrMany>,
    worlds: Option<Mapping>,
    inheritance: Option<OneOrMany>,
    prefix: Option<String>,
    suffix: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UserDef {
    permissions: Option<OneOrMany>,
    worlds: Option<Mapping>,
    group: Option<OneOrMany>,
    prefix: Option<String>,
    suffix: Option<String>,
}

/// Empty strings count as unset, matching how the plugin treats them.
pub(super) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn permissions(
    label: &str,
    global: Option<OneOrMany>,
    worlds: Option<&Mapping>,
) -> Result<PermissionSet, ConfigError> {
    let worlds: Vec<(String, Vec<String>)> = match worlds {
        Some(mapping) => entries::<WorldDef>(label, "worlds", mapping)?
            .into_iter()
            .map(|(world, def)| (world, list(def.permissions)))
            .collect(),
        None => Vec::new(),
    };
    Ok(normalize(&list(global), &worlds, PatternRules::PEX))
}

/// Fold one PermissionsEx document into `acc`.
///
/// Groups are loaded before users so that memberships declared in the same
/// document resolve.
///
/// # Errors
///
/// Returns an error if an entity body does not have the expected shape.
pub fn load(label: &str, doc: &Value, acc: &mut Accumulator) -> Result<(), ConfigError> {
    if let Some(groups) = section(doc, "groups") {
        for (name, def) in entries::<GroupDef>(label, "groups", groups)? {
            let group = Group {
                permissions: permissions(label, def.permissions, def.worlds.as_ref())?,
                parents: list(def.inheritance),
                prefix: non_empty(def.prefix),
                suffix: non_empty(def.suffix),
                members: Vec::new(),
            };
            acc.groups.insert(name, group);
        }
    }

    if let Some(users) = section(doc, "users") {
        for (name, def) in entries::<UserDef>(label, "users", users)? {
            let memberships = list(def.group);
            acc.warnings
                .extend(link_memberships(&name, &memberships, &mut acc.groups));
            let player = Player {
                permissions: permissions(label, def.permissions, def.worlds.as_ref())?,
                prefix: non_empty(def.prefix),
                suffix: non_empty(def.suffix),
            };
            acc.players.insert(name, player);
        }
    }

    Ok(())
}
