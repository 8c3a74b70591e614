//! Entity model shared by every conversion stage.
//!
//! Groups and players are kept in insertion-ordered [`EntityTable`]s inside an
//! explicit [`Accumulator`] that each loaded source folds into. Once loading
//! finishes the tables are only read.
use std::collections::{BTreeMap, HashMap};

use crate::diagnostics::Warning;

/// Literal permission key to polarity, after expansion and world prefixing.
///
/// Inserting an existing key overwrites its value, so the last statement that
/// expands to a given literal wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    entries: BTreeMap<String, bool>,
}

impl PermissionSet {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Set `key` to `value`, replacing any earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: bool) {
        self.entries.insert(key.into(), value);
    }

    /// Merge every entry of `other` into `self`; `other` wins on collisions.
    pub fn extend(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Polarity stored for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<bool> {
        self.entries.get(key).copied()
    }

    /// Number of literal keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered case-insensitively by key.
    ///
    /// Keys differing only in case keep their byte order so output stays
    /// deterministic.
    #[must_use]
    pub fn sorted(&self) -> Vec<(&str, bool)> {
        let mut items: Vec<(&str, bool)> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        items.sort_by_cached_key(|(k, _)| k.to_lowercase());
        items
    }
}

/// A permission group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    /// Normalized permissions.
    pub permissions: PermissionSet,
    /// Declared parents in source order. Only the first is honored.
    pub parents: Vec<String>,
    /// Optional chat prefix.
    pub prefix: Option<String>,
    /// Optional chat suffix.
    pub suffix: Option<String>,
    /// Member player names in the order they were linked.
    pub members: Vec<String>,
}

impl Group {
    /// The parent used for emission.
    #[must_use]
    pub fn primary_parent(&self) -> Option<&str> {
        self.parents.first().map(String::as_str)
    }
}

/// A player. Players have no parents or members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Player {
    /// Normalized permissions.
    pub permissions: PermissionSet,
    /// Optional chat prefix.
    pub prefix: Option<String>,
    /// Optional chat suffix.
    pub suffix: Option<String>,
}

impl Player {
    /// A player with nothing to emit produces no output at all.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.permissions.is_empty() && self.prefix.is_none() && self.suffix.is_none()
    }
}

/// Name-keyed table that remembers first-insertion order.
///
/// Re-inserting a name replaces the whole record in place.
#[derive(Debug, Clone)]
pub struct EntityTable<T> {
    entries: Vec<(String, T)>,
    index: HashMap<String, usize>,
}

impl<T> Default for EntityTable<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> EntityTable<T> {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `entity` under `name`, returning the record it replaced.
    pub fn insert(&mut self, name: impl Into<String>, entity: T) -> Option<T> {
        let name = name.into();
        if let Some(&idx) = self.index.get(&name)
            && let Some(slot) = self.entries.get_mut(idx)
        {
            return Some(std::mem::replace(&mut slot.1, entity));
        }
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, entity));
        None
    }

    /// Look up an entity by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        let idx = *self.index.get(name)?;
        self.entries.get(idx).map(|(_, e)| e)
    }

    /// Mutable lookup by exact name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        let idx = *self.index.get(name)?;
        self.entries.get_mut(idx).map(|(_, e)| e)
    }

    /// Whether `name` is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterate `(name, entity)` in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(n, e)| (n.as_str(), e))
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// State accumulated across every input source.
#[derive(Debug, Default)]
pub struct Accumulator {
    /// All groups seen so far.
    pub groups: EntityTable<Group>,
    /// All players seen so far.
    pub players: EntityTable<Player>,
    /// Warnings raised while loading.
    pub warnings: Vec<Warning>,
}

impl Accumulator {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
