//! Structured, non-fatal conversion warnings.
use std::fmt;

/// What kind of lossy or risky construct a [`Warning`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// A group declares more than one parent; only the first is kept.
    MultipleParents,
    /// A player is a member of a group that is not defined.
    MissingGroup,
    /// A permission lives in the `group.` namespace the target manages itself.
    ReservedPermission,
    /// A group was never reached from a root and is not emitted.
    UnreachableGroup,
}

impl WarningKind {
    /// Short tag used when rendering.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::MultipleParents => "multiple-parents",
            Self::MissingGroup => "missing-group",
            Self::ReservedPermission => "reserved-permission",
            Self::UnreachableGroup => "unreachable-group",
        }
    }
}

/// A warning raised while converting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// Category of the warning.
    pub kind: WarningKind,
    /// The group or player that triggered it.
    pub entity: String,
    /// Human-readable explanation.
    pub detail: String,
}

impl Warning {
    /// Build a warning.
    #[must_use]
    pub fn new(kind: WarningKind, entity: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            entity: entity.into(),
            detail: detail.into(),
        }
    }

    /// `group` declares several parents.
    #[must_use]
    pub fn multiple_parents(group: &str, parents: &[String]) -> Self {
        Self::new(
            WarningKind::MultipleParents,
            group,
            format!(
                "group {group} has more than one parent ({}); using only {}",
                parents.join(", "),
                parents.first().map_or("", String::as_str)
            ),
        )
    }

    /// `player` is a member of the undefined `group`.
    #[must_use]
    pub fn missing_group(player: &str, group: &str) -> Self {
        Self::new(
            WarningKind::MissingGroup,
            player,
            format!("{player} is a member of {group}, but the group does not exist"),
        )
    }

    /// `entity` of kind `entity_type` carries the reserved `permission`.
    #[must_use]
    pub fn reserved_permission(entity_type: &str, entity: &str, permission: &str) -> Self {
        Self::new(
            WarningKind::ReservedPermission,
            entity,
            format!(
                "{entity_type} {entity} has a {permission} permission; \
                 these are set automatically, consider deleting it"
            ),
        )
    }

    /// `group` was not reachable through first-parent links from any root.
    #[must_use]
    pub fn unreachable_group(group: &str, parent: Option<&str>) -> Self {
        let detail = match parent {
            Some(p) => format!(
                "group {group} is not reachable from a root group through its parent {p} \
                 (undefined parent or inheritance cycle); it was not emitted"
            ),
            None => format!("group {group} was not emitted"),
        };
        Self::new(WarningKind::UnreachableGroup, group, detail)
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.tag(), self.detail)
    }
}
