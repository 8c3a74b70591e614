//! Serialization of normalized entities into the `permissions` command stream.
//!
//! Every entity block opens with a `#` comment header. Permission lines are
//! sorted case-insensitively by key and render polarity as `true`/`false`.
use std::io::{self, Write};

use crate::diagnostics::Warning;
use crate::model::{EntityTable, Group, PermissionSet, Player};

/// Namespace the target system fills in on its own.
const RESERVED_PREFIX: &str = "group.";

/// Which side of the command grammar an entity uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    /// `permissions player <name> ...`
    Player,
    /// `permissions group <name> ...`
    Group,
}

impl EntityType {
    /// Keyword used in command lines.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Group => "group",
        }
    }

    const fn title(self) -> &'static str {
        match self {
            Self::Player => "Player",
            Self::Group => "Group",
        }
    }
}

/// Counters and warnings collected while emitting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Emitted {
    /// Players that produced a block.
    pub players: usize,
    /// Groups that produced a block.
    pub groups: usize,
    /// Total lines written, comments included.
    pub lines: usize,
    /// Reserved-namespace warnings.
    pub warnings: Vec<Warning>,
}

/// Line-oriented command writer.
#[derive(Debug)]
pub struct Emitter<W: Write> {
    out: W,
    stats: Emitted,
}

impl<W: Write> Emitter<W> {
    /// Wrap `out`.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out,
            stats: Emitted::default(),
        }
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.stats.lines += 1;
        Ok(())
    }

    fn permissions(&mut self, kind: EntityType, name: &str, set: &PermissionSet) -> io::Result<()> {
        let entity = kind.as_str();
        for (key, value) in set.sorted() {
            self.line(&format!("permissions {entity} {name} set {key} {value}"))?;
            if key.to_lowercase().starts_with(RESERVED_PREFIX) {
                self.stats
                    .warnings
                    .push(Warning::reserved_permission(entity, name, key));
            }
        }
        Ok(())
    }

    fn metadata(
        &mut self,
        kind: EntityType,
        name: &str,
        prefix: Option<&str>,
        suffix: Option<&str>,
    ) -> io::Result<()> {
        let entity = kind.as_str();
        for (field, value) in [("prefix", prefix), ("suffix", suffix)] {
            if let Some(value) = value {
                self.line(&format!("permissions {entity} {name} metadata set {field} {value}"))?;
            }
        }
        Ok(())
    }

    /// Emit a player block. Blank players produce nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the sink fails.
    pub fn player(&mut self, name: &str, player: &Player) -> io::Result<()> {
        if player.is_blank() {
            return Ok(());
        }
        let kind = EntityType::Player;
        self.line(&format!("# {} {name}", kind.title()))?;
        self.permissions(kind, name, &player.permissions)?;
        self.metadata(kind, name, player.prefix.as_deref(), player.suffix.as_deref())?;
        self.stats.players += 1;
        Ok(())
    }

    /// Emit a group block: create, permissions, parent, metadata, members.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the sink fails.
    pub fn group(&mut self, name: &str, group: &Group) -> io::Result<()> {
        let kind = EntityType::Group;
        self.line(&format!("# {} {name}", kind.title()))?;
        self.line(&format!("permissions group {name} create"))?;
        self.permissions(kind, name, &group.permissions)?;
        if let Some(parent) = group.primary_parent() {
            self.line(&format!("permissions group {name} setparent {parent}"))?;
        }
        self.metadata(kind, name, group.prefix.as_deref(), group.suffix.as_deref())?;
        for member in &group.members {
            self.line(&format!("permissions group {name} add {member}"))?;
        }
        self.stats.groups += 1;
        Ok(())
    }

    /// Flush the sink and hand back the collected counters.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    pub fn finish(mut self) -> io::Result<Emitted> {
        self.out.flush()?;
        Ok(self.stats)
    }
}

/// Emit every player in table order, then groups in `order`.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn emit<W: Write>(
    players: &EntityTable<Player>,
    groups: &EntityTable<Group>,
    order: &[String],
    out: W,
) -> io::Result<Emitted> {
    let mut emitter = Emitter::new(out);
    for (name, player) in players.iter() {
        emitter.player(name, player)?;
    }
    for name in order {
        if let Some(group) = groups.get(name) {
            emitter.group(name, group)?;
        }
    }
    emitter.finish()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::diagnostics::WarningKind;

    fn render(
        players: &EntityTable<Player>,
        groups: &EntityTable<Group>,
        order: &[&str],
    ) -> (String, Emitted) {
        let order: Vec<String> = order.iter().map(ToString::to_string).collect();
        let mut buf = Vec::new();
        let stats = emit(players, groups, &order, &mut buf).unwrap();
        (String::from_utf8(buf).unwrap(), stats)
    }

    #[test]
    fn blank_player_produces_nothing() {
        let mut players = EntityTable::new();
        players.insert("ghost", Player::default());
        let (out, stats) = render(&players, &EntityTable::new(), &[]);
        assert!(out.is_empty());
        assert_eq!(stats.players, 0);
        assert_eq!(stats.lines, 0);
    }

    #[test]
    fn player_block_layout() {
        let mut permissions = PermissionSet::new();
        permissions.insert("b.node", false);
        permissions.insert("A.node", true);
        let mut players = EntityTable::new();
        players.insert(
            "alice",
            Player {
                permissions,
                prefix: Some("[A]".to_string()),
                suffix: None,
            },
        );
        let (out, stats) = render(&players, &EntityTable::new(), &[]);
        assert_eq!(
            out,
            "# Player alice\n\
             permissions player alice set A.node true\n\
             permissions player alice set b.node false\n\
             permissions player alice metadata set prefix [A]\n"
        );
        assert_eq!(stats.players, 1);
        assert_eq!(stats.lines, 4);
    }

    #[test]
    fn group_block_layout() {
        let mut permissions = PermissionSet::new();
        permissions.insert("world:build", true);
        let mut groups = EntityTable::new();
        groups.insert(
            "Mods",
            Group {
                permissions,
                parents: vec!["Default".to_string(), "Extra".to_string()],
                prefix: None,
                suffix: Some("*".to_string()),
                members: vec!["bob".to_string(), "carol".to_string()],
            },
        );
        let (out, _) = render(&EntityTable::new(), &groups, &["Mods"]);
        assert_eq!(
            out,
            "# Group Mods\n\
             permissions group Mods create\n\
             permissions group Mods set world:build true\n\
             permissions group Mods setparent Default\n\
             permissions group Mods metadata set suffix *\n\
             permissions group Mods add bob\n\
             permissions group Mods add carol\n"
        );
    }

    #[test]
    fn empty_group_still_created() {
        let mut groups = EntityTable::new();
        groups.insert("Empty", Group::default());
        let (out, stats) = render(&EntityTable::new(), &groups, &["Empty"]);
        assert_eq!(out, "# Group Empty\npermissions group Empty create\n");
        assert_eq!(stats.groups, 1);
    }

    #[test]
    fn reserved_namespace_warns_for_groups_and_players() {
        let mut permissions = PermissionSet::new();
        permissions.insert("Group.Admins", true);
        permissions.insert("world:group.x", true);
        let mut groups = EntityTable::new();
        groups.insert(
            "G",
            Group {
                permissions: permissions.clone(),
                ..Group::default()
            },
        );
        let mut players = EntityTable::new();
        players.insert(
            "p",
            Player {
                permissions,
                ..Player::default()
            },
        );
        let (out, stats) = render(&players, &groups, &["G"]);
        assert!(out.contains("permissions group G set Group.Admins true"));
        assert_eq!(stats.warnings.len(), 2);
        assert!(
            stats
                .warnings
                .iter()
                .all(|w| w.kind == WarningKind::ReservedPermission)
        );
        assert_eq!(stats.warnings[0].entity, "p");
        assert_eq!(stats.warnings[1].entity, "G");
    }

    #[test]
    fn players_precede_groups() {
        let mut players = EntityTable::new();
        players.insert(
            "zed",
            Player {
                suffix: Some("~".to_string()),
                ..Player::default()
            },
        );
        let mut groups = EntityTable::new();
        groups.insert("A", Group::default());
        let (out, _) = render(&players, &groups, &["A"]);
        let first = out.lines().next().unwrap();
        assert_eq!(first, "# Player zed");
    }
}
