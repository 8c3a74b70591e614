//! Player-to-group membership linking.
use crate::diagnostics::Warning;
use crate::model::{EntityTable, Group};

/// Append `player` to the member list of every group in `memberships`.
///
/// Groups that are not defined are skipped with a warning; linking never
/// fails.
pub fn link_memberships<S: AsRef<str>>(
    player: &str,
    memberships: &[S],
    groups: &mut EntityTable<Group>,
) -> Vec<Warning> {
    let mut warnings = Vec::new();
    for group_name in memberships {
        let group_name = group_name.as_ref();
        match groups.get_mut(group_name) {
            Some(group) => group.members.push(player.to_string()),
            None => warnings.push(Warning::missing_group(player, group_name)),
        }
    }
    warnings
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::diagnostics::WarningKind;

    fn groups(names: &[&str]) -> EntityTable<Group> {
        let mut table = EntityTable::new();
        for name in names {
            table.insert(*name, Group::default());
        }
        table
    }

    #[test]
    fn appends_in_first_seen_order() {
        let mut table = groups(&["Builders"]);
        assert!(link_memberships("alice", &["Builders"], &mut table).is_empty());
        assert!(link_memberships("bob", &["Builders"], &mut table).is_empty());
        assert_eq!(table.get("Builders").unwrap().members, ["alice", "bob"]);
    }

    #[test]
    fn links_player_into_every_listed_group() {
        let mut table = groups(&["A", "B"]);
        link_memberships("carol", &["B", "A"], &mut table);
        assert_eq!(table.get("A").unwrap().members, ["carol"]);
        assert_eq!(table.get("B").unwrap().members, ["carol"]);
    }

    #[test]
    fn missing_group_warns_and_skips() {
        let mut table = groups(&["A"]);
        let warnings = link_memberships("dave", &["G", "A"], &mut table);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::MissingGroup);
        assert_eq!(warnings[0].entity, "dave");
        assert!(warnings[0].detail.contains('G'));
        assert!(!table.contains("G"), "missing group must not be created");
        assert_eq!(table.get("A").unwrap().members, ["dave"]);
    }

    #[test]
    fn group_lookup_is_case_sensitive() {
        let mut table = groups(&["Admins"]);
        let warnings = link_memberships("erin", &["admins"], &mut table);
        assert_eq!(warnings.len(), 1);
        assert!(table.get("Admins").unwrap().members.is_empty());
    }
}
