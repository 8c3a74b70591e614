//! Group hierarchy resolution.
//!
//! The target model allows a single parent per group. A group is placed under
//! its first declared parent that is defined, so `setparent` (which always
//! names the first declared parent) is written after that parent exists
//! whenever it exists at all. Groups are emitted breadth-first from the
//! parentless roots.
//!
//! Inheritance cycles are not rejected. A group stranded behind a cycle is
//! still emitted once any other declared parent has been emitted. Groups that
//! no declared parent can reach are left out of the order and reported as
//! [`WarningKind::UnreachableGroup`].
//!
//! [`WarningKind::UnreachableGroup`]: crate::diagnostics::WarningKind::UnreachableGroup
use std::collections::{HashMap, HashSet, VecDeque};

use crate::diagnostics::Warning;
use crate::model::{EntityTable, Group};

/// Result of resolving the group hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Group names in emission order.
    pub order: Vec<String>,
    /// Multiple-parent and unreachable-group warnings.
    pub warnings: Vec<Warning>,
}

/// Compute the emission order for `groups`.
///
/// Roots keep table order; the children of each group are visited sorted by
/// name so repeated runs produce identical output. Every reachable group
/// appears exactly once.
#[must_use]
pub fn resolve(groups: &EntityTable<Group>) -> Resolution {
    let mut warnings = Vec::new();
    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut roots: VecDeque<&str> = VecDeque::new();

    for (name, group) in groups.iter() {
        if group.parents.len() > 1 {
            warnings.push(Warning::multiple_parents(name, &group.parents));
        }
        if group.parents.is_empty() {
            roots.push_back(name);
        } else if let Some(parent) = group
            .parents
            .iter()
            .find(|p| groups.contains(p.as_str()))
        {
            children.entry(parent.as_str()).or_default().push(name);
        }
    }
    for list in children.values_mut() {
        list.sort_unstable();
    }

    let mut order = Vec::with_capacity(groups.len());
    let mut seen: HashSet<&str> = HashSet::new();
    walk(roots, &children, &mut seen, &mut order);

    // Groups whose placement parent sits in a cycle hang off any other
    // declared parent that made it out.
    loop {
        let adopted: VecDeque<&str> = groups
            .iter()
            .filter(|&(name, group)| {
                !seen.contains(name) && group.parents.iter().any(|p| seen.contains(p.as_str()))
            })
            .map(|(name, _)| name)
            .collect();
        if adopted.is_empty() {
            break;
        }
        walk(adopted, &children, &mut seen, &mut order);
    }

    if order.len() < groups.len() {
        for (name, group) in groups.iter() {
            if !seen.contains(name) {
                warnings.push(Warning::unreachable_group(name, group.primary_parent()));
            }
        }
    }

    Resolution { order, warnings }
}

/// Breadth-first walk from `queue`, appending each unseen group to `order`.
fn walk<'a>(
    mut queue: VecDeque<&'a str>,
    children: &HashMap<&'a str, Vec<&'a str>>,
    seen: &mut HashSet<&'a str>,
    order: &mut Vec<String>,
) {
    while let Some(name) = queue.pop_front() {
        if !seen.insert(name) {
            continue;
        }
        order.push(name.to_string());
        if let Some(kids) = children.get(name) {
            queue.extend(kids.iter().copied());
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::diagnostics::WarningKind;

    fn table(defs: &[(&str, &[&str])]) -> EntityTable<Group> {
        let mut groups = EntityTable::new();
        for (name, parents) in defs {
            groups.insert(
                *name,
                Group {
                    parents: parents.iter().map(ToString::to_string).collect(),
                    ..Group::default()
                },
            );
        }
        groups
    }

    fn position(order: &[String], name: &str) -> usize {
        order
            .iter()
            .position(|n| n == name)
            .unwrap_or_else(|| panic!("{name} missing from order"))
    }

    #[test]
    fn chain_is_emitted_parent_first() {
        let groups = table(&[("C", &["B"]), ("B", &["A"]), ("A", &[])]);
        let res = resolve(&groups);
        assert_eq!(res.order, ["A", "B", "C"]);
        assert!(res.warnings.is_empty());
    }

    #[test]
    fn children_are_sorted_by_name() {
        let groups = table(&[("root", &[]), ("zed", &["root"]), ("amy", &["root"])]);
        assert_eq!(resolve(&groups).order, ["root", "amy", "zed"]);
    }

    #[test]
    fn roots_keep_table_order() {
        let groups = table(&[("Mods", &[]), ("Admins", &[]), ("Default", &[])]);
        assert_eq!(resolve(&groups).order, ["Mods", "Admins", "Default"]);
    }

    #[test]
    fn multiple_parents_warns_and_follows_first() {
        let groups = table(&[("D", &["C", "A"]), ("A", &[]), ("B", &["A"]), ("C", &["B"])]);
        let res = resolve(&groups);
        assert_eq!(res.order.len(), 4, "every group emitted exactly once");
        assert!(position(&res.order, "C") < position(&res.order, "D"));
        assert_eq!(res.warnings.len(), 1);
        assert_eq!(res.warnings[0].kind, WarningKind::MultipleParents);
        assert_eq!(res.warnings[0].entity, "D");
    }

    #[test]
    fn every_group_follows_its_parent() {
        let groups = table(&[
            ("g5", &["g3"]),
            ("g1", &[]),
            ("g3", &["g2"]),
            ("g2", &["g1"]),
            ("g4", &["g1"]),
        ]);
        let res = resolve(&groups);
        assert_eq!(res.order.len(), 5);
        for (name, group) in groups.iter() {
            if let Some(parent) = group.primary_parent() {
                assert!(position(&res.order, parent) < position(&res.order, name));
            }
        }
    }

    #[test]
    fn cycle_members_are_omitted_and_reported() {
        let groups = table(&[("A", &[]), ("X", &["Y"]), ("Y", &["X"])]);
        let res = resolve(&groups);
        assert_eq!(res.order, ["A"]);
        let unreachable: Vec<&str> = res
            .warnings
            .iter()
            .filter(|w| w.kind == WarningKind::UnreachableGroup)
            .map(|w| w.entity.as_str())
            .collect();
        assert_eq!(unreachable, ["X", "Y"]);
    }

    #[test]
    fn undefined_parent_is_reported() {
        let groups = table(&[("Orphan", &["Ghost"])]);
        let res = resolve(&groups);
        assert!(res.order.is_empty());
        assert_eq!(res.warnings.len(), 1);
        assert!(res.warnings[0].detail.contains("Ghost"));
    }

    #[test]
    fn undefined_first_parent_falls_back_to_defined_one() {
        let groups = table(&[("A", &[]), ("D", &["Ghost", "A"])]);
        let res = resolve(&groups);
        assert_eq!(res.order, ["A", "D"]);
        let kinds: Vec<WarningKind> = res.warnings.iter().map(|w| w.kind).collect();
        assert_eq!(kinds, [WarningKind::MultipleParents]);
    }

    #[test]
    fn group_behind_cycle_escapes_through_other_parent() {
        let groups = table(&[("A", &[]), ("X", &["Y", "A"]), ("Y", &["X"])]);
        let res = resolve(&groups);
        assert_eq!(res.order, ["A", "X", "Y"]);
        assert!(
            res.warnings
                .iter()
                .all(|w| w.kind != WarningKind::UnreachableGroup)
        );
    }

    #[test]
    fn resolution_is_deterministic() {
        let groups = table(&[("r", &[]), ("c", &["r"]), ("b", &["r"]), ("a", &["b"])]);
        assert_eq!(resolve(&groups), resolve(&groups));
    }
}
