//! Permission pattern expansion and world-scope merging.
use crate::model::PermissionSet;

/// How raw permission strings of a dialect are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternRules {
    /// Leading character that flips a permission to `false`.
    pub negation: char,
    /// Whether `prefix.(a|b).suffix` alternations are expanded.
    pub expand_alternation: bool,
}

impl PatternRules {
    /// PermissionsEx: `-` negates, alternations expand.
    pub const PEX: Self = Self {
        negation: '-',
        expand_alternation: true,
    };

    /// bPermissions: `^` negates, patterns are literal.
    pub const BPERMS: Self = Self {
        negation: '^',
        expand_alternation: false,
    };
}

/// Expand a single parenthesized, pipe-separated alternation.
///
/// The last `(` that is followed by a non-empty run up to a `)` delimits the
/// group; surrounding text is kept verbatim. Anything else is returned as-is.
///
/// ```
/// use perms_migrate::normalize::expand_pattern;
///
/// assert_eq!(expand_pattern("a.(x|y).z"), ["a.x.z", "a.y.z"]);
/// assert_eq!(expand_pattern("a.b.c"), ["a.b.c"]);
/// ```
#[must_use]
pub fn expand_pattern(pattern: &str) -> Vec<String> {
    for (open, _) in pattern.rmatch_indices('(') {
        let (head, rest) = pattern.split_at(open);
        let Some((inner, tail)) = rest.strip_prefix('(').and_then(|r| r.split_once(')')) else {
            continue;
        };
        if inner.is_empty() {
            continue;
        }
        return inner
            .split('|')
            .map(|alt| format!("{head}{alt}{tail}"))
            .collect();
    }
    vec![pattern.to_string()]
}

/// Normalize one list of raw permission statements.
///
/// With `world` set, every literal key is prefixed with `<world>:`.
#[must_use]
pub fn parse_permissions<S: AsRef<str>>(
    world: Option<&str>,
    patterns: &[S],
    rules: PatternRules,
) -> PermissionSet {
    let scope = world.map_or_else(String::new, |w| format!("{w}:"));
    let mut set = PermissionSet::new();
    for raw in patterns {
        let raw = raw.as_ref();
        let (pattern, value) = raw
            .strip_prefix(rules.negation)
            .map_or((raw, true), |rest| (rest, false));
        if rules.expand_alternation {
            for literal in expand_pattern(pattern) {
                set.insert(format!("{scope}{literal}"), value);
            }
        } else {
            set.insert(format!("{scope}{pattern}"), value);
        }
    }
    set
}

/// Build the full permission set of an entity: global statements first, then
/// each world's statements in order.
#[must_use]
pub fn normalize<S, W>(global: &[S], worlds: &[(W, Vec<S>)], rules: PatternRules) -> PermissionSet
where
    S: AsRef<str>,
    W: AsRef<str>,
{
    let mut set = parse_permissions(None, global, rules);
    for (world, patterns) in worlds {
        set.extend(parse_permissions(Some(world.as_ref()), patterns, rules));
    }
    set
}
