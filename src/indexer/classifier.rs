//! Decides whether a declaration is file-local ("static" in tag terms).
//!
//! Classification walks a fixed table of rules and stops at the first one
//! that matches any modifier, so the order in which modifiers were collected
//! never changes the outcome. `private` outranks the `val`/`var` field markers.

use crate::indexer::syntax::Modifier;

/// A rule yields `Some(file_local)` for a modifier it recognises.
type Rule = fn(Option<&str>, &Modifier) -> Option<bool>;

const RULES: &[Rule] = &[
    bare_private,
    object_private,
    qualified_private,
    field_parameter,
];

fn bare_private(_scope: Option<&str>, modifier: &Modifier) -> Option<bool> {
    matches!(modifier, Modifier::Private(None)).then_some(true)
}

fn object_private(_scope: Option<&str>, modifier: &Modifier) -> Option<bool> {
    match modifier {
        Modifier::Private(Some(q)) if q == "this" => Some(true),
        _ => None,
    }
}

/// `private[X]` only restates plain `private` when X is the enclosing scope.
/// Broader qualifiers leave the entity reachable from other files.
fn qualified_private(scope: Option<&str>, modifier: &Modifier) -> Option<bool> {
    match modifier {
        Modifier::Private(Some(q)) => Some(scope == Some(q.as_str())),
        _ => None,
    }
}

fn field_parameter(_scope: Option<&str>, modifier: &Modifier) -> Option<bool> {
    matches!(modifier, Modifier::ValParam | Modifier::VarParam).then_some(false)
}

/// Returns true when an entity with `modifiers`, declared under `scope`,
/// should be marked file-local.
pub fn classify(scope: Option<&str>, modifiers: &[Modifier]) -> bool {
    for rule in RULES {
        // A qualified-private rule can produce both outcomes; any modifier
        // deciding "file-local" wins over one deciding "exported".
        let mut decision = None;
        for modifier in modifiers {
            match rule(scope, modifier) {
                Some(true) => return true,
                Some(false) => decision = Some(false),
                None => {}
            }
        }
        if let Some(outcome) = decision {
            return outcome;
        }
    }
    false
}

/// Constructor parameters without any modifier are plain arguments, not fields.
pub fn classify_parameter(modifiers: &[Modifier]) -> bool {
    modifiers.is_empty() || classify(None, modifiers)
}
