//! Pure control flow that must not touch the data graph.
//!
//! Unlike the other adapters, these don't take a `&mut DataTraversal` at
//! all: the body simply has no way to reach the graph, which is the
//! Rust-idiomatic analogue of the reference's "context with the data
//! traversal component removed."

use crate::condition::Condition;

/// Runs `body` if `cond` is decided and true. Returns `None` if the
/// condition was false or indeterminate.
pub fn untracked_if<R>(cond: impl Condition, body: impl FnOnce() -> R) -> Option<R> {
    match cond.poll() {
        Some(true) => Some(body()),
        _ => None,
    }
}

/// Runs the body of the first case whose key equals `value`, or `default`
/// if none match.
pub fn untracked_switch<K: PartialEq, R>(
    value: &K,
    cases: &[(K, fn() -> R)],
    default: impl FnOnce() -> R,
) -> R {
    for (key, body) in cases {
        if key == value {
            return body();
        }
    }
    default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untracked_if_runs_only_when_true() {
        assert_eq!(untracked_if(true, || 1), Some(1));
        assert_eq!(untracked_if(false, || 1), None);
    }

    #[test]
    fn untracked_switch_picks_matching_case() {
        let cases: [(i32, fn() -> &'static str); 2] = [(1, || "one"), (2, || "two")];
        assert_eq!(untracked_switch(&2, &cases, || "default"), "two");
        assert_eq!(untracked_switch(&3, &cases, || "default"), "default");
    }
}
