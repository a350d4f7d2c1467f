//! Dispatch on an identity-bearing key, addressing the taken case as a
//! named block.
//!
//! The reference's C-style fallthrough between case labels doesn't have an
//! idiomatic Rust equivalent and isn't reproduced here: exactly one body
//! runs per call, chosen by `key`, matching a Rust `match` rather than a C
//! `switch`. See the grounding ledger for this simplification.

use rui_id::Id;
use rui_data::DataTraversal;

/// Runs `body` inside the named block addressed by `key` under the naming
/// map owned by this call site. Switching `key` between calls moves to a
/// different (or freshly created) named block; switching back finds the
/// previous block's state intact.
pub fn switch<R>(traversal: &mut DataTraversal, key: &Id<'_>, body: impl FnOnce(&mut DataTraversal) -> R) -> R {
    let map = traversal.get_naming_map();
    let mut guard = traversal.activate_named_block(&map, key, false);
    body(guard.traversal_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rui_data::{DataGraph, ScopedDataTraversal};
    use rui_id::make_id;

    #[test]
    fn revisiting_same_key_without_a_pass_elsewhere_keeps_state() {
        let graph = DataGraph::new();
        {
            let mut scope = ScopedDataTraversal::new(&graph);
            let t = scope.traversal();
            switch(t, &make_id("a"), |t| {
                let (mut n, is_new) = t.get_data_node::<i32>();
                assert!(is_new);
                *n = 1;
            });
        }
        {
            let mut scope = ScopedDataTraversal::new(&graph);
            let t = scope.traversal();
            switch(t, &make_id("a"), |t| {
                let (n, is_new) = t.get_data_node::<i32>();
                assert!(!is_new);
                assert_eq!(*n, 1);
            });
        }
    }

    #[test]
    fn switching_away_and_back_loses_state_without_manual_delete() {
        let graph = DataGraph::new();
        {
            let mut scope = ScopedDataTraversal::new(&graph);
            let t = scope.traversal();
            switch(t, &make_id("a"), |t| {
                let (mut n, is_new) = t.get_data_node::<i32>();
                assert!(is_new);
                *n = 1;
            });
        }
        {
            // A pass that takes a different case GCs the now-unreferenced "a".
            let mut scope = ScopedDataTraversal::new(&graph);
            let t = scope.traversal();
            switch(t, &make_id("b"), |t| {
                let (mut n, is_new) = t.get_data_node::<i32>();
                assert!(is_new);
                *n = 2;
            });
        }
        {
            let mut scope = ScopedDataTraversal::new(&graph);
            let t = scope.traversal();
            switch(t, &make_id("a"), |t| {
                let (_n, is_new) = t.get_data_node::<i32>();
                assert!(is_new, "\"a\" should have been collected while \"b\" was active");
            });
        }
    }
}
