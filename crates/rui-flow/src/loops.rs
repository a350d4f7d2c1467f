//! `for`/`while` control-flow adapters.
//!
//! Each loop owns a dedicated child block (so that its variable iteration
//! count doesn't perturb the call-site positions of code that follows the
//! loop in its enclosing block), and each iteration owns a nested child
//! block of its own. Iterations beyond the previous run's count simply
//! extend the list; fewer iterations truncate the tail on scope exit.

use rui_data::{DataTraversal, ScopedDataBlock};
use rui_id::Id;

/// Runs `body` once per item of `items`, each in its own positional child
/// block. If this call produces fewer iterations than the previous pass,
/// the extra trailing iteration blocks (and everything in them) are
/// destroyed when the loop's own block deactivates.
pub fn for_each<T>(
    traversal: &mut DataTraversal,
    items: impl IntoIterator<Item = T>,
    mut body: impl FnMut(&mut DataTraversal, T),
) {
    let block = traversal.get_child_block();
    let mut guard = ScopedDataBlock::new(traversal, block);
    let t = guard.traversal_ref();
    for item in items {
        let iter_block = t.get_child_block();
        let mut iter_guard = ScopedDataBlock::new(t, iter_block);
        body(iter_guard.traversal_ref(), item);
    }
}

/// Like [`for_each`], but each item is addressed by an identity rather than
/// its position, so reordering items between passes (without changing
/// identities) doesn't re-initialize their state. `key_of` must return the
/// same identity for the same logical item across passes.
pub fn for_each_keyed<T>(
    traversal: &mut DataTraversal,
    items: impl IntoIterator<Item = T>,
    mut key_of: impl FnMut(&T) -> Id<'static>,
    mut body: impl FnMut(&mut DataTraversal, T),
) {
    let map = traversal.get_naming_map();
    for item in items {
        let key = key_of(&item);
        let mut guard = traversal.activate_named_block(&map, &key, false);
        body(guard.traversal_ref(), item);
    }
}

/// Runs `body` for as long as `cond` holds, each iteration in its own
/// nested block, with the same truncate-on-shrink behavior as [`for_each`].
pub fn while_loop(
    traversal: &mut DataTraversal,
    mut cond: impl FnMut() -> bool,
    mut body: impl FnMut(&mut DataTraversal),
) {
    let block = traversal.get_child_block();
    let mut guard = ScopedDataBlock::new(traversal, block);
    let t = guard.traversal_ref();
    while cond() {
        let iter_block = t.get_child_block();
        let mut iter_guard = ScopedDataBlock::new(t, iter_block);
        body(iter_guard.traversal_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rui_data::{DataGraph, ScopedDataTraversal};
    use rui_id::make_id;
    use std::cell::Cell;

    /// Recomputes only when the item at this position/identity differs from
    /// what was there last pass — mirrors a `get_keyed` cache in the
    /// controller, not a blind `get_cached`, since the scenario this models
    /// (vector reorder) depends on detecting the item itself changed.
    fn counting_identity(t: &mut DataTraversal, calls: &Cell<u32>, item: &str) {
        let (_slot, changed) = t.get_keyed::<()>(&make_id(item.to_string()));
        if changed {
            calls.set(calls.get() + 1);
        }
    }

    #[test]
    fn positional_reorder_recomputes_shifted_entries() {
        let graph = DataGraph::new();
        let calls = Cell::new(0u32);
        let mut items = vec!["foo", "bar", "baz"];
        for _ in 0..3 {
            let mut scope = ScopedDataTraversal::new(&graph);
            let t = scope.traversal();
            for_each(t, items.clone(), |t, item| counting_identity(t, &calls, item));
        }
        assert_eq!(calls.get(), 3);
        items.reverse();
        for _ in 0..3 {
            let mut scope = ScopedDataTraversal::new(&graph);
            let t = scope.traversal();
            for_each(t, items.clone(), |t, item| counting_identity(t, &calls, item));
        }
        assert_eq!(calls.get(), 5);
    }

    #[test]
    fn keyed_reorder_does_not_recompute() {
        let graph = DataGraph::new();
        let calls = Cell::new(0u32);
        let mut items = vec!["foo", "bar", "baz"];
        for _ in 0..3 {
            let mut scope = ScopedDataTraversal::new(&graph);
            let t = scope.traversal();
            for_each_keyed(
                t,
                items.clone(),
                |item| make_id(item.to_string()),
                |t, item| counting_identity(t, &calls, item),
            );
        }
        assert_eq!(calls.get(), 3);
        items.reverse();
        for _ in 0..3 {
            let mut scope = ScopedDataTraversal::new(&graph);
            let t = scope.traversal();
            for_each_keyed(
                t,
                items.clone(),
                |item| make_id(item.to_string()),
                |t, item| counting_identity(t, &calls, item),
            );
        }
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn fewer_iterations_truncates_tail() {
        let graph = DataGraph::new();
        {
            let mut scope = ScopedDataTraversal::new(&graph);
            let t = scope.traversal();
            for_each(t, 0..5, |t, _| {
                let _ = t.get_data_node::<i32>();
            });
        }
        {
            let mut scope = ScopedDataTraversal::new(&graph);
            let t = scope.traversal();
            let mut seen_new = Vec::new();
            for_each(t, 0..2, |t, _| {
                let (_n, is_new) = t.get_data_node::<i32>();
                seen_new.push(is_new);
            });
            assert_eq!(seen_new, vec![false, false]);
        }
        {
            let mut scope = ScopedDataTraversal::new(&graph);
            let t = scope.traversal();
            let mut seen_new = Vec::new();
            for_each(t, 0..5, |t, _| {
                let (_n, is_new) = t.get_data_node::<i32>();
                seen_new.push(is_new);
            });
            // Iterations 2..5 were truncated when the pass above only ran 2.
            assert_eq!(seen_new, vec![false, false, true, true, true]);
        }
    }
}
