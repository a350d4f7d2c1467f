//! Per-call-site persistent storage: the data graph each traversal walks.
//!
//! A call site in application code is identified purely by its position in
//! the sequence of calls made against an active [`DataBlock`] — not by a
//! source-location token — so the same code path must run its storage
//! requests in the same order every time it runs, or via the named-block
//! indirection when order isn't stable (vector iteration, dynamic keys).

mod block;
mod error;
mod graph;
mod node;
mod traversal;

pub use block::{DataBlock, NamingMap};
pub use error::TraversalError;
pub use graph::DataGraph;
pub use node::{DataNode, Keyed};
pub use traversal::{DataTraversal, ScopedCacheClearingDisabler, ScopedDataBlock, ScopedDataTraversal};

#[cfg(test)]
mod tests {
    use super::*;
    use rui_id::make_id;

    fn pass(graph: &DataGraph, f: impl FnOnce(&mut DataTraversal)) {
        let mut scope = ScopedDataTraversal::new(graph);
        f(scope.traversal());
    }

    #[test]
    fn persistent_node_survives_across_passes() {
        let graph = DataGraph::new();
        pass(&graph, |t| {
            let (mut n, is_new) = t.get_data_node::<i32>();
            assert!(is_new);
            *n = 7;
        });
        pass(&graph, |t| {
            let (n, is_new) = t.get_data_node::<i32>();
            assert!(!is_new);
            assert_eq!(*n, 7);
        });
    }

    #[test]
    fn cached_node_survives_while_its_branch_stays_active() {
        let graph = DataGraph::new();
        let branch_a;
        {
            let mut scope = ScopedDataTraversal::new(&graph);
            let t = scope.traversal();
            branch_a = t.get_child_block();
            let _branch_b = t.get_child_block();
            let mut guard = ScopedDataBlock::new(t, branch_a.clone());
            let (mut c, is_new) = guard.traversal_ref().get_cached::<i32>();
            assert!(is_new);
            *c = Some(42);
        }
        {
            let mut scope = ScopedDataTraversal::new(&graph);
            let t = scope.traversal();
            let _ = t.get_child_block();
            let _ = t.get_child_block();
            let mut guard = ScopedDataBlock::new(t, branch_a.clone());
            let (c, is_new) = guard.traversal_ref().get_cached::<i32>();
            assert!(!is_new);
            assert_eq!(*c, Some(42));
        }
    }

    #[test]
    fn clearing_inactive_branch_drops_its_cache() {
        let graph = DataGraph::new();
        let branch_b;
        {
            let mut scope = ScopedDataTraversal::new(&graph);
            let t = scope.traversal();
            let branch_a = t.get_child_block();
            branch_b = t.get_child_block();
            {
                let mut guard = ScopedDataBlock::new(t, branch_b.clone());
                let (mut c, _) = guard.traversal_ref().get_cached::<i32>();
                *c = Some(1);
            }
            let _ = branch_a;
        }
        {
            let mut scope = ScopedDataTraversal::new(&graph);
            let t = scope.traversal();
            let _branch_a = t.get_child_block();
            let _branch_b = t.get_child_block();
            t.clear_inactive_block(&branch_b);
        }
        {
            let mut scope = ScopedDataTraversal::new(&graph);
            let t = scope.traversal();
            let _branch_a = t.get_child_block();
            let _branch_b = t.get_child_block();
            let mut guard = ScopedDataBlock::new(t, branch_b.clone());
            let (_c, is_new) = guard.traversal_ref().get_cached::<i32>();
            assert!(is_new, "cache should have been cleared while branch was inactive");
        }
    }

    #[test]
    fn keyed_node_invalidates_only_on_key_change() {
        let graph = DataGraph::new();
        pass(&graph, |t| {
            let (mut k, changed) = t.get_keyed::<String>(&make_id(1u32));
            assert!(changed);
            k.set("one".to_string());
        });
        pass(&graph, |t| {
            let (k, changed) = t.get_keyed::<String>(&make_id(1u32));
            assert!(!changed);
            assert_eq!(k.get().map(String::as_str), Some("one"));
        });
        pass(&graph, |t| {
            let (k, changed) = t.get_keyed::<String>(&make_id(2u32));
            assert!(changed);
            assert_eq!(k.get(), None);
        });
    }

    #[test]
    fn named_block_not_revisited_is_collected() {
        let graph = DataGraph::new();
        let mut survived_first_pass = false;
        {
            let mut scope = ScopedDataTraversal::new(&graph);
            let t = scope.traversal();
            let map = t.get_naming_map();
            {
                let mut guard = t.activate_named_block(&map, &make_id("alpha"), false);
                let traversal = guard.traversal_ref();
                let (mut n, is_new) = traversal.get_data_node::<i32>();
                survived_first_pass = is_new;
                *n = 99;
            }
        }
        assert!(survived_first_pass);
        {
            // Second pass never visits "alpha" again.
            let mut scope = ScopedDataTraversal::new(&graph);
            let t = scope.traversal();
            let _map = t.get_naming_map();
        }
        {
            let mut scope = ScopedDataTraversal::new(&graph);
            let t = scope.traversal();
            let map = t.get_naming_map();
            let mut guard = t.activate_named_block(&map, &make_id("alpha"), false);
            let traversal = guard.traversal_ref();
            let (_n, is_new) = traversal.get_data_node::<i32>();
            assert!(is_new, "named block should have been GC'd and rebuilt fresh");
        }
    }

    #[test]
    fn manual_delete_named_block_survives_unvisited_pass() {
        let graph = DataGraph::new();
        {
            let mut scope = ScopedDataTraversal::new(&graph);
            let t = scope.traversal();
            let map = t.get_naming_map();
            let mut guard = t.activate_named_block(&map, &make_id("kept"), true);
            let traversal = guard.traversal_ref();
            let (mut n, _) = traversal.get_data_node::<i32>();
            *n = 5;
        }
        {
            let mut scope = ScopedDataTraversal::new(&graph);
            let t = scope.traversal();
            let _map = t.get_naming_map();
        }
        {
            let mut scope = ScopedDataTraversal::new(&graph);
            let t = scope.traversal();
            let map = t.get_naming_map();
            let mut guard = t.activate_named_block(&map, &make_id("kept"), true);
            let traversal = guard.traversal_ref();
            let (n, is_new) = traversal.get_data_node::<i32>();
            assert!(!is_new);
            assert_eq!(*n, 5);
        }
    }
}
