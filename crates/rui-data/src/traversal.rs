//! The cursor that walks a [`DataGraph`] during one pass, plus the scope
//! guards that control-flow adapters use to activate child blocks.

use std::cell::{RefCell, RefMut};
use std::rc::Rc;

use rui_id::{CapturedId, Id};

use crate::block::{DataBlock, NamedBlockRef, NamingMap};
use crate::error::TraversalError;
use crate::node::{self, Cached, Keyed, Persistent};

/// Per-block bookkeeping that a [`ScopedDataBlock`] saves and restores
/// around activation of a child block, so nested blocks don't clobber each
/// other's cursor or named-block order tracking.
struct BlockFrame {
    block: Rc<RefCell<DataBlock>>,
    cursor: usize,
    new_named_refs: Vec<NamedBlockRef>,
    expected_order: Vec<CapturedId>,
    expect_index: usize,
}

/// Walks a data graph one block at a time. Call sites ask it for storage
/// (`get_data_node`, `get_cached`, `get_keyed`) in a fixed order; control-flow
/// adapters use `get_child_block` and `activate_named_block` to descend into
/// nested blocks.
pub struct DataTraversal {
    frame: BlockFrame,
    stack: Vec<BlockFrame>,
    active_map: Vec<NamingMap>,
    gc_enabled: bool,
    cache_clearing_depth: u32,
    deferred_clears: Vec<Vec<Rc<RefCell<DataBlock>>>>,
    touched_maps: Vec<NamingMap>,
}

fn order_of(block: &DataBlock) -> Vec<CapturedId> {
    block.named_block_refs.iter().map(|r| r.key.clone()).collect()
}

impl DataTraversal {
    /// Begin a traversal rooted at `root`. `gc_enabled` is fixed for the
    /// whole traversal: disabling it allows a partial pass over a prefix of
    /// the named blocks visited last time, at the cost of skipping the GC
    /// sweep at the end.
    pub(crate) fn new(root: Rc<RefCell<DataBlock>>, gc_enabled: bool) -> Self {
        let expected_order = order_of(&root.borrow());
        root.borrow_mut().cache_clear = false;
        Self {
            frame: BlockFrame {
                block: root,
                cursor: 0,
                new_named_refs: Vec::new(),
                expected_order,
                expect_index: 0,
            },
            stack: Vec::new(),
            active_map: Vec::new(),
            gc_enabled,
            cache_clearing_depth: 0,
            deferred_clears: Vec::new(),
            touched_maps: Vec::new(),
        }
    }

    // -- plain storage -----------------------------------------------------

    /// Fetch (creating on first visit) the persistent slot at the current
    /// call site, default-constructing `T` the first time it's visited.
    pub fn get_data_node<T: Default + 'static>(&mut self) -> (RefMut<'_, T>, bool) {
        let cursor = self.frame.cursor;
        let is_new = {
            let mut block = self.frame.block.borrow_mut();
            if cursor == block.nodes.len() {
                block.nodes.push(node::new_persistent::<T>());
                true
            } else {
                false
            }
        };
        self.frame.cursor += 1;
        let rm = RefMut::map(self.frame.block.borrow_mut(), move |b| {
            let n = &mut b.nodes[cursor];
            let found = n.type_name();
            match n.as_any_mut().downcast_mut::<Persistent<T>>() {
                Some(p) => &mut p.0,
                None => panic!(
                    "{}",
                    TraversalError::TypeMismatch {
                        index: cursor,
                        expected: std::any::type_name::<T>(),
                        found,
                    }
                ),
            }
        });
        (rm, is_new)
    }

    /// Fetch the cached slot at the current call site. Returns `true` for
    /// `is_new` whenever the slot is currently empty (first visit, or its
    /// block was cache-cleared since): the caller is expected to fill it in.
    pub fn get_cached<T: 'static>(&mut self) -> (RefMut<'_, Option<T>>, bool) {
        let cursor = self.frame.cursor;
        {
            let mut block = self.frame.block.borrow_mut();
            if cursor == block.nodes.len() {
                block.nodes.push(node::new_cached::<T>());
            }
        }
        self.frame.cursor += 1;
        let rm = RefMut::map(self.frame.block.borrow_mut(), move |b| {
            let n = &mut b.nodes[cursor];
            let found = n.type_name();
            match n.as_any_mut().downcast_mut::<Cached<T>>() {
                Some(c) => &mut c.0,
                None => panic!(
                    "{}",
                    TraversalError::TypeMismatch {
                        index: cursor,
                        expected: std::any::type_name::<T>(),
                        found,
                    }
                ),
            }
        });
        let is_new = rm.is_none();
        (rm, is_new)
    }

    /// Fetch the keyed slot at the current call site and refresh it against
    /// `key`, invalidating the stored value if `key` changed since the last
    /// visit. Returns whether the key changed.
    pub fn get_keyed<T: 'static>(&mut self, key: &Id<'_>) -> (RefMut<'_, Keyed<T>>, bool) {
        let cursor = self.frame.cursor;
        {
            let mut block = self.frame.block.borrow_mut();
            if cursor == block.nodes.len() {
                block.nodes.push(node::new_keyed::<T>());
            }
        }
        self.frame.cursor += 1;
        let mut rm = RefMut::map(self.frame.block.borrow_mut(), move |b| {
            let n = &mut b.nodes[cursor];
            let found = n.type_name();
            match n.as_any_mut().downcast_mut::<Keyed<T>>() {
                Some(k) => k,
                None => panic!(
                    "{}",
                    TraversalError::TypeMismatch {
                        index: cursor,
                        expected: std::any::type_name::<T>(),
                        found,
                    }
                ),
            }
        });
        let changed = rm.refresh(key);
        (rm, changed)
    }

    /// Fetch (creating on first visit) a child block at the current call
    /// site. Used by control-flow adapters that need a stable handle to a
    /// nested block regardless of whether they end up activating it this
    /// pass (e.g. an if-chain fetches one per branch, unconditionally, so it
    /// can `clear_cache` the branches it doesn't take).
    pub fn get_child_block(&mut self) -> Rc<RefCell<DataBlock>> {
        let cursor = self.frame.cursor;
        {
            let mut block = self.frame.block.borrow_mut();
            if cursor == block.nodes.len() {
                block
                    .nodes
                    .push(Box::new(Persistent(DataBlock::new_shared())));
            }
        }
        self.frame.cursor += 1;
        let block = self.frame.block.borrow();
        let n = &block.nodes[cursor];
        let found = n.type_name();
        match n.as_any().downcast_ref::<Persistent<Rc<RefCell<DataBlock>>>>() {
            Some(p) => p.0.clone(),
            None => panic!(
                "{}",
                TraversalError::TypeMismatch {
                    index: cursor,
                    expected: std::any::type_name::<Rc<RefCell<DataBlock>>>(),
                    found,
                }
            ),
        }
    }

    /// Fetch (creating on first visit) the naming map rooted at the current
    /// call site.
    pub fn get_naming_map(&mut self) -> NamingMap {
        let (mut rm, _) = self.get_data_node::<NamingMap>();
        let map = rm.clone();
        drop(rm);
        map
    }

    /// Clear the cache of a block that's being skipped this pass (e.g. an
    /// untaken if-branch), honoring any ancestor
    /// [`ScopedCacheClearingDisabler`].
    pub fn clear_inactive_block(&mut self, block: &Rc<RefCell<DataBlock>>) {
        if self.cache_clearing_depth > 0 {
            block.borrow_mut().needs_clear = true;
            if let Some(top) = self.deferred_clears.last_mut() {
                top.push(block.clone());
            }
        } else {
            block.borrow_mut().clear_cache();
        }
    }

    // -- named blocks --------------------------------------------------

    /// Activate the named block for `key` within `map`, pushing it onto the
    /// traversal's active-block stack. The returned guard restores the
    /// previous active block on drop.
    pub fn activate_named_block<'t>(
        &'t mut self,
        map: &NamingMap,
        key: &Id<'_>,
        manual_delete: bool,
    ) -> ScopedDataBlock<'t> {
        let captured = key.capture();
        let (slot, _created) = map.find_or_create(&captured, manual_delete);
        {
            let mut s = slot.borrow_mut();
            s.seen_this_pass = true;
        }
        if !self.touched_maps.iter().any(|m| m.same_as(map)) {
            self.touched_maps.push(map.clone());
        }

        let expect = self.frame.expect_index;
        let in_order = self
            .frame
            .expected_order
            .get(expect)
            .map(|expected| *expected == captured)
            .unwrap_or(false);
        if !self.gc_enabled && !in_order {
            panic!("{}", TraversalError::NamedBlockOutOfOrder);
        }
        if in_order {
            self.frame.expect_index += 1;
        }
        self.frame.new_named_refs.push(NamedBlockRef {
            key: captured,
            slot: slot.clone(),
        });

        let block = slot.borrow().block.clone();
        ScopedDataBlock::new(self, block)
    }

    /// Permanently remove a named block from `map`, regardless of GC state.
    pub fn delete_named_block(&mut self, map: &NamingMap, key: &Id<'_>) {
        let captured = key.capture();
        map.remove(&captured);
    }
}

impl NamingMap {
    fn same_as(&self, other: &NamingMap) -> bool {
        std::ptr::eq(self.inner_ptr(), other.inner_ptr())
    }
}

/// Activates a child [`DataBlock`] for the duration of the guard, swapping
/// the traversal's cursor and named-block bookkeeping to that block's and
/// restoring the caller's on drop.
pub struct ScopedDataBlock<'t> {
    traversal: &'t mut DataTraversal,
}

impl<'t> ScopedDataBlock<'t> {
    pub fn new(traversal: &'t mut DataTraversal, block: Rc<RefCell<DataBlock>>) -> Self {
        let expected_order = order_of(&block.borrow());
        block.borrow_mut().cache_clear = false;
        block.borrow_mut().needs_clear = false;
        let new_frame = BlockFrame {
            block,
            cursor: 0,
            new_named_refs: Vec::new(),
            expected_order,
            expect_index: 0,
        };
        let old_frame = std::mem::replace(&mut traversal.frame, new_frame);
        traversal.stack.push(old_frame);
        Self { traversal }
    }

    pub fn traversal_ref(&mut self) -> &mut DataTraversal {
        self.traversal
    }
}

impl Drop for ScopedDataBlock<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            // Leave the graph untouched; the traversal is being abandoned.
            self.traversal.stack.pop();
            return;
        }
        let BlockFrame {
            block,
            cursor,
            new_named_refs,
            ..
        } = &self.traversal.frame;
        let (block, cursor, new_named_refs) = (block.clone(), *cursor, new_named_refs.clone());
        {
            let mut b = block.borrow_mut();
            b.nodes.truncate(cursor);
            if self.traversal.gc_enabled {
                b.named_block_refs = new_named_refs;
            }
        }
        let parent = self
            .traversal
            .stack
            .pop()
            .expect("ScopedDataBlock outlived its parent frame");
        self.traversal.frame = parent;
    }
}

/// Suppresses immediate cache clearing for the duration of the guard;
/// blocks that would have been cleared are instead clamped to
/// `needs_clear` and swept when the guard drops.
pub struct ScopedCacheClearingDisabler<'t> {
    traversal: &'t mut DataTraversal,
}

impl<'t> ScopedCacheClearingDisabler<'t> {
    pub fn new(traversal: &'t mut DataTraversal) -> Self {
        traversal.cache_clearing_depth += 1;
        traversal.deferred_clears.push(Vec::new());
        Self { traversal }
    }
}

impl Drop for ScopedCacheClearingDisabler<'_> {
    fn drop(&mut self) {
        self.traversal.cache_clearing_depth -= 1;
        if let Some(deferred) = self.traversal.deferred_clears.pop() {
            if self.traversal.cache_clearing_depth == 0 {
                for block in deferred {
                    block.borrow_mut().clear_cache();
                }
            } else if let Some(parent) = self.traversal.deferred_clears.last_mut() {
                parent.extend(deferred);
            }
        }
    }
}

/// Owns a [`DataTraversal`] for the lifetime of one pass over a
/// [`crate::graph::DataGraph`]. On a clean (non-panicking) drop, sweeps every
/// naming map touched during the pass, provided GC was enabled.
pub struct ScopedDataTraversal {
    traversal: DataTraversal,
}

impl ScopedDataTraversal {
    pub fn new(graph: &crate::graph::DataGraph) -> Self {
        Self::with_gc(graph, true)
    }

    /// `gc_enabled = false` allows this pass to visit only a prefix of the
    /// named blocks visited last time (e.g. a targeted event-dispatch
    /// traversal), at the cost of skipping GC for the whole pass. Must be
    /// chosen before the traversal begins; it cannot be toggled mid-pass.
    pub fn with_gc(graph: &crate::graph::DataGraph, gc_enabled: bool) -> Self {
        Self {
            traversal: DataTraversal::new(graph.root(), gc_enabled),
        }
    }

    pub fn traversal(&mut self) -> &mut DataTraversal {
        &mut self.traversal
    }
}

impl Drop for ScopedDataTraversal {
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }
        let root = self.traversal.frame.block.clone();
        root.borrow_mut().nodes.truncate(self.traversal.frame.cursor);
        if self.traversal.gc_enabled {
            root.borrow_mut().named_block_refs =
                std::mem::take(&mut self.traversal.frame.new_named_refs);
            for map in &self.traversal.touched_maps {
                map.sweep();
            }
        } else if !self.traversal.touched_maps.is_empty() {
            tracing::trace!(
                target: "rui_data::gc",
                maps = self.traversal.touched_maps.len(),
                "skipping named-block GC: traversal ran with GC disabled"
            );
        }
    }
}
