//! Data blocks, named blocks, and naming maps.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use rui_id::CapturedId;

use crate::node::DataNode;

/// A block of execution: during one traversal either all of its nodes run
/// or none do, and if they run, always in the same order.
pub struct DataBlock {
    pub(crate) nodes: Vec<Box<dyn DataNode>>,
    /// Named blocks this block referenced, in the order encountered during
    /// the last completed traversal. Used both to resolve a block quickly
    /// when the graph is stable and to drive named-block GC.
    pub(crate) named_block_refs: Vec<NamedBlockRef>,
    /// Tracks whether this block's cached nodes have already been cleared
    /// since it last went inactive. Left `true` (clear skipped/deferred)
    /// while a [`crate::traversal::ScopedCacheClearingDisabler`] is active.
    pub(crate) cache_clear: bool,
    /// Set instead of clearing immediately while a cache-clearing disabler
    /// is on the stack; consumed when that scope exits.
    pub(crate) needs_clear: bool,
}

impl Default for DataBlock {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            named_block_refs: Vec::new(),
            cache_clear: true,
            needs_clear: false,
        }
    }
}

impl DataBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a fresh block in the shared handle every activation site holds
    /// (child blocks, named blocks, and the graph's root are all behind this
    /// indirection, since the list that owns a block may reallocate out
    /// from under a traversal that's still holding it active).
    pub fn new_shared() -> Rc<RefCell<DataBlock>> {
        Rc::new(RefCell::new(DataBlock::new()))
    }

    /// Clear every cached node in this block and recurse into any named
    /// blocks it currently references.
    pub fn clear_cache(&mut self) {
        if self.cache_clear {
            return;
        }
        for node in &mut self.nodes {
            node.clear_cache();
        }
        for r in &self.named_block_refs {
            r.slot.borrow_mut().block.borrow_mut().clear_cache();
        }
        self.cache_clear = true;
        self.needs_clear = false;
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[derive(Clone)]
pub(crate) struct NamedBlockRef {
    pub(crate) key: CapturedId,
    pub(crate) slot: Rc<RefCell<NamedBlockSlot>>,
}

/// A named block: a [`DataBlock`] addressed by identity rather than
/// call-site position, plus the `manual_delete` flag controlling whether
/// GC may reclaim it when unreferenced.
pub struct NamedBlockSlot {
    pub block: Rc<RefCell<DataBlock>>,
    pub manual_delete: bool,
    /// Set by the GC pass; tracks whether this slot was referenced during
    /// the traversal currently being reconciled.
    pub(crate) seen_this_pass: bool,
}

impl NamedBlockSlot {
    fn new(manual_delete: bool) -> Self {
        Self {
            block: DataBlock::new_shared(),
            manual_delete,
            seen_this_pass: false,
        }
    }
}

#[derive(Default)]
struct NamingMapInner {
    blocks: HashMap<CapturedId, Rc<RefCell<NamedBlockSlot>>>,
}

/// A hash map from identity to owned named block, stored behind `Rc<RefCell>`
/// so it can be cloned out of the [`crate::node::Persistent`] slot that owns
/// it (a call site's `get_data_node::<NamingMap>()`) without holding that
/// slot's borrow open across a nested traversal into one of its blocks.
#[derive(Default, Clone)]
pub struct NamingMap(Rc<RefCell<NamingMapInner>>);

impl NamingMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find or create the named block for `key`, returning whether it was
    /// freshly created.
    pub(crate) fn find_or_create(
        &self,
        key: &CapturedId,
        manual_delete: bool,
    ) -> (Rc<RefCell<NamedBlockSlot>>, bool) {
        let mut inner = self.0.borrow_mut();
        if let Some(existing) = inner.blocks.get(key) {
            return (existing.clone(), false);
        }
        let slot = Rc::new(RefCell::new(NamedBlockSlot::new(manual_delete)));
        inner.blocks.insert(key.clone(), slot.clone());
        (slot, true)
    }

    pub fn remove(&self, key: &CapturedId) -> Option<Rc<RefCell<NamedBlockSlot>>> {
        self.0.borrow_mut().blocks.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().blocks.is_empty()
    }

    /// Destroy every named block not referenced during the traversal just
    /// completed, unless it is flagged `manual_delete`.
    ///
    /// `seen_this_pass` is set on each slot as [`NamedBlockRef`]s are
    /// recorded during a traversal (see
    /// [`crate::traversal::DataTraversal::activate_named_block`]) and reset
    /// here after the sweep.
    pub(crate) fn inner_ptr(&self) -> *const RefCell<NamingMapInner> {
        Rc::as_ptr(&self.0)
    }

    pub(crate) fn sweep(&self) {
        let before = self.0.borrow().blocks.len();
        self.0.borrow_mut().blocks.retain(|_, slot| {
            let mut s = slot.borrow_mut();
            let keep = s.seen_this_pass || s.manual_delete;
            s.seen_this_pass = false;
            keep
        });
        let collected = before - self.0.borrow().blocks.len();
        if collected > 0 {
            tracing::debug!(target: "rui_data::gc", collected, "swept unreferenced named blocks");
        }
    }
}
