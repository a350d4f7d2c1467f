//! The three flavors of storage cell a call site can request.

use std::any::Any;
use std::fmt;

use rui_id::{CapturedId, Id};

/// Object-safe storage cell. Each concrete node kind below implements this
/// so a [`crate::block::DataBlock`] can hold a heterogeneous, insertion
/// ordered list of them.
pub trait DataNode: 'static {
    /// Invoked when the enclosing block is deactivated and cache clearing
    /// is not suppressed by an ancestor scope. Persistent and keyed nodes
    /// leave their payload untouched; cached nodes drop theirs.
    fn clear_cache(&mut self);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn type_name(&self) -> &'static str;
}

pub(crate) struct Persistent<T>(pub T);

impl<T: 'static> DataNode for Persistent<T> {
    fn clear_cache(&mut self) {}
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

pub(crate) struct Cached<T>(pub Option<T>);

impl<T: 'static> DataNode for Cached<T> {
    fn clear_cache(&mut self) {
        self.0 = None;
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// A persistent slot that remembers the captured identity it was last
/// refreshed with, invalidating its payload whenever that key changes.
///
/// Unlike a cached node, a `Keyed<T>` is not cleared just because its block
/// went inactive — only an actual key change invalidates it. This mirrors
/// the spec's third data-node flavor.
pub struct Keyed<T> {
    key: CapturedId,
    value: Option<T>,
}

impl<T> Keyed<T> {
    fn new() -> Self {
        Self {
            key: CapturedId::null(),
            value: None,
        }
    }

    /// Returns `true` if `key` differs from the key this slot was last
    /// refreshed with, invalidating the stored value as a side effect.
    pub fn refresh(&mut self, key: &Id<'_>) -> bool {
        if !self.key.matches(key) {
            self.key = key.capture();
            self.value = None;
            true
        } else {
            false
        }
    }

    pub fn is_valid(&self) -> bool {
        self.value.is_some()
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn set(&mut self, value: T) {
        self.value = Some(value);
    }

    pub fn get_or_insert_with(&mut self, f: impl FnOnce() -> T) -> &mut T {
        self.value.get_or_insert_with(f)
    }

    pub fn invalidate(&mut self) {
        self.value = None;
        self.key = CapturedId::null();
    }
}

impl<T> Default for Keyed<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Keyed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keyed")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish()
    }
}

impl<T: 'static> DataNode for Keyed<T> {
    fn clear_cache(&mut self) {
        // Keyed slots are invalidated by key changes, not by block
        // deactivation; see module docs.
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

pub(crate) fn new_persistent<T: Default + 'static>() -> Box<dyn DataNode> {
    Box::new(Persistent(T::default()))
}

pub(crate) fn new_cached<T: 'static>() -> Box<dyn DataNode> {
    Box::new(Cached::<T>(None))
}

pub(crate) fn new_keyed<T: 'static>() -> Box<dyn DataNode> {
    Box::new(Keyed::<T>::new())
}
