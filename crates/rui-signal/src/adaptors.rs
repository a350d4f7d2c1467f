//! Capability-preserving and capability-refining signal adaptors.

use std::cell::RefCell;
use std::marker::PhantomData;

use rui_id::{combine_ids, make_id, make_id_by_reference, CapturedId, Id, IdValue};

use crate::capability::{Capabilities, ReadCapability, WriteCapability};
use crate::core::Signal;

/// Converts a signal's value type in both directions, leaving its id and
/// capability tier untouched.
pub struct Cast<S, T, U> {
    inner: S,
    cache: RefCell<Option<U>>,
    _t: PhantomData<T>,
}

pub fn cast<S, T, U>(inner: S) -> Cast<S, T, U>
where
    S: Signal<T>,
    T: Clone + From<U>,
    U: From<T>,
{
    Cast {
        inner,
        cache: RefCell::new(None),
        _t: PhantomData,
    }
}

impl<S, T, U> Signal<U> for Cast<S, T, U>
where
    S: Signal<T>,
    T: Clone + From<U>,
    U: From<T>,
{
    fn capabilities(&self) -> Capabilities {
        self.inner.capabilities()
    }
    fn value_id(&self) -> Id<'_> {
        self.inner.value_id()
    }
    fn has_value(&self) -> bool {
        self.inner.has_value()
    }
    fn read(&self) -> &U {
        *self.cache.borrow_mut() = Some(U::from(self.inner.read().clone()));
        let ptr = self.cache.as_ptr();
        // SAFETY: `cache` is written immediately above on the same call
        // and not reachable from anywhere else.
        unsafe { (*ptr).as_ref().unwrap() }
    }
    fn ready_to_write(&self) -> bool {
        self.inner.ready_to_write()
    }
    fn write(&self, value: U) {
        self.inner.write(T::from(value))
    }
    fn clear(&self) {
        self.inner.clear()
    }
}

/// `primary` if it has a value, else `fallback`. Writes always target
/// `primary`.
pub struct AddDefault<P, F> {
    primary: P,
    fallback: F,
}

pub fn add_default<T, P: Signal<T>, F: Signal<T>>(primary: P, fallback: F) -> AddDefault<P, F> {
    AddDefault { primary, fallback }
}

impl<T, P: Signal<T>, F: Signal<T>> Signal<T> for AddDefault<P, F> {
    fn capabilities(&self) -> Capabilities {
        let p = self.primary.capabilities();
        let f = self.fallback.capabilities();
        Capabilities::new(p.reading.min(f.reading), p.writing)
    }
    fn value_id(&self) -> Id<'_> {
        combine_ids(
            make_id(self.primary.has_value()),
            if self.primary.has_value() {
                self.primary.value_id()
            } else {
                self.fallback.value_id()
            },
        )
    }
    fn has_value(&self) -> bool {
        self.primary.has_value() || self.fallback.has_value()
    }
    fn read(&self) -> &T {
        if self.primary.has_value() {
            self.primary.read()
        } else {
            self.fallback.read()
        }
    }
    fn ready_to_write(&self) -> bool {
        self.primary.ready_to_write()
    }
    fn write(&self, value: T) {
        self.primary.write(value)
    }
    fn clear(&self) {
        self.primary.clear()
    }
}

/// Suppresses both read and write when `flag` is false.
pub struct Mask<S, F> {
    inner: S,
    flag: F,
}

pub fn mask<T, S: Signal<T>, F: Signal<bool>>(inner: S, flag: F) -> Mask<S, F> {
    Mask { inner, flag }
}

fn flag_value<F: Signal<bool>>(flag: &F) -> bool {
    flag.has_value() && *flag.read()
}

impl<T, S: Signal<T>, F: Signal<bool>> Signal<T> for Mask<S, F> {
    fn capabilities(&self) -> Capabilities {
        self.inner.capabilities()
    }
    fn value_id(&self) -> Id<'_> {
        if flag_value(&self.flag) {
            self.inner.value_id()
        } else {
            Id::null()
        }
    }
    fn has_value(&self) -> bool {
        flag_value(&self.flag) && self.inner.has_value()
    }
    fn read(&self) -> &T {
        self.inner.read()
    }
    fn ready_to_write(&self) -> bool {
        flag_value(&self.flag) && self.inner.ready_to_write()
    }
    fn write(&self, value: T) {
        self.inner.write(value)
    }
    fn clear(&self) {
        self.inner.clear()
    }
}

/// Suppresses writes (not reads) when `flag` is false.
pub struct MaskWrites<S, F> {
    inner: S,
    flag: F,
}

pub fn mask_writes<T, S: Signal<T>, F: Signal<bool>>(inner: S, flag: F) -> MaskWrites<S, F> {
    MaskWrites { inner, flag }
}

impl<T, S: Signal<T>, F: Signal<bool>> Signal<T> for MaskWrites<S, F> {
    fn capabilities(&self) -> Capabilities {
        self.inner.capabilities()
    }
    fn value_id(&self) -> Id<'_> {
        self.inner.value_id()
    }
    fn has_value(&self) -> bool {
        self.inner.has_value()
    }
    fn read(&self) -> &T {
        self.inner.read()
    }
    fn ready_to_write(&self) -> bool {
        flag_value(&self.flag) && self.inner.ready_to_write()
    }
    fn write(&self, value: T) {
        self.inner.write(value)
    }
    fn clear(&self) {
        self.inner.clear()
    }
}

/// Suppresses reads (not writes) when `flag` is false.
pub struct MaskReads<S, F> {
    inner: S,
    flag: F,
}

pub fn mask_reads<T, S: Signal<T>, F: Signal<bool>>(inner: S, flag: F) -> MaskReads<S, F> {
    MaskReads { inner, flag }
}

impl<T, S: Signal<T>, F: Signal<bool>> Signal<T> for MaskReads<S, F> {
    fn capabilities(&self) -> Capabilities {
        self.inner.capabilities()
    }
    fn value_id(&self) -> Id<'_> {
        if flag_value(&self.flag) {
            self.inner.value_id()
        } else {
            Id::null()
        }
    }
    fn has_value(&self) -> bool {
        flag_value(&self.flag) && self.inner.has_value()
    }
    fn read(&self) -> &T {
        self.inner.read()
    }
    fn ready_to_write(&self) -> bool {
        self.inner.ready_to_write()
    }
    fn write(&self, value: T) {
        self.inner.write(value)
    }
    fn clear(&self) {
        self.inner.clear()
    }
}

/// Replaces the inner signal's id with one derived directly from the
/// current value, once it has one.
pub struct SimplifyId<S> {
    inner: S,
}

pub fn simplify_id<T: IdValue, S: Signal<T>>(inner: S) -> SimplifyId<S> {
    SimplifyId { inner }
}

impl<T: IdValue, S: Signal<T>> Signal<T> for SimplifyId<S> {
    fn capabilities(&self) -> Capabilities {
        self.inner.capabilities()
    }
    fn value_id(&self) -> Id<'_> {
        if self.inner.has_value() {
            make_id_by_reference(self.inner.read())
        } else {
            Id::null()
        }
    }
    fn has_value(&self) -> bool {
        self.inner.has_value()
    }
    fn read(&self) -> &T {
        self.inner.read()
    }
    fn ready_to_write(&self) -> bool {
        self.inner.ready_to_write()
    }
    fn write(&self, value: T) {
        self.inner.write(value)
    }
    fn clear(&self) {
        self.inner.clear()
    }
}

/// Like [`simplify_id`], but the emitted id only changes when the value
/// actually differs from the last one observed (requires `T: PartialEq`).
pub struct MinimizeIdChanges<T, S> {
    inner: S,
    last: RefCell<Option<(T, CapturedId)>>,
}

pub fn minimize_id_changes<T: Clone + PartialEq + 'static, S: Signal<T>>(
    inner: S,
) -> MinimizeIdChanges<T, S> {
    MinimizeIdChanges {
        inner,
        last: RefCell::new(None),
    }
}

impl<T: Clone + PartialEq + 'static, S: Signal<T>> Signal<T> for MinimizeIdChanges<T, S> {
    fn capabilities(&self) -> Capabilities {
        self.inner.capabilities()
    }
    fn value_id(&self) -> Id<'_> {
        if !self.inner.has_value() {
            return Id::null();
        }
        let current = self.inner.read().clone();
        let mut last = self.last.borrow_mut();
        let changed = match &*last {
            Some((prev, _)) => *prev != current,
            None => true,
        };
        if changed {
            let fresh = self.inner.value_id().capture();
            *last = Some((current, fresh));
        }
        drop(last);
        let ptr = self.last.as_ptr();
        // SAFETY: tying the returned id's lifetime to `&self` rather than
        // to the `RefMut` above, which has already been dropped; nothing
        // else can hold a conflicting borrow within a single-threaded
        // traversal.
        unsafe { (*ptr).as_ref().unwrap().1.as_id() }
    }
    fn has_value(&self) -> bool {
        self.inner.has_value()
    }
    fn read(&self) -> &T {
        self.inner.read()
    }
    fn ready_to_write(&self) -> bool {
        self.inner.ready_to_write()
    }
    fn write(&self, value: T) {
        self.inner.write(value)
    }
    fn clear(&self) {
        self.inner.clear()
    }
}

/// A read-only `bool` signal reporting whether `inner` currently has a
/// value.
pub struct HasValue<S>(S);

pub fn has_value<T, S: Signal<T>>(inner: S) -> HasValue<S> {
    HasValue(inner)
}

impl<T, S: Signal<T>> Signal<bool> for HasValue<S> {
    fn capabilities(&self) -> Capabilities {
        Capabilities::new(ReadCapability::Readable, WriteCapability::Unwritable)
    }
    fn value_id(&self) -> Id<'_> {
        make_id(self.0.has_value())
    }
    fn has_value(&self) -> bool {
        true
    }
    fn read(&self) -> &bool {
        if self.0.has_value() {
            &true
        } else {
            &false
        }
    }
}

/// A read-only `bool` signal reporting whether `inner` is currently ready
/// to accept a write.
pub struct ReadyToWrite<S>(S);

pub fn ready_to_write<T, S: Signal<T>>(inner: S) -> ReadyToWrite<S> {
    ReadyToWrite(inner)
}

impl<T, S: Signal<T>> Signal<bool> for ReadyToWrite<S> {
    fn capabilities(&self) -> Capabilities {
        Capabilities::new(ReadCapability::Readable, WriteCapability::Unwritable)
    }
    fn value_id(&self) -> Id<'_> {
        make_id(self.0.ready_to_write())
    }
    fn has_value(&self) -> bool {
        true
    }
    fn read(&self) -> &bool {
        if self.0.ready_to_write() {
            &true
        } else {
            &false
        }
    }
}

/// Unwraps a `Signal<Option<T>>` into a `Signal<T>` that has a value only
/// when the inner signal's current `Option` is `Some`. `clear()` writes
/// `None` back through to the inner signal.
pub struct Unwrap<T, S> {
    inner: S,
    cache: RefCell<Option<T>>,
}

pub fn unwrap<T: Clone + 'static, S: Signal<Option<T>>>(inner: S) -> Unwrap<T, S> {
    Unwrap {
        inner,
        cache: RefCell::new(None),
    }
}

impl<T: Clone + 'static, S: Signal<Option<T>>> Signal<T> for Unwrap<T, S> {
    fn capabilities(&self) -> Capabilities {
        let writing = if self.inner.capabilities().writing > WriteCapability::Unwritable {
            WriteCapability::Clearable
        } else {
            WriteCapability::Unwritable
        };
        Capabilities::new(self.inner.capabilities().reading.min(ReadCapability::Readable), writing)
    }
    fn value_id(&self) -> Id<'_> {
        if matches!(self.inner.has_value(), true) && self.inner.read().is_some() {
            self.inner.value_id()
        } else {
            Id::null()
        }
    }
    fn has_value(&self) -> bool {
        self.inner.has_value() && self.inner.read().is_some()
    }
    fn read(&self) -> &T {
        let value = self
            .inner
            .read()
            .as_ref()
            .expect("read() only called when has_value() is true")
            .clone();
        *self.cache.borrow_mut() = Some(value);
        let ptr = self.cache.as_ptr();
        // SAFETY: see `LambdaReader::read`.
        unsafe { (*ptr).as_ref().unwrap() }
    }
    fn ready_to_write(&self) -> bool {
        self.inner.ready_to_write()
    }
    fn write(&self, value: T) {
        self.inner.write(Some(value))
    }
    fn clear(&self) {
        self.inner.write(None)
    }
}

/// Upgrades a movable signal to move-activated. A no-op on a signal that
/// was not already movable.
pub struct Move<S>(S);

pub fn move_signal<T, S: Signal<T>>(inner: S) -> Move<S> {
    Move(inner)
}

impl<T, S: Signal<T>> Signal<T> for Move<S> {
    fn capabilities(&self) -> Capabilities {
        let inner = self.0.capabilities();
        let reading = if inner.reading >= ReadCapability::Movable {
            ReadCapability::MoveActivated
        } else {
            inner.reading
        };
        Capabilities::new(reading, inner.writing)
    }
    fn value_id(&self) -> Id<'_> {
        self.0.value_id()
    }
    fn has_value(&self) -> bool {
        self.0.has_value()
    }
    fn read(&self) -> &T {
        self.0.read()
    }
    fn move_out(&self) -> T {
        self.0.move_out()
    }
    fn ready_to_write(&self) -> bool {
        self.0.ready_to_write()
    }
    fn write(&self, value: T) {
        self.0.write(value)
    }
    fn clear(&self) {
        self.0.clear()
    }
}

/// Formally adds the readable tier to a signal that never actually
/// produces a value.
pub struct FakeReadability<S>(S);

pub fn fake_readability<T, S: Signal<T>>(inner: S) -> FakeReadability<S> {
    FakeReadability(inner)
}

impl<T, S: Signal<T>> Signal<T> for FakeReadability<S> {
    fn capabilities(&self) -> Capabilities {
        let inner = self.0.capabilities();
        Capabilities::new(inner.reading.max(ReadCapability::Readable), inner.writing)
    }
    fn value_id(&self) -> Id<'_> {
        Id::null()
    }
    fn has_value(&self) -> bool {
        false
    }
    fn ready_to_write(&self) -> bool {
        self.0.ready_to_write()
    }
    fn write(&self, value: T) {
        self.0.write(value)
    }
    fn clear(&self) {
        self.0.clear()
    }
}

/// Formally adds the writable tier to a signal that never actually accepts
/// a write (`ready_to_write` is always false).
pub struct FakeWritability<S>(S);

pub fn fake_writability<T, S: Signal<T>>(inner: S) -> FakeWritability<S> {
    FakeWritability(inner)
}

impl<T, S: Signal<T>> Signal<T> for FakeWritability<S> {
    fn capabilities(&self) -> Capabilities {
        let inner = self.0.capabilities();
        Capabilities::new(inner.reading, inner.writing.max(WriteCapability::Writable))
    }
    fn value_id(&self) -> Id<'_> {
        self.0.value_id()
    }
    fn has_value(&self) -> bool {
        self.0.has_value()
    }
    fn read(&self) -> &T {
        self.0.read()
    }
    fn ready_to_write(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{empty, value};

    #[test]
    fn add_default_falls_back_when_primary_empty() {
        let s = add_default(empty::<i32>(), value(7));
        assert!(s.has_value());
        assert_eq!(*s.read(), 7);
    }

    #[test]
    fn mask_suppresses_value_when_flag_false() {
        let s = mask(value(3), value(false));
        assert!(!s.has_value());
    }

    #[test]
    fn minimize_id_changes_keeps_id_stable_across_equal_values() {
        let n = RefCell::new(1i32);
        let inner = crate::primitives::lambda_reader(|| true, || *n.borrow(), || make_id(*n.borrow()));
        let s = minimize_id_changes(inner);
        let id1 = s.value_id().capture();
        let id2 = s.value_id().capture();
        assert!(id1.matches(&id2.as_id()));
        *n.borrow_mut() = 2;
        let id3 = s.value_id().capture();
        assert!(!id1.matches(&id3.as_id()));
    }

    #[test]
    fn unwrap_has_value_only_when_inner_is_some() {
        let s = unwrap(value(Some(5i32)));
        assert!(s.has_value());
        assert_eq!(*s.read(), 5);
        let empty_inner: Option<i32> = None;
        let s2 = unwrap(value(empty_inner));
        assert!(!s2.has_value());
    }

    #[test]
    fn unwrap_is_unwritable_when_its_inner_signal_is() {
        let s = unwrap(value(Some(5i32)));
        assert_eq!(s.capabilities().writing, WriteCapability::Unwritable);
    }
}
