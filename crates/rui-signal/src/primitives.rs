//! Primitive signal constructors: `value`, `direct`, `empty`, and the
//! lambda-constructed family that everything else in this crate is built
//! from.

use std::cell::RefCell;

use rui_id::{make_id, Id, IdValue};

use crate::capability::{Capabilities, ReadCapability, WriteCapability};
use crate::core::Signal;

/// A read-only signal wrapping an owned value whose identity is the value
/// itself: two `value(v)` signals holding equal `v`s have equal ids.
pub struct ValueSignal<T>(T);

pub fn value<T: IdValue>(v: T) -> ValueSignal<T> {
    ValueSignal(v)
}

impl<T: IdValue> Signal<T> for ValueSignal<T> {
    fn capabilities(&self) -> Capabilities {
        Capabilities::new(ReadCapability::Readable, WriteCapability::Unwritable)
    }
    fn value_id(&self) -> Id<'_> {
        make_id(self.0.clone())
    }
    fn has_value(&self) -> bool {
        true
    }
    fn read(&self) -> &T {
        &self.0
    }
}

/// A duplex signal over caller-owned interior-mutable storage. The source
/// system models this as a raw pointer into existing state; holding a bare
/// `&mut T` behind the `&self`-based [`Signal`] methods would require
/// `unsafe` to get shared mutable access, so this wraps a `RefCell<T>` the
/// caller already owns instead — the same "identity = address of the
/// backing storage" contract, reached by interior mutability rather than a
/// raw pointer.
pub struct DirectSignal<'a, T> {
    cell: &'a RefCell<T>,
    // `read` returns `&T`, but the backing storage lives behind a
    // `RefCell` borrow that can't outlive the borrow call itself; this
    // mirrors `LambdaReader`'s cache so the returned reference is tied to
    // `&self` instead.
    cache: RefCell<Option<T>>,
}

pub fn direct<T>(cell: &RefCell<T>) -> DirectSignal<'_, T> {
    DirectSignal {
        cell,
        cache: RefCell::new(None),
    }
}

impl<'a, T: Clone + Default + 'static> Signal<T> for DirectSignal<'a, T> {
    fn capabilities(&self) -> Capabilities {
        Capabilities::new(ReadCapability::Readable, WriteCapability::Clearable)
    }
    fn value_id(&self) -> Id<'_> {
        make_id(self.cell as *const RefCell<T> as usize)
    }
    fn has_value(&self) -> bool {
        true
    }
    fn read(&self) -> &T {
        *self.cache.borrow_mut() = Some(self.cell.borrow().clone());
        let ptr = self.cache.as_ptr();
        // SAFETY: see `LambdaReader::read`.
        unsafe { (*ptr).as_ref().unwrap() }
    }
    fn ready_to_write(&self) -> bool {
        true
    }
    fn write(&self, value: T) {
        *self.cell.borrow_mut() = value;
    }
    fn clear(&self) {
        *self.cell.borrow_mut() = T::default();
    }
}

impl<'a, T> DirectSignal<'a, T> {
    /// By-reference access to the underlying value, since [`Signal::read`]
    /// cannot return a borrow that survives a `RefCell` runtime borrow.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.cell.borrow())
    }
}

/// A signal that never has a value, of any writability tier.
pub struct EmptySignal<T>(std::marker::PhantomData<T>);

pub fn empty<T>() -> EmptySignal<T> {
    EmptySignal(std::marker::PhantomData)
}

impl<T> Signal<T> for EmptySignal<T> {
    fn capabilities(&self) -> Capabilities {
        Capabilities::NONE
    }
    fn value_id(&self) -> Id<'_> {
        Id::null()
    }
}

/// A read-only signal built from user-supplied `has_value`/`read`/`id`
/// closures. The computed value is cached in a cell so `read` can hand back
/// a reference tied to `&self` rather than a fresh owned value each call.
pub struct LambdaReader<T, H, R, I> {
    has_value_fn: H,
    read_fn: R,
    id_fn: I,
    cache: RefCell<Option<T>>,
}

pub fn lambda_reader<T, H, R, I>(has_value_fn: H, read_fn: R, id_fn: I) -> LambdaReader<T, H, R, I>
where
    H: Fn() -> bool,
    R: Fn() -> T,
    I: Fn() -> Id<'static>,
{
    LambdaReader {
        has_value_fn,
        read_fn,
        id_fn,
        cache: RefCell::new(None),
    }
}

impl<T, H, R, I> Signal<T> for LambdaReader<T, H, R, I>
where
    H: Fn() -> bool,
    R: Fn() -> T,
    I: Fn() -> Id<'static>,
{
    fn capabilities(&self) -> Capabilities {
        Capabilities::new(ReadCapability::Readable, WriteCapability::Unwritable)
    }
    fn value_id(&self) -> Id<'_> {
        (self.id_fn)()
    }
    fn has_value(&self) -> bool {
        (self.has_value_fn)()
    }
    fn read(&self) -> &T {
        *self.cache.borrow_mut() = Some((self.read_fn)());
        let ptr = self.cache.as_ptr();
        // SAFETY: `cache` is only ever written through `read`, which is
        // re-entrant-free for a single-threaded traversal, and the
        // returned reference's lifetime is tied to `&self`.
        unsafe { (*ptr).as_ref().unwrap() }
    }
}

/// A duplex signal built from user-supplied closures for every operation.
pub struct LambdaDuplex<T, H, R, W, Rw, I> {
    has_value_fn: H,
    read_fn: R,
    write_fn: W,
    ready_to_write_fn: Rw,
    id_fn: I,
    cache: RefCell<Option<T>>,
}

#[allow(clippy::too_many_arguments)]
pub fn lambda_duplex<T, H, R, W, Rw, I>(
    has_value_fn: H,
    read_fn: R,
    ready_to_write_fn: Rw,
    write_fn: W,
    id_fn: I,
) -> LambdaDuplex<T, H, R, W, Rw, I>
where
    H: Fn() -> bool,
    R: Fn() -> T,
    W: Fn(T),
    Rw: Fn() -> bool,
    I: Fn() -> Id<'static>,
{
    LambdaDuplex {
        has_value_fn,
        read_fn,
        write_fn,
        ready_to_write_fn,
        id_fn,
        cache: RefCell::new(None),
    }
}

impl<T, H, R, W, Rw, I> Signal<T> for LambdaDuplex<T, H, R, W, Rw, I>
where
    H: Fn() -> bool,
    R: Fn() -> T,
    W: Fn(T),
    Rw: Fn() -> bool,
    I: Fn() -> Id<'static>,
{
    fn capabilities(&self) -> Capabilities {
        Capabilities::new(ReadCapability::Readable, WriteCapability::Writable)
    }
    fn value_id(&self) -> Id<'_> {
        (self.id_fn)()
    }
    fn has_value(&self) -> bool {
        (self.has_value_fn)()
    }
    fn read(&self) -> &T {
        *self.cache.borrow_mut() = Some((self.read_fn)());
        let ptr = self.cache.as_ptr();
        // SAFETY: see `LambdaReader::read`.
        unsafe { (*ptr).as_ref().unwrap() }
    }
    fn ready_to_write(&self) -> bool {
        (self.ready_to_write_fn)()
    }
    fn write(&self, value: T) {
        (self.write_fn)(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_signal_is_readable_and_id_tracks_content() {
        let a = value(5i32);
        let b = value(5i32);
        let c = value(6i32);
        assert_eq!(*a.read(), 5);
        assert_eq!(a.value_id(), b.value_id());
        assert_ne!(a.value_id(), c.value_id());
    }

    #[test]
    fn direct_signal_writes_through_to_backing_cell() {
        let cell = RefCell::new(1i32);
        let s = direct(&cell);
        s.write(42);
        assert_eq!(*cell.borrow(), 42);
        assert_eq!(s.with(|v| *v), 42);
    }

    #[test]
    fn empty_signal_never_has_value() {
        let s: EmptySignal<i32> = empty();
        assert!(!s.has_value());
        assert_eq!(s.value_id(), Id::null());
    }

    #[test]
    fn lambda_reader_reflects_current_closure_output() {
        let n = RefCell::new(1i32);
        let s = lambda_reader(|| true, || *n.borrow(), || Id::null());
        assert_eq!(*s.read(), 1);
        *n.borrow_mut() = 2;
        assert_eq!(*s.read(), 2);
    }
}
