//! Struct-field and container-element projections.

use rui_id::{combine_ids, make_id, Id};

use crate::capability::Capabilities;
use crate::core::Signal;

/// Projects a signal of `T` down to a field `F` via a get/set accessor
/// pair. `key` distinguishes this projection from others on the same
/// parent when ids are combined (typically the field's name).
pub struct Field<S, G, Set> {
    inner: S,
    key: &'static str,
    get: G,
    set: Set,
}

pub fn field<T, F, S, G, Set>(inner: S, key: &'static str, get: G, set: Set) -> Field<S, G, Set>
where
    S: Signal<T>,
    G: Fn(&T) -> &F,
    Set: Fn(&mut T, F),
{
    Field {
        inner,
        key,
        get,
        set,
    }
}

impl<T, F, S, G, Set> Signal<F> for Field<S, G, Set>
where
    T: Clone,
    S: Signal<T>,
    G: Fn(&T) -> &F,
    Set: Fn(&mut T, F),
{
    fn capabilities(&self) -> Capabilities {
        self.inner.capabilities()
    }
    fn value_id(&self) -> Id<'_> {
        combine_ids(self.inner.value_id(), make_id(self.key))
    }
    fn has_value(&self) -> bool {
        self.inner.has_value()
    }
    fn read(&self) -> &F {
        (self.get)(self.inner.read())
    }
    fn ready_to_write(&self) -> bool {
        self.inner.ready_to_write()
    }
    fn write(&self, value: F) {
        let mut whole = self.inner.read().clone();
        (self.set)(&mut whole, value);
        self.inner.write(whole);
    }
    fn clear(&self) {
        self.inner.clear()
    }
}

/// Projects a signal of a container `T` down to element `F` at `index` via
/// a get/set accessor pair. Writing reconstructs the whole container by
/// cloning it, moving the new element in, and writing the container back —
/// the same "whole-container write-back" rule [`Field`] uses.
pub struct Index<S, G, Set> {
    inner: S,
    index: usize,
    get: G,
    set: Set,
}

pub fn index<T, F, S, G, Set>(inner: S, index: usize, get: G, set: Set) -> Index<S, G, Set>
where
    S: Signal<T>,
    G: Fn(&T, usize) -> &F,
    Set: Fn(&mut T, usize, F),
{
    Index {
        inner,
        index,
        get,
        set,
    }
}

impl<T, F, S, G, Set> Signal<F> for Index<S, G, Set>
where
    T: Clone,
    S: Signal<T>,
    G: Fn(&T, usize) -> &F,
    Set: Fn(&mut T, usize, F),
{
    fn capabilities(&self) -> Capabilities {
        self.inner.capabilities()
    }
    fn value_id(&self) -> Id<'_> {
        combine_ids(self.inner.value_id(), make_id(self.index))
    }
    fn has_value(&self) -> bool {
        self.inner.has_value()
    }
    fn read(&self) -> &F {
        (self.get)(self.inner.read(), self.index)
    }
    fn ready_to_write(&self) -> bool {
        self.inner.ready_to_write()
    }
    fn write(&self, value: F) {
        let mut whole = self.inner.read().clone();
        (self.set)(&mut whole, self.index, value);
        self.inner.write(whole);
    }
    fn clear(&self) {
        self.inner.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::direct;
    use std::cell::RefCell;

    #[derive(Clone, Default)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn field_projection_reads_and_writes_back_through_whole_value() {
        let cell = RefCell::new(Point { x: 1, y: 2 });
        let s = direct(&cell);
        let x = field(s, "x", |p: &Point| &p.x, |p: &mut Point, v| p.x = v);
        assert_eq!(*x.read(), 1);
        x.write(9);
        assert_eq!(cell.borrow().x, 9);
        assert_eq!(cell.borrow().y, 2);
    }

    #[test]
    fn index_projection_reads_vec_element() {
        let cell = RefCell::new(vec![10, 20, 30]);
        let s = direct(&cell);
        let at1 = index(
            s,
            1,
            |v: &Vec<i32>, i| &v[i],
            |v: &mut Vec<i32>, i, x| v[i] = x,
        );
        assert_eq!(*at1.read(), 20);
        at1.write(99);
        assert_eq!(*cell.borrow(), vec![10, 99, 30]);
    }
}
