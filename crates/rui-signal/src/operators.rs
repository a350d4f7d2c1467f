//! Lazy pointwise operators over signals. Every operator here is built on
//! top of [`zip_with`]: two operand signals plus a function that combines
//! their values once both are present. The result's id is the combination
//! of the operand ids, so a change in either operand is observable
//! downstream.
//!
//! Compound assignment (`a op= b` in the source system) has no operator
//! overload here; it is simply `a.write(op(a.read(), &b))` issued as an
//! ordinary write.

use std::cell::RefCell;

use rui_id::{combine_ids, Id};

use crate::capability::{Capabilities, ReadCapability, WriteCapability};
use crate::core::Signal;

/// Combine two read-only signals with `f`, applied only once both operands
/// have a value.
pub struct Zip<A, B, F, R> {
    a: A,
    b: B,
    f: F,
    cache: RefCell<Option<R>>,
}

pub fn zip_with<T, U, R, A, B, F>(a: A, b: B, f: F) -> Zip<A, B, F, R>
where
    A: Signal<T>,
    B: Signal<U>,
    F: Fn(&T, &U) -> R,
{
    Zip {
        a,
        b,
        f,
        cache: RefCell::new(None),
    }
}

impl<T, U, R, A, B, F> Signal<R> for Zip<A, B, F, R>
where
    A: Signal<T>,
    B: Signal<U>,
    F: Fn(&T, &U) -> R,
{
    fn capabilities(&self) -> Capabilities {
        Capabilities::new(ReadCapability::Readable, WriteCapability::Unwritable)
    }
    fn value_id(&self) -> Id<'_> {
        combine_ids(self.a.value_id(), self.b.value_id())
    }
    fn has_value(&self) -> bool {
        self.a.has_value() && self.b.has_value()
    }
    fn read(&self) -> &R {
        *self.cache.borrow_mut() = Some((self.f)(self.a.read(), self.b.read()));
        let ptr = self.cache.as_ptr();
        // SAFETY: see `LambdaReader::read` in `primitives.rs`.
        unsafe { (*ptr).as_ref().unwrap() }
    }
}

macro_rules! binary_op {
    ($name:ident, $trait:path, $method:ident) => {
        pub fn $name<T, U, R, A, B>(a: A, b: B) -> Zip<A, B, impl Fn(&T, &U) -> R, R>
        where
            A: Signal<T>,
            B: Signal<U>,
            T: std::ops::$trait<U, Output = R> + Clone,
            U: Clone,
        {
            zip_with(a, b, |x: &T, y: &U| x.clone().$method(y.clone()))
        }
    };
}

binary_op!(add, Add, add);
binary_op!(sub, Sub, sub);
binary_op!(mul, Mul, mul);
binary_op!(div, Div, div);
binary_op!(rem, Rem, rem);
binary_op!(bitand, BitAnd, bitand);
binary_op!(bitor, BitOr, bitor);
binary_op!(bitxor, BitXor, bitxor);
binary_op!(shl, Shl, shl);
binary_op!(shr, Shr, shr);

macro_rules! compare_op {
    ($name:ident, $op:tt) => {
        pub fn $name<T, A, B>(a: A, b: B) -> Zip<A, B, impl Fn(&T, &T) -> bool, bool>
        where
            A: Signal<T>,
            B: Signal<T>,
            T: PartialOrd,
        {
            zip_with(a, b, |x: &T, y: &T| x $op y)
        }
    };
}

compare_op!(eq, ==);
compare_op!(ne, !=);
compare_op!(lt, <);
compare_op!(le, <=);
compare_op!(gt, >);
compare_op!(ge, >=);

/// Logical AND with short-circuit reporting: if `a` has a value and is
/// `false`, the result has a value (`false`) even if `b` does not.
pub struct And<A, B> {
    a: A,
    b: B,
}

pub fn and<A: Signal<bool>, B: Signal<bool>>(a: A, b: B) -> And<A, B> {
    And { a, b }
}

impl<A: Signal<bool>, B: Signal<bool>> Signal<bool> for And<A, B> {
    fn capabilities(&self) -> Capabilities {
        Capabilities::new(ReadCapability::Readable, WriteCapability::Unwritable)
    }
    fn value_id(&self) -> Id<'_> {
        combine_ids(self.a.value_id(), self.b.value_id())
    }
    fn has_value(&self) -> bool {
        (self.a.has_value() && !*self.a.read())
            || (self.b.has_value() && !*self.b.read())
            || (self.a.has_value() && self.b.has_value())
    }
    fn read(&self) -> &bool {
        if self.a.has_value() && !*self.a.read() {
            &false
        } else if self.b.has_value() && !*self.b.read() {
            &false
        } else {
            &true
        }
    }
}

/// Logical OR with short-circuit reporting: if `a` has a value and is
/// `true`, the result has a value (`true`) even if `b` does not.
pub struct Or<A, B> {
    a: A,
    b: B,
}

pub fn or<A: Signal<bool>, B: Signal<bool>>(a: A, b: B) -> Or<A, B> {
    Or { a, b }
}

impl<A: Signal<bool>, B: Signal<bool>> Signal<bool> for Or<A, B> {
    fn capabilities(&self) -> Capabilities {
        Capabilities::new(ReadCapability::Readable, WriteCapability::Unwritable)
    }
    fn value_id(&self) -> Id<'_> {
        combine_ids(self.a.value_id(), self.b.value_id())
    }
    fn has_value(&self) -> bool {
        (self.a.has_value() && *self.a.read())
            || (self.b.has_value() && *self.b.read())
            || (self.a.has_value() && self.b.has_value())
    }
    fn read(&self) -> &bool {
        if self.a.has_value() && *self.a.read() {
            &true
        } else if self.b.has_value() && *self.b.read() {
            &true
        } else {
            &false
        }
    }
}

/// Ternary selector. The id encodes which branch is currently selected, so
/// switching branches is itself an observable id change even when the two
/// branches' own ids happen to collide.
pub struct Conditional<C, T, F> {
    cond: C,
    if_true: T,
    if_false: F,
}

pub fn conditional<T, C: Signal<bool>, A: Signal<T>, B: Signal<T>>(
    cond: C,
    if_true: A,
    if_false: B,
) -> Conditional<C, A, B> {
    Conditional {
        cond,
        if_true,
        if_false,
    }
}

impl<T, C: Signal<bool>, A: Signal<T>, B: Signal<T>> Signal<T> for Conditional<C, A, B> {
    fn capabilities(&self) -> Capabilities {
        Capabilities::new(ReadCapability::Readable, WriteCapability::Unwritable)
    }
    fn value_id(&self) -> Id<'_> {
        if !self.cond.has_value() {
            return Id::null();
        }
        let branch_tag = rui_id::make_id(*self.cond.read());
        let branch_id = if *self.cond.read() {
            self.if_true.value_id()
        } else {
            self.if_false.value_id()
        };
        combine_ids(branch_tag, branch_id)
    }
    fn has_value(&self) -> bool {
        self.cond.has_value()
            && if *self.cond.read() {
                self.if_true.has_value()
            } else {
                self.if_false.has_value()
            }
    }
    fn read(&self) -> &T {
        if *self.cond.read() {
            self.if_true.read()
        } else {
            self.if_false.read()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::value;

    #[test]
    fn add_combines_values_and_ids() {
        let s = add(value(2i32), value(3i32));
        assert_eq!(*s.read(), 5);
    }

    #[test]
    fn short_circuit_and_has_value_when_left_is_false_even_if_right_unknown() {
        let s = and(value(false), crate::primitives::empty::<bool>());
        assert!(s.has_value());
        assert!(!*s.read());
    }

    #[test]
    fn short_circuit_or_has_value_when_right_is_true_even_if_left_unknown() {
        let s = or(crate::primitives::empty::<bool>(), value(true));
        assert!(s.has_value());
        assert!(*s.read());
    }

    #[test]
    fn conditional_id_changes_when_branch_changes() {
        let s1 = conditional(value(true), value(1i32), value(2i32));
        let s2 = conditional(value(false), value(1i32), value(2i32));
        assert_ne!(s1.value_id(), s2.value_id());
    }
}
