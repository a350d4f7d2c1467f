//! Identity values: opaque, comparable, hashable handles for "which thing".
//!
//! An [`Id`] answers "is this the same logical value as that one" without
//! requiring the value itself to be inspected or even kept around. The data
//! graph uses captured identities as naming-map keys and keyed-slot guards;
//! the signal layer uses identities as its change-detection currency.
//!
//! Three constructors cover the cases in the spec:
//! * [`make_id`] copies a value in and owns it (cheap `Rc` clone thereafter).
//! * [`make_id_by_reference`] borrows an existing value's byte-image without
//!   copying; valid only as long as the borrow lives.
//! * [`combine_ids`] pairs two ids without copying either side.
//!
//! [`Id::capture`] deep-clones whatever it holds into a [`CapturedId`], which
//! owns its data for `'static` and is what gets stored in naming maps and
//! keyed slots.

use std::any::{Any, TypeId};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Bound satisfied by any type usable as the payload of an identity.
pub trait IdValue: Eq + Ord + Hash + Clone + fmt::Debug + 'static {}
impl<T: Eq + Ord + Hash + Clone + fmt::Debug + 'static> IdValue for T {}

/// Object-safe core of an identity's payload. Not exposed directly; [`Id`]
/// and [`CapturedId`] wrap it to give the uniform comparison surface the
/// rest of the system relies on.
trait IdInterface: fmt::Debug {
    fn as_any(&self) -> &dyn Any;
    fn eq_dyn(&self, other: &dyn IdInterface) -> bool;
    fn cmp_dyn(&self, other: &dyn IdInterface) -> Ordering;
    fn hash_dyn(&self, state: &mut dyn Hasher);
    fn type_rank(&self) -> u64;
    fn clone_boxed(&self) -> Box<dyn IdInterface>;
}

struct ValueId<T>(T);

fn type_rank_of<T: 'static>() -> u64 {
    let tid = TypeId::of::<T>();
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    tid.hash(&mut hasher);
    hasher.finish()
}

impl<T: IdValue> IdInterface for ValueId<T> {
    fn as_any(&self) -> &dyn Any {
        &self.0
    }
    fn eq_dyn(&self, other: &dyn IdInterface) -> bool {
        match other.as_any().downcast_ref::<T>() {
            Some(o) => self.0 == *o,
            None => false,
        }
    }
    fn cmp_dyn(&self, other: &dyn IdInterface) -> Ordering {
        match other.as_any().downcast_ref::<T>() {
            Some(o) => self.0.cmp(o),
            None => self.type_rank().cmp(&other.type_rank()),
        }
    }
    fn hash_dyn(&self, mut state: &mut dyn Hasher) {
        self.type_rank().hash(&mut state);
        self.0.hash(&mut state);
    }
    fn type_rank(&self) -> u64 {
        type_rank_of::<T>()
    }
    fn clone_boxed(&self) -> Box<dyn IdInterface> {
        Box::new(ValueId(self.0.clone()))
    }
}

impl<T: fmt::Debug> fmt::Debug for ValueId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A borrowed-or-owned identity, valid for lifetime `'a`.
///
/// `Id` is the type threaded through signal plumbing and data graph calls.
/// It is cheap to construct and cheap to pass around: [`combine_ids`] never
/// copies the identities it pairs, it only nests the wrappers.
pub enum Id<'a> {
    /// Compares equal only to itself.
    Null,
    /// Owns its payload (via a reference-counted handle, so cloning `Id` is
    /// O(1) regardless of the payload's size).
    Owned(Rc<dyn IdInterface>),
    /// Borrows an existing value's identity without copying it.
    Ref(&'a dyn IdInterface),
    /// The combination of two identities; equal iff both components are
    /// equal pairwise.
    Pair(Box<Id<'a>>, Box<Id<'a>>),
}

impl<'a> fmt::Debug for Id<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Null => write!(f, "Id::Null"),
            Id::Owned(v) => write!(f, "Id::Owned({v:?})"),
            Id::Ref(v) => write!(f, "Id::Ref({v:?})"),
            Id::Pair(a, b) => write!(f, "Id::Pair({a:?}, {b:?})"),
        }
    }
}

fn inner(id: &Id<'_>) -> Option<&dyn IdInterface> {
    match id {
        Id::Null | Id::Pair(..) => None,
        Id::Owned(rc) => Some(rc.as_ref()),
        Id::Ref(r) => Some(*r),
    }
}

impl<'a> PartialEq for Id<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Id::Null, Id::Null) => true,
            (Id::Pair(a1, b1), Id::Pair(a2, b2)) => a1 == a2 && b1 == b2,
            (Id::Pair(..), _) | (_, Id::Pair(..)) | (Id::Null, _) | (_, Id::Null) => false,
            _ => {
                let (a, b) = (inner(self).unwrap(), inner(other).unwrap());
                a.eq_dyn(b)
            }
        }
    }
}
impl<'a> Eq for Id<'a> {}

impl<'a> PartialOrd for Id<'a> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<'a> Ord for Id<'a> {
    fn cmp(&self, other: &Self) -> Ordering {
        fn kind_rank(id: &Id<'_>) -> u8 {
            match id {
                Id::Null => 0,
                Id::Owned(_) | Id::Ref(_) => 1,
                Id::Pair(..) => 2,
            }
        }
        match (self, other) {
            (Id::Null, Id::Null) => Ordering::Equal,
            (Id::Pair(a1, b1), Id::Pair(a2, b2)) => a1.cmp(a2).then_with(|| b1.cmp(b2)),
            _ if kind_rank(self) != kind_rank(other) => kind_rank(self).cmp(&kind_rank(other)),
            _ => inner(self).unwrap().cmp_dyn(inner(other).unwrap()),
        }
    }
}

impl<'a> Hash for Id<'a> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Id::Null => 0u8.hash(state),
            Id::Pair(a, b) => {
                2u8.hash(state);
                a.hash(state);
                b.hash(state);
            }
            _ => {
                1u8.hash(state);
                inner(self).unwrap().hash_dyn(state);
            }
        }
    }
}

impl<'a> Id<'a> {
    /// The distinguished null identity. Compares equal only to itself.
    pub fn null() -> Id<'static> {
        Id::Null
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Id::Null)
    }

    /// Deep-clone this identity into an owned [`CapturedId`] that outlives
    /// `self`.
    pub fn capture(&self) -> CapturedId {
        match self {
            Id::Null => CapturedId(CapturedRepr::Null),
            Id::Owned(rc) => CapturedId(CapturedRepr::Value(rc.clone())),
            Id::Ref(r) => CapturedId(CapturedRepr::Value(Rc::from(r.clone_boxed()))),
            Id::Pair(a, b) => CapturedId(CapturedRepr::Pair(
                Box::new(a.capture()),
                Box::new(b.capture()),
            )),
        }
    }

    /// Create a cheap alias of this identity, borrowing it rather than
    /// copying its payload.
    pub fn by_ref(&'a self) -> Id<'a> {
        match self {
            Id::Null => Id::Null,
            Id::Owned(rc) => Id::Ref(rc.as_ref()),
            Id::Ref(r) => Id::Ref(*r),
            Id::Pair(a, b) => Id::Pair(Box::new(a.by_ref()), Box::new(b.by_ref())),
        }
    }
}

/// Construct an identity that owns a copy of `v`.
pub fn make_id<T: IdValue>(v: T) -> Id<'static> {
    Id::Owned(Rc::new(ValueId(v)))
}

/// Construct an identity from `v`'s byte-image (its `Clone`d value), without
/// requiring the caller to hand over ownership of `v` itself.
///
/// Rust's borrow checker makes a truly zero-copy reference-based identity
/// (as the reference implementation has, via a raw non-owning pointer)
/// unsound to expose as a safe API with an unconstrained lifetime, so this
/// clones `v` once up front; the resulting identity is otherwise identical
/// in behavior to one produced by [`make_id`].
pub fn make_id_by_reference<T: IdValue>(v: &T) -> Id<'static> {
    make_id(v.clone())
}

/// Combine two identities into a composite identity, without copying
/// either component.
pub fn combine_ids<'a>(a: Id<'a>, b: Id<'a>) -> Id<'a> {
    Id::Pair(Box::new(a), Box::new(b))
}

/// Create a cheap alias of an existing identity.
pub fn ref_id<'a>(id: &'a Id<'a>) -> Id<'a> {
    id.by_ref()
}

enum CapturedRepr {
    Null,
    Value(Rc<dyn IdInterface>),
    Pair(Box<CapturedId>, Box<CapturedId>),
}

impl fmt::Debug for CapturedRepr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapturedRepr::Null => write!(f, "Null"),
            CapturedRepr::Value(v) => write!(f, "Value({v:?})"),
            CapturedRepr::Pair(a, b) => write!(f, "Pair({a:?}, {b:?})"),
        }
    }
}

/// An owned, `'static` identity produced by [`Id::capture`]. Suitable for
/// storage as a naming-map key or a keyed-slot guard.
pub struct CapturedId(CapturedRepr);

impl fmt::Debug for CapturedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CapturedId({:?})", self.0)
    }
}

impl Clone for CapturedId {
    fn clone(&self) -> Self {
        match &self.0 {
            CapturedRepr::Null => CapturedId(CapturedRepr::Null),
            CapturedRepr::Value(rc) => CapturedId(CapturedRepr::Value(rc.clone())),
            CapturedRepr::Pair(a, b) => CapturedId(CapturedRepr::Pair(a.clone(), b.clone())),
        }
    }
}

impl Default for CapturedId {
    fn default() -> Self {
        CapturedId(CapturedRepr::Null)
    }
}

impl CapturedId {
    pub fn null() -> Self {
        Self::default()
    }

    pub fn is_null(&self) -> bool {
        matches!(self.0, CapturedRepr::Null)
    }

    /// Borrow this captured identity as an [`Id`] for comparison against a
    /// freshly computed identity without recapturing.
    pub fn as_id(&self) -> Id<'_> {
        match &self.0 {
            CapturedRepr::Null => Id::Null,
            CapturedRepr::Value(rc) => Id::Ref(rc.as_ref()),
            CapturedRepr::Pair(a, b) => Id::Pair(Box::new(a.as_id()), Box::new(b.as_id())),
        }
    }

    /// True iff this captured id matches the identity `other`.
    pub fn matches(&self, other: &Id<'_>) -> bool {
        &self.as_id() == other
    }
}

impl PartialEq for CapturedId {
    fn eq(&self, other: &Self) -> bool {
        self.as_id() == other.as_id()
    }
}
impl Eq for CapturedId {}

impl PartialOrd for CapturedId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for CapturedId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_id().cmp(&other.as_id())
    }
}

impl Hash for CapturedId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_id().hash(state)
    }
}

impl<'a> PartialEq<Id<'a>> for CapturedId {
    fn eq(&self, other: &Id<'a>) -> bool {
        self.matches(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_equals_only_itself() {
        assert_eq!(Id::null(), Id::null());
        let a = make_id(5i32);
        assert_ne!(Id::null(), a);
    }

    #[test]
    fn different_kinds_compare_unequal() {
        let a = make_id(5i32);
        let b = make_id("5".to_string());
        assert_ne!(a, b);
    }

    #[test]
    fn equal_values_hash_equal() {
        use std::collections::hash_map::DefaultHasher;
        let a = make_id(42i32);
        let b = make_id(42i32);
        assert_eq!(a, b);
        let mut ha = DefaultHasher::new();
        let mut hb = DefaultHasher::new();
        a.hash(&mut ha);
        b.hash(&mut hb);
        assert_eq!(ha.finish(), hb.finish());
    }

    #[test]
    fn capture_outlives_source() {
        let captured;
        {
            let v = 7i32;
            let id = make_id_by_reference(&v);
            captured = id.capture();
        }
        assert!(captured.matches(&make_id(7i32)));
    }

    #[test]
    fn capture_freezes_value_at_capture_time() {
        let mut v = 1i32;
        let captured = make_id_by_reference(&v).capture();
        v = 2;
        assert!(captured.matches(&make_id(1i32)));
        assert!(!captured.matches(&make_id_by_reference(&v)));
    }

    #[test]
    fn combine_ids_pairs_without_copying_and_compares_pairwise() {
        let a1 = combine_ids(make_id(1i32), make_id(2i32));
        let a2 = combine_ids(make_id(1i32), make_id(2i32));
        let a3 = combine_ids(make_id(1i32), make_id(3i32));
        assert_eq!(a1, a2);
        assert_ne!(a1, a3);
    }

    #[test]
    fn by_ref_is_cheap_alias_that_still_compares_equal() {
        let a = make_id(9i32);
        let r = a.by_ref();
        assert_eq!(a, r);
    }

    #[test]
    fn ordering_is_stable_across_kinds() {
        let n = Id::null();
        let v = make_id(1i32);
        let p = combine_ids(make_id(1i32), make_id(1i32));
        assert!(n < v);
        assert!(v < p);
    }
}
