//! Floating: detaches a subtree from its parent's layout entirely. The
//! detached root measures itself independent of whatever region its
//! parent would otherwise have assigned it, is clamped to a caller-
//! supplied min/max, and is resolved at that size at the origin. Where it
//! actually gets drawn (offset, clipped, etc.) is the caller's
//! responsibility — this only produces the size and assigns the root's
//! own subtree.
//!
//! A negative component of `min_size`/`max_size` means "no limit" on that
//! axis; zero is a real constraint (e.g. a `max_size` of zero forces that
//! axis down to zero), matching how the rest of the traversal treats an
//! explicit zero as meaningful.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::geometry::{LayoutBox, LayoutScalar, LayoutVector};
use crate::node::{LayoutNode, LayoutNodeHandle};
use crate::requirements::RelativeLayoutAssignment;

fn clamp_measured(measured: LayoutScalar, min: LayoutScalar, max: LayoutScalar) -> LayoutScalar {
    let mut size = measured;
    if min >= 0 && size < min {
        size = min;
    }
    if max >= 0 && size > max {
        size = max;
    }
    size
}

pub struct Floating {
    min_size: Cell<LayoutVector>,
    max_size: Cell<LayoutVector>,
    root: RefCell<Option<LayoutNodeHandle>>,
    size: Cell<LayoutVector>,
}

impl Floating {
    pub fn new(min_size: LayoutVector, max_size: LayoutVector) -> Rc<Self> {
        Rc::new(Self {
            min_size: Cell::new(min_size),
            max_size: Cell::new(max_size),
            root: RefCell::new(None),
            size: Cell::new(LayoutVector::ZERO),
        })
    }

    /// Install this pass's detached subtree root. Called once per refresh
    /// pass before [`Floating::resolve`].
    pub fn set_root(&self, root: LayoutNodeHandle) {
        *self.root.borrow_mut() = Some(root);
    }

    pub fn set_limits(&self, min_size: LayoutVector, max_size: LayoutVector) {
        self.min_size.set(min_size);
        self.max_size.set(max_size);
    }

    /// Measure the detached root's minimum size, clamp it, and assign the
    /// root that size at the origin. Must be called once the root (and its
    /// whole subtree) has had its content refreshed for this pass.
    pub fn resolve(&self) {
        let root = match self.root.borrow().clone() {
            Some(root) => root,
            None => return,
        };
        let horizontal = root.horizontal_requirements();
        let vertical = root.vertical_requirements(horizontal.size);
        let min_size = self.min_size.get();
        let max_size = self.max_size.get();
        let size = LayoutVector::new(
            clamp_measured(horizontal.size, min_size.x(), max_size.x()),
            clamp_measured(vertical.size, min_size.y(), max_size.y()),
        );
        self.size.set(size);
        root.set_relative_assignment(RelativeLayoutAssignment {
            region: LayoutBox::new(LayoutVector::ZERO, size),
            baseline_y: vertical.ascent,
        });
    }

    pub fn size(&self) -> LayoutVector {
        self.size.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::LeafRequirements;
    use crate::spec::Layout;
    use crate::units::StyleInfo;

    fn leaf_with(width: LayoutScalar, height: LayoutScalar) -> Rc<crate::leaf::LayoutLeaf> {
        let leaf = Rc::new(crate::leaf::LayoutLeaf::new());
        leaf.refresh_layout(
            [96.0, 96.0],
            &StyleInfo::default(),
            Layout::default(),
            LeafRequirements::from_size(LayoutVector::new(width, height)),
            crate::flags::LayoutFlags::NONE,
        );
        leaf
    }

    #[test]
    fn unclamped_floating_sizes_itself_to_its_root() {
        let floating = Floating::new(LayoutVector::new(-1, -1), LayoutVector::new(-1, -1));
        let root: LayoutNodeHandle = leaf_with(30, 20);
        floating.set_root(root.clone());
        floating.resolve();
        assert_eq!(floating.size(), LayoutVector::new(30, 20));
        assert_eq!(root.assignment().unwrap().region, LayoutBox::new(LayoutVector::ZERO, LayoutVector::new(30, 20)));
    }

    #[test]
    fn zero_max_size_forces_that_axis_to_zero() {
        let floating = Floating::new(LayoutVector::new(-1, -1), LayoutVector::new(0, -1));
        let root: LayoutNodeHandle = leaf_with(30, 20);
        floating.set_root(root.clone());
        floating.resolve();
        assert_eq!(floating.size(), LayoutVector::new(0, 20));
    }

    #[test]
    fn min_size_raises_an_undersized_root() {
        let floating = Floating::new(LayoutVector::new(50, -1), LayoutVector::new(-1, -1));
        let root: LayoutNodeHandle = leaf_with(30, 20);
        floating.set_root(root.clone());
        floating.resolve();
        assert_eq!(floating.size().x(), 50);
    }
}
