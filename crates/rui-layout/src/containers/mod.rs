//! The generic container shell (cacher + children + parent link) shared by
//! every container type, parameterized by a per-kind [`ContainerLogic`] —
//! mirroring the source system's `simple_layout_container<Logic>` template,
//! with `Logic` as a type parameter rather than a vtable since each
//! container's logic type is fixed at construction.

pub mod bordered;
pub mod clamped;
pub mod flow;
pub mod floating;
pub mod grid;
pub mod layered;
pub mod linear;
pub mod rotated;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::cacher::{
    cache_horizontal_layout_requirements, cache_relative_assignment, cache_vertical_layout_requirements,
    update_layout_cacher, ContentChangeCounter, LayoutCacher,
};
use crate::flags::LayoutFlags;
use crate::geometry::{LayoutScalar, LayoutVector};
use crate::node::{notify_parent, LayoutNode, LayoutNodeHandle, LayoutNodeWeak};
use crate::requirements::{resolve_relative_assignment, resolve_requirements, RelativeLayoutAssignment};
use crate::spec::Layout;
use crate::units::{Ppi, StyleInfo};

/// Per-kind layout policy: how a container folds its children's
/// requirements together and divides its assigned space among them.
pub trait ContainerLogic {
    fn horizontal_requirements(
        &self,
        children: &[LayoutNodeHandle],
    ) -> crate::requirements::CalculatedLayoutRequirements;

    fn vertical_requirements(
        &self,
        children: &[LayoutNodeHandle],
        assigned_width: LayoutScalar,
    ) -> crate::requirements::CalculatedLayoutRequirements;

    fn assign_children(
        &self,
        children: &[LayoutNodeHandle],
        assigned_size: LayoutVector,
        assigned_baseline_y: LayoutScalar,
    );

    /// Default alignment a child gets when it specifies none for an axis.
    /// Most containers default to top/left; row/column fill the
    /// cross-axis.
    fn default_child_flags(&self) -> LayoutFlags {
        LayoutFlags::NONE
    }
}

pub struct Container<L> {
    children: RefCell<Vec<LayoutNodeHandle>>,
    parent: RefCell<Option<LayoutNodeWeak>>,
    cacher: RefCell<LayoutCacher>,
    content_change: Cell<ContentChangeCounter>,
    last_assignment: RefCell<Option<RelativeLayoutAssignment>>,
    logic: L,
}

impl<L: ContainerLogic> Container<L> {
    pub fn new(logic: L) -> Rc<Self> {
        Rc::new(Self {
            children: RefCell::new(Vec::new()),
            parent: RefCell::new(None),
            cacher: RefCell::new(LayoutCacher::default()),
            content_change: Cell::new(0),
            last_assignment: RefCell::new(None),
            logic,
        })
    }

    pub fn logic(&self) -> &L {
        &self.logic
    }

    pub fn set_parent(&self, parent: LayoutNodeWeak) {
        *self.parent.borrow_mut() = Some(parent);
    }

    /// Replace this container's children (done once per refresh pass by
    /// whatever scope adapter owns the container).
    pub fn set_children(&self, children: Vec<LayoutNodeHandle>) {
        *self.children.borrow_mut() = children;
    }

    pub fn children(&self) -> std::cell::Ref<'_, Vec<LayoutNodeHandle>> {
        self.children.borrow()
    }

    /// Refresh the resolved spec for this container from a new layout spec,
    /// bumping the content-change counter if it changed. Called once per
    /// refresh pass.
    pub fn refresh_spec(&self, ppi: Ppi, style_info: &StyleInfo, layout_spec: Layout, default_flags: LayoutFlags) {
        let mut cacher = self.cacher.borrow_mut();
        if update_layout_cacher(&mut cacher, ppi, style_info, layout_spec, default_flags) {
            drop(cacher);
            self.record_content_change();
        }
    }

    fn current_counter(&self) -> ContentChangeCounter {
        self.content_change.get()
    }
}

impl<L: ContainerLogic> LayoutNode for Container<L> {
    fn horizontal_requirements(&self) -> crate::requirements::LayoutRequirements {
        let children = self.children.borrow();
        let counter = self.current_counter();
        let mut cacher = self.cacher.borrow_mut();
        let calculated =
            cache_horizontal_layout_requirements(&mut cacher, counter, || self.logic.horizontal_requirements(&children));
        resolve_requirements(&cacher.resolved_spec, 0, calculated)
    }

    fn vertical_requirements(&self, assigned_width: LayoutScalar) -> crate::requirements::LayoutRequirements {
        let children = self.children.borrow();
        let counter = self.current_counter();
        let mut cacher = self.cacher.borrow_mut();
        let calculated = cache_vertical_layout_requirements(&mut cacher, counter, assigned_width, || {
            self.logic.vertical_requirements(&children, assigned_width)
        });
        resolve_requirements(&cacher.resolved_spec, 1, calculated)
    }

    fn set_relative_assignment(&self, assignment: RelativeLayoutAssignment) {
        let horizontal = self.horizontal_requirements();
        let vertical = self.vertical_requirements(assignment.region.size.x());
        let counter = self.current_counter();
        let children = self.children.borrow();
        let mut cacher = self.cacher.borrow_mut();
        let resolved_spec = cacher.resolved_spec;
        let resolved = cache_relative_assignment(&mut cacher, counter, assignment, |assignment| {
            resolve_relative_assignment(&resolved_spec, assignment, horizontal, vertical)
        });
        self.logic.assign_children(&children, resolved.region.size, resolved.baseline_y);
        *self.last_assignment.borrow_mut() = Some(resolved);
    }

    fn assignment(&self) -> Option<RelativeLayoutAssignment> {
        *self.last_assignment.borrow()
    }

    fn record_content_change(&self) {
        if !self.cacher.borrow().is_fully_invalid() {
            self.cacher.borrow_mut().invalidate();
            self.content_change.set(self.content_change.get() + 1);
            notify_parent(&self.parent.borrow());
        }
    }
}
