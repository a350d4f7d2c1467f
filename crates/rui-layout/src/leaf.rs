//! `LayoutLeaf`: the layout-tree node backing ordinary widgets (anything
//! that isn't itself a container). Each refresh pass the widget calls
//! [`LayoutLeaf::refresh_layout`] with its measured size/ascent/descent;
//! later passes read back its resolved region via
//! [`LayoutNode::assignment`].

use std::cell::RefCell;

use crate::flags::LayoutFlags;
use crate::geometry::{LayoutScalar, LayoutVector};
use crate::node::{notify_parent, LayoutNode, LayoutNodeWeak};
use crate::requirements::{
    fold_in_requirements, resolve_relative_assignment, resolve_requirements,
    CalculatedLayoutRequirements, LayoutRequirements, RelativeLayoutAssignment,
};
use crate::spec::{resolve_layout_spec, Layout, ResolvedLayoutSpec};
use crate::units::{Ppi, StyleInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LeafRequirements {
    pub size: LayoutVector,
    pub ascent: LayoutScalar,
    pub descent: LayoutScalar,
}

impl LeafRequirements {
    pub fn new(size: LayoutVector, ascent: LayoutScalar, descent: LayoutScalar) -> Self {
        Self { size, ascent, descent }
    }

    pub fn from_size(size: LayoutVector) -> Self {
        Self { size, ascent: 0, descent: 0 }
    }
}

pub struct LayoutLeaf {
    resolved_spec: RefCell<ResolvedLayoutSpec>,
    requirements: RefCell<LeafRequirements>,
    assignment: RefCell<Option<RelativeLayoutAssignment>>,
    parent: RefCell<Option<LayoutNodeWeak>>,
}

impl LayoutLeaf {
    pub fn new() -> Self {
        Self {
            resolved_spec: RefCell::new(ResolvedLayoutSpec::default()),
            requirements: RefCell::new(LeafRequirements::default()),
            assignment: RefCell::new(None),
            parent: RefCell::new(None),
        }
    }

    pub fn set_parent(&self, parent: LayoutNodeWeak) {
        *self.parent.borrow_mut() = Some(parent);
    }

    /// Called once per refresh pass by the widget that owns this leaf.
    /// `default_flags` defaults to top/left/padded when the caller doesn't
    /// override it, matching ordinary widget behavior.
    pub fn refresh_layout(
        &self,
        ppi: Ppi,
        style_info: &StyleInfo,
        layout_spec: Layout,
        requirements: LeafRequirements,
        default_flags: LayoutFlags,
    ) {
        let resolved = resolve_layout_spec(ppi, style_info, layout_spec, default_flags);
        let spec_changed = resolved != *self.resolved_spec.borrow();
        if spec_changed {
            *self.resolved_spec.borrow_mut() = resolved;
        }
        let requirements_changed = requirements != *self.requirements.borrow();
        if requirements_changed {
            *self.requirements.borrow_mut() = requirements;
        }
        if spec_changed || requirements_changed {
            notify_parent(&self.parent.borrow());
        }
    }

    fn horizontal(&self) -> LayoutRequirements {
        let requirements = self.requirements.borrow();
        resolve_requirements(
            &self.resolved_spec.borrow(),
            0,
            CalculatedLayoutRequirements::new(requirements.size.x(), 0, 0),
        )
    }

    fn vertical(&self) -> LayoutRequirements {
        let requirements = self.requirements.borrow();
        resolve_requirements(
            &self.resolved_spec.borrow(),
            1,
            CalculatedLayoutRequirements::new(requirements.size.y(), requirements.ascent, requirements.descent),
        )
    }
}

impl Default for LayoutLeaf {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutNode for LayoutLeaf {
    fn horizontal_requirements(&self) -> LayoutRequirements {
        self.horizontal()
    }

    fn vertical_requirements(&self, _assigned_width: LayoutScalar) -> LayoutRequirements {
        self.vertical()
    }

    fn set_relative_assignment(&self, assignment: RelativeLayoutAssignment) {
        let resolved = resolve_relative_assignment(
            &self.resolved_spec.borrow(),
            assignment,
            self.horizontal(),
            self.vertical(),
        );
        *self.assignment.borrow_mut() = Some(resolved);
    }

    fn assignment(&self) -> Option<RelativeLayoutAssignment> {
        *self.assignment.borrow()
    }

    fn record_content_change(&self) {
        notify_parent(&self.parent.borrow());
    }
}

/// Fold every child's horizontal requirements together and report the
/// widest.
pub fn get_max_child_width(children: &[crate::node::LayoutNodeHandle]) -> LayoutScalar {
    children.iter().map(|c| c.horizontal_requirements().size).max().unwrap_or(0)
}

pub fn fold_horizontal_child_requirements(
    children: &[crate::node::LayoutNodeHandle],
) -> CalculatedLayoutRequirements {
    CalculatedLayoutRequirements::new(get_max_child_width(children), 0, 0)
}

pub fn fold_vertical_child_requirements(
    children: &[crate::node::LayoutNodeHandle],
    assigned_width: LayoutScalar,
) -> CalculatedLayoutRequirements {
    let mut requirements = CalculatedLayoutRequirements::default();
    for child in children {
        fold_in_requirements(&mut requirements, child.vertical_requirements(assigned_width));
    }
    requirements
}

pub fn assign_identical_child_regions(
    children: &[crate::node::LayoutNodeHandle],
    assigned_size: LayoutVector,
    assigned_baseline_y: LayoutScalar,
) {
    for child in children {
        child.set_relative_assignment(RelativeLayoutAssignment {
            region: crate::geometry::LayoutBox::new(LayoutVector::ZERO, assigned_size),
            baseline_y: assigned_baseline_y,
        });
    }
}

pub fn compute_total_height(children: &[crate::node::LayoutNodeHandle], assigned_width: LayoutScalar) -> LayoutScalar {
    children.iter().map(|c| c.vertical_requirements(assigned_width).size).sum()
}
