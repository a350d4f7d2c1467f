//! The object-safe interface every leaf and container implements, so a
//! container can hold a mixed list of children without knowing their
//! concrete types.

use std::rc::{Rc, Weak};

use crate::geometry::LayoutScalar;
use crate::requirements::{LayoutRequirements, RelativeLayoutAssignment};

pub trait LayoutNode {
    fn horizontal_requirements(&self) -> LayoutRequirements;
    fn vertical_requirements(&self, assigned_width: LayoutScalar) -> LayoutRequirements;
    fn set_relative_assignment(&self, assignment: RelativeLayoutAssignment);

    /// The region/baseline this node was last assigned, if any pass has
    /// assigned one yet.
    fn assignment(&self) -> Option<RelativeLayoutAssignment>;

    /// Mark this node's own cached layout stale and propagate the
    /// notification up to the parent (and, for grid rows, sideways to
    /// sibling rows). The sole mechanism by which layout state is
    /// invalidated between refresh passes.
    fn record_content_change(&self);
}

pub type LayoutNodeHandle = Rc<dyn LayoutNode>;
pub type LayoutNodeWeak = Weak<dyn LayoutNode>;

/// Propagate a content-change notification to `parent`, if any is set. Used
/// by every container/leaf's `record_content_change` implementation.
pub fn notify_parent(parent: &Option<LayoutNodeWeak>) {
    if let Some(parent) = parent {
        if let Some(parent) = parent.upgrade() {
            parent.record_content_change();
        }
    }
}
