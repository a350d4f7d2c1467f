//! Clamped: imposes a per-axis maximum on its child's assigned size. A
//! clamp value of zero or negative means "no limit" on that axis. When the
//! assigned region is larger than the clamp, the child is centered within
//! it rather than stretched.

use std::cell::Cell;

use crate::geometry::{LayoutScalar, LayoutVector};
use crate::leaf::{fold_vertical_child_requirements, get_max_child_width};
use crate::node::LayoutNodeHandle;
use crate::requirements::{CalculatedLayoutRequirements, RelativeLayoutAssignment};

use super::ContainerLogic;

fn clamp(value: LayoutScalar, max: LayoutScalar) -> LayoutScalar {
    if max > 0 {
        value.min(max)
    } else {
        value
    }
}

pub struct ClampedLogic {
    max_size: Cell<LayoutVector>,
}

impl ClampedLogic {
    pub fn new(max_size: LayoutVector) -> Self {
        Self { max_size: Cell::new(max_size) }
    }

    pub fn set_max_size(&self, max_size: LayoutVector) {
        self.max_size.set(max_size);
    }
}

impl ContainerLogic for ClampedLogic {
    fn horizontal_requirements(&self, children: &[LayoutNodeHandle]) -> CalculatedLayoutRequirements {
        CalculatedLayoutRequirements::new(get_max_child_width(children), 0, 0)
    }

    fn vertical_requirements(
        &self,
        children: &[LayoutNodeHandle],
        assigned_width: LayoutScalar,
    ) -> CalculatedLayoutRequirements {
        let required_width = get_max_child_width(children);
        let clamped_width = required_width.max(clamp(assigned_width, self.max_size.get().x()));
        fold_vertical_child_requirements(children, clamped_width)
    }

    fn assign_children(&self, children: &[LayoutNodeHandle], assigned_size: LayoutVector, _assigned_baseline_y: LayoutScalar) {
        let max_size = self.max_size.get();
        let clamped = LayoutVector::new(clamp(assigned_size.x(), max_size.x()), clamp(assigned_size.y(), max_size.y()));
        let offset = LayoutVector::new((assigned_size.x() - clamped.x()) / 2, (assigned_size.y() - clamped.y()) / 2);
        for child in children {
            let vertical = child.vertical_requirements(clamped.x());
            child.set_relative_assignment(RelativeLayoutAssignment {
                region: crate::geometry::LayoutBox::new(offset, clamped),
                baseline_y: vertical.ascent,
            });
        }
    }
}

pub type Clamped = super::Container<ClampedLogic>;

pub fn clamped(max_size: LayoutVector) -> std::rc::Rc<Clamped> {
    super::Container::new(ClampedLogic::new(max_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::LeafRequirements;
    use crate::node::LayoutNode;
    use crate::requirements::RelativeLayoutAssignment;
    use crate::spec::Layout;
    use crate::units::StyleInfo;
    use std::rc::Rc;

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
    fn oversized_region_centers_child_at_clamp_size() {
        let c = clamped(LayoutVector::new(20, 20));
        let child = leaf_with(10, 10);
        let handle: LayoutNodeHandle = child.clone();
        c.set_children(vec![handle]);
        c.set_relative_assignment(RelativeLayoutAssignment {
            region: crate::geometry::LayoutBox::new(LayoutVector::ZERO, LayoutVector::new(100, 100)),
            baseline_y: 0,
        });
        let assignment = child.assignment().unwrap();
        assert_eq!(assignment.region.size, LayoutVector::new(20, 20));
        assert_eq!(assignment.region.corner, LayoutVector::new(40, 40));
    }

    #[test]
    fn zero_clamp_means_no_limit() {
        let c = clamped(LayoutVector::new(0, 0));
        let child = leaf_with(10, 10);
        let handle: LayoutNodeHandle = child.clone();
        c.set_children(vec![handle]);
        c.set_relative_assignment(RelativeLayoutAssignment {
            region: crate::geometry::LayoutBox::new(LayoutVector::ZERO, LayoutVector::new(100, 100)),
            baseline_y: 0,
        });
        let assignment = child.assignment().unwrap();
        assert_eq!(assignment.region.size, LayoutVector::new(100, 100));
    }
}
