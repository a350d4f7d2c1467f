//! Bordered: adds fixed padding around its child on every side.

use std::cell::Cell;

use crate::geometry::{BoxBorderWidth, LayoutScalar, LayoutVector};
use crate::leaf::{fold_vertical_child_requirements, get_max_child_width};
use crate::node::LayoutNodeHandle;
use crate::requirements::{CalculatedLayoutRequirements, RelativeLayoutAssignment};

use super::ContainerLogic;

pub struct BorderedLogic {
    border: Cell<BoxBorderWidth<LayoutScalar>>,
}

impl BorderedLogic {
    pub fn new(border: BoxBorderWidth<LayoutScalar>) -> Self {
        Self { border: Cell::new(border) }
    }

    pub fn set_border(&self, border: BoxBorderWidth<LayoutScalar>) {
        self.border.set(border);
    }
}

impl ContainerLogic for BorderedLogic {
    fn horizontal_requirements(&self, children: &[LayoutNodeHandle]) -> CalculatedLayoutRequirements {
        let border = self.border.get();
        CalculatedLayoutRequirements::new(get_max_child_width(children) + border.left + border.right, 0, 0)
    }

    fn vertical_requirements(
        &self,
        children: &[LayoutNodeHandle],
        assigned_width: LayoutScalar,
    ) -> CalculatedLayoutRequirements {
        let border = self.border.get();
        let requirements = fold_vertical_child_requirements(children, assigned_width - (border.left + border.right));
        CalculatedLayoutRequirements::new(
            requirements.size + border.top + border.bottom,
            requirements.ascent + border.top,
            requirements.descent + border.bottom,
        )
    }

    fn assign_children(&self, children: &[LayoutNodeHandle], assigned_size: LayoutVector, assigned_baseline_y: LayoutScalar) {
        let border = self.border.get();
        let region = crate::geometry::LayoutBox::new(
            LayoutVector::new(border.left, border.top),
            assigned_size - LayoutVector::new(border.left + border.right, border.top + border.bottom),
        );
        for child in children {
            child.set_relative_assignment(RelativeLayoutAssignment { region, baseline_y: assigned_baseline_y - border.top });
        }
    }
}

pub type Bordered = super::Container<BorderedLogic>;

pub fn bordered(border: BoxBorderWidth<LayoutScalar>) -> std::rc::Rc<Bordered> {
    super::Container::new(BorderedLogic::new(border))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::LeafRequirements;
    use crate::node::LayoutNode;
    use crate::spec::Layout;
    use crate::units::StyleInfo;
    use std::rc::Rc;

    #[test]
    fn border_shrinks_and_offsets_the_child() {
        let border = BoxBorderWidth { top: 2, right: 3, bottom: 4, left: 5 };
        let container = bordered(border);
        let leaf = Rc::new(crate::leaf::LayoutLeaf::new());
        leaf.refresh_layout(
            [96.0, 96.0],
            &StyleInfo::default(),
            Layout::default(),
            LeafRequirements::from_size(LayoutVector::new(10, 10)),
            crate::flags::LayoutFlags::NONE,
        );
        let handle: LayoutNodeHandle = leaf.clone();
        container.set_children(vec![handle]);
        container.set_relative_assignment(RelativeLayoutAssignment {
            region: crate::geometry::LayoutBox::new(LayoutVector::ZERO, LayoutVector::new(50, 50)),
            baseline_y: 0,
        });
        let assignment = leaf.assignment().unwrap();
        assert_eq!(assignment.region.corner, LayoutVector::new(5, 2));
        assert_eq!(assignment.region.size, LayoutVector::new(50 - 8, 50 - 6));
    }

    #[test]
    fn horizontal_requirements_add_left_and_right_border() {
        let border = BoxBorderWidth::uniform(3);
        let container = bordered(border);
        let leaf = Rc::new(crate::leaf::LayoutLeaf::new());
        leaf.refresh_layout(
            [96.0, 96.0],
            &StyleInfo::default(),
            Layout::default(),
            LeafRequirements::from_size(LayoutVector::new(10, 10)),
            crate::flags::LayoutFlags::NONE,
        );
        let handle: LayoutNodeHandle = leaf.clone();
        container.set_children(vec![handle]);
        assert_eq!(container.horizontal_requirements().size, 16);
    }
}
