//! Layered: every child shares the same region, so they're stacked on top
//! of each other (e.g. a background behind its foreground content).

use crate::geometry::{LayoutScalar, LayoutVector};
use crate::leaf::{assign_identical_child_regions, fold_vertical_child_requirements, get_max_child_width};
use crate::node::LayoutNodeHandle;
use crate::requirements::CalculatedLayoutRequirements;

use super::ContainerLogic;

pub struct LayeredLogic;

impl ContainerLogic for LayeredLogic {
    fn horizontal_requirements(&self, children: &[LayoutNodeHandle]) -> CalculatedLayoutRequirements {
        CalculatedLayoutRequirements::new(get_max_child_width(children), 0, 0)
    }

    fn vertical_requirements(
        &self,
        children: &[LayoutNodeHandle],
        assigned_width: LayoutScalar,
    ) -> CalculatedLayoutRequirements {
        fold_vertical_child_requirements(children, assigned_width)
    }

    fn assign_children(&self, children: &[LayoutNodeHandle], assigned_size: LayoutVector, assigned_baseline_y: LayoutScalar) {
        assign_identical_child_regions(children, assigned_size, assigned_baseline_y);
    }
}

pub type Layered = super::Container<LayeredLogic>;

pub fn layered() -> std::rc::Rc<Layered> {
    super::Container::new(LayeredLogic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::{LayoutLeaf, LeafRequirements};
    use crate::node::LayoutNode;
    use crate::spec::Layout;
    use crate::units::StyleInfo;
    use std::rc::Rc;

    #[test]
    fn layered_gives_every_child_the_full_region() {
        let layered = layered();
        let a = Rc::new(LayoutLeaf::new());
        a.refresh_layout(
            [96.0, 96.0],
            &StyleInfo::default(),
            Layout::default(),
            LeafRequirements::from_size(LayoutVector::new(5, 5)),
            crate::flags::LayoutFlags::NONE,
        );
        let b: LayoutNodeHandle = a.clone();
        layered.set_children(vec![b]);
        layered.set_relative_assignment(crate::requirements::RelativeLayoutAssignment {
            region: crate::geometry::LayoutBox::new(LayoutVector::ZERO, LayoutVector::new(40, 40)),
            baseline_y: 0,
        });
        assert_eq!(a.assignment().unwrap().region.size, LayoutVector::new(40, 40));
    }
}
