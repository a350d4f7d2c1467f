//! Rotated: swaps its single child's axes, so the child is measured and
//! assigned as if width and height were exchanged. The actual 90°
//! counterclockwise visual transform is a rendering-time concern outside
//! this crate's scope (this crate only resolves sizes/regions, not
//! drawing) — composing that transform into the paint traversal is left to
//! the render layer built on top of these requirements.
//!
//! A rotated container with more than one child has no well-defined
//! rotation axis, so (as in the source system) it degenerates to layering
//! them unrotated.

use crate::geometry::{LayoutScalar, LayoutVector};
use crate::leaf::{assign_identical_child_regions, fold_vertical_child_requirements, get_max_child_width};
use crate::node::LayoutNodeHandle;
use crate::requirements::{CalculatedLayoutRequirements, RelativeLayoutAssignment};

use super::ContainerLogic;

pub struct RotatedLogic;

impl ContainerLogic for RotatedLogic {
    fn horizontal_requirements(&self, children: &[LayoutNodeHandle]) -> CalculatedLayoutRequirements {
        match children {
            [only] => {
                let v = only.vertical_requirements(0);
                CalculatedLayoutRequirements::new(v.size, 0, 0)
            }
            _ => CalculatedLayoutRequirements::new(get_max_child_width(children), 0, 0),
        }
    }

    fn vertical_requirements(
        &self,
        children: &[LayoutNodeHandle],
        assigned_width: LayoutScalar,
    ) -> CalculatedLayoutRequirements {
        match children {
            [only] => {
                let h = only.horizontal_requirements();
                CalculatedLayoutRequirements::new(h.size, 0, 0)
            }
            _ => fold_vertical_child_requirements(children, assigned_width),
        }
    }

    fn assign_children(&self, children: &[LayoutNodeHandle], assigned_size: LayoutVector, assigned_baseline_y: LayoutScalar) {
        match children {
            [only] => {
                let swapped = LayoutVector::new(assigned_size.y(), assigned_size.x());
                only.set_relative_assignment(RelativeLayoutAssignment {
                    region: crate::geometry::LayoutBox::new(LayoutVector::ZERO, swapped),
                    baseline_y: 0,
                });
            }
            _ => assign_identical_child_regions(children, assigned_size, assigned_baseline_y),
        }
    }
}

pub type Rotated = super::Container<RotatedLogic>;

pub fn rotated() -> std::rc::Rc<Rotated> {
    super::Container::new(RotatedLogic)
}
