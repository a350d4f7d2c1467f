//! Row and column: the two basic linear layouts. Every other container
//! other than layered/grid is built by composing one of these with extra
//! policy (flow wraps rows, grid rows are rows, etc.), matching the source
//! system's own reuse of `row_layout_logic`/`column_layout_logic`.

use crate::flags::{LayoutFlags, XAlignment, YAlignment};
use crate::geometry::LayoutScalar;
use crate::leaf::{fold_vertical_child_requirements, get_max_child_width};
use crate::node::LayoutNodeHandle;
use crate::requirements::{
    fold_in_requirements, CalculatedLayoutRequirements, LayoutRequirements, RelativeLayoutAssignment,
};

use super::{Container, ContainerLogic};

pub struct RowLogic;

impl ContainerLogic for RowLogic {
    fn horizontal_requirements(&self, children: &[LayoutNodeHandle]) -> CalculatedLayoutRequirements {
        let total_size: LayoutScalar = children.iter().map(|c| c.horizontal_requirements().size).sum();
        CalculatedLayoutRequirements::new(total_size, 0, 0)
    }

    fn vertical_requirements(
        &self,
        children: &[LayoutNodeHandle],
        assigned_width: LayoutScalar,
    ) -> CalculatedLayoutRequirements {
        let widths = distribute_row_width(children, assigned_width);
        let mut requirements = CalculatedLayoutRequirements::default();
        for (child, width) in children.iter().zip(widths) {
            fold_in_requirements(&mut requirements, child.vertical_requirements(width));
        }
        requirements
    }

    fn assign_children(&self, children: &[LayoutNodeHandle], assigned_size: crate::geometry::LayoutVector, assigned_baseline_y: LayoutScalar) {
        let widths = distribute_row_width(children, assigned_size.x());
        let mut x = 0;
        for (child, width) in children.iter().zip(widths) {
            child.set_relative_assignment(RelativeLayoutAssignment {
                region: crate::geometry::LayoutBox::new(
                    crate::geometry::LayoutVector::new(x, 0),
                    crate::geometry::LayoutVector::new(width, assigned_size.y()),
                ),
                baseline_y: assigned_baseline_y,
            });
            x += width;
        }
    }

    fn default_child_flags(&self) -> LayoutFlags {
        LayoutFlags { y_alignment: Some(YAlignment::Fill), ..LayoutFlags::NONE }
    }
}

/// Give each child its required width, then distribute any surplus
/// (assigned width minus the sum of required widths) proportionally to
/// growth factor.
fn distribute_row_width(children: &[LayoutNodeHandle], assigned_width: LayoutScalar) -> Vec<LayoutScalar> {
    let requirements: Vec<LayoutRequirements> = children.iter().map(|c| c.horizontal_requirements()).collect();
    let required_width: LayoutScalar = requirements.iter().map(|r| r.size).sum();
    let mut total_growth: f32 = requirements.iter().map(|r| r.growth_factor as f32).sum();
    let mut extra_width = assigned_width - required_width;
    requirements
        .iter()
        .map(|r| {
            let mut width = r.size;
            if total_growth != 0.0 {
                let share = (r.growth_factor as f32 / total_growth * extra_width as f32).round() as LayoutScalar;
                extra_width -= share;
                total_growth -= r.growth_factor as f32;
                width += share;
            }
            width
        })
        .collect()
}

pub struct ColumnLogic;

impl ContainerLogic for ColumnLogic {
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

    fn assign_children(&self, children: &[LayoutNodeHandle], assigned_size: crate::geometry::LayoutVector, _assigned_baseline_y: LayoutScalar) {
        let mut y = 0;
        for child in children {
            let req = child.vertical_requirements(assigned_size.x());
            child.set_relative_assignment(RelativeLayoutAssignment {
                region: crate::geometry::LayoutBox::new(
                    crate::geometry::LayoutVector::new(0, y),
                    crate::geometry::LayoutVector::new(assigned_size.x(), req.size),
                ),
                baseline_y: req.ascent,
            });
            y += req.size;
        }
    }

    fn default_child_flags(&self) -> LayoutFlags {
        LayoutFlags { x_alignment: Some(XAlignment::Fill), ..LayoutFlags::NONE }
    }
}

pub type Row = Container<RowLogic>;
pub type Column = Container<ColumnLogic>;

pub fn row() -> std::rc::Rc<Row> {
    Container::new(RowLogic)
}

pub fn column() -> std::rc::Rc<Column> {
    Container::new(ColumnLogic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::{LayoutLeaf, LeafRequirements};
    use crate::node::LayoutNode;
    use crate::requirements::RelativeLayoutAssignment;
    use crate::spec::Layout;
    use crate::units::StyleInfo;
    use std::rc::Rc;

    fn leaf_with(width: LayoutScalar, height: LayoutScalar) -> Rc<LayoutLeaf> {
        let leaf = Rc::new(LayoutLeaf::new());
        leaf.refresh_layout(
            [96.0, 96.0],
            &StyleInfo::default(),
            Layout::default(),
            LeafRequirements::from_size(crate::geometry::LayoutVector::new(width, height)),
            LayoutFlags::NONE,
        );
        leaf
    }

    #[test]
    fn row_horizontal_requirements_sum_child_widths() {
        let row = row();
        let a: LayoutNodeHandle = leaf_with(10, 5);
        let b: LayoutNodeHandle = leaf_with(20, 5);
        row.set_children(vec![a, b]);
        assert_eq!(row.horizontal_requirements().size, 30);
    }

    #[test]
    fn row_distributes_surplus_by_growth_factor() {
        let row = row();
        let grow_leaf = Rc::new(LayoutLeaf::new());
        grow_leaf.refresh_layout(
            [96.0, 96.0],
            &StyleInfo::default(),
            Layout { flags: LayoutFlags::x(XAlignment::Grow), ..Default::default() },
            LeafRequirements::from_size(crate::geometry::LayoutVector::new(10, 5)),
            LayoutFlags::NONE,
        );
        let fixed: LayoutNodeHandle = leaf_with(10, 5);
        let grow: LayoutNodeHandle = grow_leaf.clone();
        row.set_children(vec![fixed, grow]);
        row.set_relative_assignment(RelativeLayoutAssignment {
            region: crate::geometry::LayoutBox::new(crate::geometry::LayoutVector::ZERO, crate::geometry::LayoutVector::new(100, 20)),
            baseline_y: 0,
        });
        let assignment = grow_leaf.assignment().unwrap();
        assert_eq!(assignment.region.size.x(), 90);
    }

    #[test]
    fn column_vertical_requirements_sum_child_heights() {
        let col = column();
        let a: LayoutNodeHandle = leaf_with(10, 5);
        let b: LayoutNodeHandle = leaf_with(10, 15);
        col.set_children(vec![a, b]);
        assert_eq!(col.vertical_requirements(10).size, 20);
    }
}
