//! Flow: arranges children in horizontal rows, wrapping to a new row
//! whenever the next child would overflow the assigned width.
//!
//! VerticalFlow: a simpler sibling that arranges children into equal-width
//! columns, filling each column top-to-bottom until it reaches roughly the
//! average column height before moving on to the next.

use crate::flags::XAlignment;
use crate::geometry::{LayoutBox, LayoutScalar, LayoutVector};
use crate::leaf::{compute_total_height, fold_horizontal_child_requirements, get_max_child_width};
use crate::node::LayoutNodeHandle;
use crate::requirements::{fold_in_requirements, CalculatedLayoutRequirements, RelativeLayoutAssignment};

use super::ContainerLogic;

#[derive(Debug, Clone, Copy)]
struct WrappedRow {
    width: LayoutScalar,
    requirements: CalculatedLayoutRequirements,
    y: LayoutScalar,
}

struct WrappingState {
    assigned_width: LayoutScalar,
    active_row: WrappedRow,
    accumulated_width: LayoutScalar,
    visible_width: LayoutScalar,
}

fn wrap_row(state: &mut WrappingState, rows: &mut Vec<WrappedRow>) {
    state.active_row.width = state.visible_width;
    state.active_row.requirements.size =
        state.active_row.requirements.size.max(state.active_row.requirements.ascent + state.active_row.requirements.descent);
    rows.push(state.active_row);
    state.active_row.y += state.active_row.requirements.size;
    state.active_row.requirements = CalculatedLayoutRequirements::default();
    state.accumulated_width = 0;
    state.visible_width = 0;
}

/// Walk the children, deciding which row each lands on. Returns the total
/// height and the per-row bookkeeping (used both to report vertical
/// requirements and to actually assign regions).
fn calculate_wrapping(children: &[LayoutNodeHandle], assigned_width: LayoutScalar) -> (LayoutScalar, Vec<WrappedRow>) {
    let mut rows = Vec::new();
    let mut state = WrappingState {
        assigned_width,
        active_row: WrappedRow { width: 0, requirements: CalculatedLayoutRequirements::default(), y: 0 },
        accumulated_width: 0,
        visible_width: 0,
    };
    for child in children {
        let x = child.horizontal_requirements();
        if state.accumulated_width + x.size > state.assigned_width {
            wrap_row(&mut state, &mut rows);
        }
        let y = child.vertical_requirements(x.size);
        state.visible_width += x.size;
        state.accumulated_width += x.size;
        fold_in_requirements(&mut state.active_row.requirements, y);
    }
    // Include the last/current row in the height total.
    wrap_row(&mut state, &mut rows);
    (state.active_row.y, rows)
}

fn calculate_initial_x(assigned_width: LayoutScalar, x_alignment: XAlignment, row: &WrappedRow) -> LayoutScalar {
    match x_alignment {
        XAlignment::Right => assigned_width - row.width,
        XAlignment::Center => (assigned_width - row.width) / 2,
        _ => 0,
    }
}

pub struct FlowLogic {
    /// Alignment of each row within the assigned width (the container
    /// itself always fills the full width).
    pub row_alignment: XAlignment,
}

impl ContainerLogic for FlowLogic {
    fn horizontal_requirements(&self, children: &[LayoutNodeHandle]) -> CalculatedLayoutRequirements {
        // Worst case: one child per row, so the minimal width is whatever
        // the widest child needs.
        let mut requirements = CalculatedLayoutRequirements::default();
        for child in children {
            fold_in_requirements(&mut requirements, child.horizontal_requirements());
        }
        requirements
    }

    fn vertical_requirements(
        &self,
        children: &[LayoutNodeHandle],
        assigned_width: LayoutScalar,
    ) -> CalculatedLayoutRequirements {
        let (total_height, rows) = calculate_wrapping(children, assigned_width);
        let mut ascent = 0;
        let mut descent = 0;
        if let Some(row0) = rows.first() {
            if row0.requirements.ascent != 0 || row0.requirements.descent != 0 {
                ascent = row0.requirements.ascent;
                descent = row0.requirements.descent + (total_height - row0.requirements.size);
            }
        }
        CalculatedLayoutRequirements::new(total_height, ascent, descent)
    }

    fn assign_children(&self, children: &[LayoutNodeHandle], assigned_size: LayoutVector, _assigned_baseline_y: LayoutScalar) {
        let (_, rows) = calculate_wrapping(children, assigned_size.x());
        if rows.is_empty() {
            return;
        }
        let mut row_index = 0;
        let mut x = calculate_initial_x(assigned_size.x(), self.row_alignment, &rows[0]);
        let mut accumulated_width = 0;
        for child in children {
            let horizontal = child.horizontal_requirements();
            if accumulated_width + horizontal.size > assigned_size.x() {
                row_index += 1;
                accumulated_width = 0;
                x = calculate_initial_x(assigned_size.x(), self.row_alignment, &rows[row_index]);
            }
            let row = &rows[row_index];
            child.set_relative_assignment(RelativeLayoutAssignment {
                region: LayoutBox::new(LayoutVector::new(x, row.y), LayoutVector::new(horizontal.size, row.requirements.size)),
                baseline_y: row.requirements.ascent,
            });
            x += horizontal.size;
            accumulated_width += horizontal.size;
        }
    }
}

pub type Flow = super::Container<FlowLogic>;

pub fn flow(row_alignment: XAlignment) -> std::rc::Rc<Flow> {
    super::Container::new(FlowLogic { row_alignment })
}

pub struct VerticalFlowLogic;

impl ContainerLogic for VerticalFlowLogic {
    fn horizontal_requirements(&self, children: &[LayoutNodeHandle]) -> CalculatedLayoutRequirements {
        fold_horizontal_child_requirements(children)
    }

    fn vertical_requirements(
        &self,
        children: &[LayoutNodeHandle],
        assigned_width: LayoutScalar,
    ) -> CalculatedLayoutRequirements {
        let column_width = get_max_child_width(children);
        if column_width <= 0 {
            return CalculatedLayoutRequirements::default();
        }
        let total_height = compute_total_height(children, column_width);
        let n_columns = (assigned_width / column_width).max(1);
        let average_column_height = total_height / n_columns;

        let mut max_column_height = 0;
        let mut current_column_height = 0;
        for child in children {
            if current_column_height >= average_column_height {
                max_column_height = max_column_height.max(current_column_height);
                current_column_height = 0;
            }
            current_column_height += child.vertical_requirements(column_width).size;
        }
        CalculatedLayoutRequirements::new(max_column_height, 0, 0)
    }

    fn assign_children(&self, children: &[LayoutNodeHandle], assigned_size: LayoutVector, _assigned_baseline_y: LayoutScalar) {
        let column_width = get_max_child_width(children);
        if column_width <= 0 {
            return;
        }
        let total_height = compute_total_height(children, column_width);
        let n_columns = (assigned_size.x() / column_width).max(1);
        let average_column_height = total_height / n_columns;

        let mut p = LayoutVector::ZERO;
        for child in children {
            if p.y() >= average_column_height {
                p = LayoutVector::new(p.x() + column_width, 0);
            }
            let vertical = child.vertical_requirements(column_width);
            child.set_relative_assignment(RelativeLayoutAssignment {
                region: LayoutBox::new(p, LayoutVector::new(column_width, vertical.size)),
                baseline_y: vertical.ascent,
            });
            p = LayoutVector::new(p.x(), p.y() + vertical.size);
        }
    }
}

pub type VerticalFlow = super::Container<VerticalFlowLogic>;

pub fn vertical_flow() -> std::rc::Rc<VerticalFlow> {
    super::Container::new(VerticalFlowLogic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::LeafRequirements;
    use crate::node::LayoutNode;
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
    fn flow_wraps_to_a_new_row_on_overflow() {
        let container = flow(XAlignment::Left);
        let a: LayoutNodeHandle = leaf_with(30, 10);
        let b: LayoutNodeHandle = leaf_with(30, 10);
        let c: LayoutNodeHandle = leaf_with(30, 10);
        container.set_children(vec![a, b, c.clone()]);
        container.set_relative_assignment(RelativeLayoutAssignment {
            region: LayoutBox::new(LayoutVector::ZERO, LayoutVector::new(65, 100)),
            baseline_y: 0,
        });
        // a and b fit on row 0 (30+30=60 <= 65); c overflows to row 1.
        let c_leaf = c;
        assert_eq!(c_leaf.assignment().unwrap().region.corner.y(), 10);
    }

    #[test]
    fn vertical_flow_starts_a_new_column_past_the_average_height() {
        let container = vertical_flow();
        let a: LayoutNodeHandle = leaf_with(10, 40);
        let b: LayoutNodeHandle = leaf_with(10, 40);
        container.set_children(vec![a, b.clone()]);
        container.set_relative_assignment(RelativeLayoutAssignment {
            region: LayoutBox::new(LayoutVector::ZERO, LayoutVector::new(30, 40)),
            baseline_y: 0,
        });
        assert_eq!(b.assignment().unwrap().region.corner.x(), 10);
    }
}
