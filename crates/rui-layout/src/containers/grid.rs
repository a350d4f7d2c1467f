//! Grids: rows that share column widths, so their children line up.
//!
//! A grid row registers itself with its grid's row list every refresh pass
//! (the list is rebuilt from scratch, each row prepending itself — order
//! doesn't matter). When any row's content changes, the whole column
//! layout may be affected, so the change is broadcast to every sibling row
//! in addition to the normal parent-notification path.
//!
//! Nonuniform and uniform grids share this machinery; they differ only in
//! how column requirements are stored and folded ([`GridUniformity`]) and,
//! for vertical requirements, in whether every row shares one grid-wide
//! cache (uniform, since every row's columns are the same width) or each
//! computes its own (nonuniform).

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::cacher::{
    cache_horizontal_layout_requirements, cache_relative_assignment, cache_vertical_layout_requirements,
    update_layout_cacher, ContentChangeCounter, LayoutCacher,
};
use crate::flags::LayoutFlags;
use crate::geometry::{LayoutBox, LayoutScalar, LayoutVector};
use crate::node::{notify_parent, LayoutNode, LayoutNodeHandle, LayoutNodeWeak};
use crate::requirements::{
    fold_in_layout_requirements, resolve_relative_assignment, resolve_requirements, CalculatedLayoutRequirements,
    LayoutRequirements, RelativeLayoutAssignment,
};
use crate::spec::Layout;
use crate::units::{Ppi, StyleInfo};

/// How a grid stores and folds its columns' requirements together.
/// Nonuniform grids track each column independently; uniform grids fold
/// every column into one shared requirement (every column gets the same
/// width).
pub trait GridUniformity: Sized + 'static {
    type Columns: Clone + Default;

    fn column_count(columns: &Self::Columns) -> usize;
    fn clear(columns: &mut Self::Columns);
    fn add(columns: &mut Self::Columns, addition: LayoutRequirements);
    fn fold(target: &mut Self::Columns, other: &Self::Columns);
    fn requirements_at(columns: &Self::Columns, index: usize) -> LayoutRequirements;

    /// A row's vertical requirements, given the column widths already
    /// resolved for `assigned_width`. Uniform grids fold every row's
    /// children together (since they all share the same columns) and cache
    /// the result per grid; nonuniform grids only need their own children.
    fn row_vertical_requirements(
        grid: &GridData<Self>,
        row: &GridRow<Self>,
        assigned_width: LayoutScalar,
        column_widths: &[LayoutScalar],
    ) -> CalculatedLayoutRequirements;
}

fn fold_row_children(children: &[LayoutNodeHandle], column_widths: &[LayoutScalar]) -> CalculatedLayoutRequirements {
    let mut requirements = CalculatedLayoutRequirements::default();
    for (child, width) in children.iter().zip(column_widths) {
        crate::requirements::fold_in_requirements(&mut requirements, child.vertical_requirements(*width));
    }
    requirements
}

pub struct NonUniform;

impl GridUniformity for NonUniform {
    type Columns = Vec<LayoutRequirements>;

    fn column_count(columns: &Self::Columns) -> usize {
        columns.len()
    }

    fn clear(columns: &mut Self::Columns) {
        columns.clear();
    }

    fn add(columns: &mut Self::Columns, addition: LayoutRequirements) {
        columns.push(addition);
    }

    fn fold(target: &mut Self::Columns, other: &Self::Columns) {
        if target.len() < other.len() {
            target.resize(other.len(), LayoutRequirements::default());
        }
        for (t, o) in target.iter_mut().zip(other.iter()) {
            fold_in_layout_requirements(t, o);
            if t.growth_factor < o.growth_factor {
                t.growth_factor = o.growth_factor;
            }
        }
    }

    fn requirements_at(columns: &Self::Columns, index: usize) -> LayoutRequirements {
        columns[index]
    }

    fn row_vertical_requirements(
        _grid: &GridData<Self>,
        row: &GridRow<Self>,
        _assigned_width: LayoutScalar,
        column_widths: &[LayoutScalar],
    ) -> CalculatedLayoutRequirements {
        fold_row_children(&row.children.borrow(), column_widths)
    }
}

#[derive(Clone, Default)]
pub struct UniformColumns {
    n_columns: usize,
    requirements: LayoutRequirements,
}

pub struct Uniform;

impl GridUniformity for Uniform {
    type Columns = UniformColumns;

    fn column_count(columns: &Self::Columns) -> usize {
        columns.n_columns
    }

    fn clear(columns: &mut Self::Columns) {
        columns.n_columns = 0;
        columns.requirements = LayoutRequirements { size: 0, ascent: 0, descent: 0, growth_factor: 1 };
    }

    fn add(columns: &mut Self::Columns, addition: LayoutRequirements) {
        columns.n_columns += 1;
        fold_in_layout_requirements(&mut columns.requirements, &addition);
    }

    fn fold(target: &mut Self::Columns, other: &Self::Columns) {
        if target.n_columns < other.n_columns {
            target.n_columns = other.n_columns;
        }
        fold_in_layout_requirements(&mut target.requirements, &other.requirements);
    }

    fn requirements_at(columns: &Self::Columns, _index: usize) -> LayoutRequirements {
        columns.requirements
    }

    fn row_vertical_requirements(
        grid: &GridData<Self>,
        _row: &GridRow<Self>,
        assigned_width: LayoutScalar,
        column_widths: &[LayoutScalar],
    ) -> CalculatedLayoutRequirements {
        let mut cache = grid.vertical_cache.borrow_mut();
        if cache.map(|(width, _)| width) != Some(assigned_width) {
            let mut requirements = CalculatedLayoutRequirements::default();
            for row in grid.rows.borrow().iter().filter_map(Weak::upgrade) {
                crate::requirements::fold_in_requirements(
                    &mut requirements,
                    fold_row_children(&row.children.borrow(), column_widths).into(),
                );
            }
            *cache = Some((assigned_width, requirements));
        }
        cache.unwrap().1
    }
}

impl From<CalculatedLayoutRequirements> for LayoutRequirements {
    fn from(c: CalculatedLayoutRequirements) -> Self {
        LayoutRequirements { size: c.size, ascent: c.ascent, descent: c.descent, growth_factor: 0 }
    }
}

/// Shared state for a grid: its row list and the column requirements/
/// assignments folded across them.
pub struct GridData<U: GridUniformity> {
    rows: RefCell<Vec<Weak<GridRow<U>>>>,
    column_spacing: Cell<LayoutScalar>,
    requirements: RefCell<U::Columns>,
    requirements_valid: Cell<bool>,
    assignments: RefCell<Vec<LayoutScalar>>,
    assignments_valid: Cell<bool>,
    vertical_cache: RefCell<Option<(LayoutScalar, CalculatedLayoutRequirements)>>,
}

impl<U: GridUniformity> GridData<U> {
    pub fn new(column_spacing: LayoutScalar) -> Rc<Self> {
        Rc::new(Self {
            rows: RefCell::new(Vec::new()),
            column_spacing: Cell::new(column_spacing),
            requirements: RefCell::new(U::Columns::default()),
            requirements_valid: Cell::new(false),
            assignments: RefCell::new(Vec::new()),
            assignments_valid: Cell::new(false),
            vertical_cache: RefCell::new(None),
        })
    }

    pub fn set_column_spacing(&self, spacing: LayoutScalar) {
        if self.column_spacing.get() != spacing {
            self.column_spacing.set(spacing);
            self.requirements_valid.set(false);
            self.assignments_valid.set(false);
        }
    }

    /// Rebuild the row list from scratch; called once at the start of each
    /// refresh pass, before any row re-registers itself.
    pub fn begin_refresh(&self) {
        self.rows.borrow_mut().clear();
    }

    fn register_row(&self, row: &Rc<GridRow<U>>) {
        self.rows.borrow_mut().push(Rc::downgrade(row));
    }

    fn update_column_requirements(&self) {
        if self.requirements_valid.get() {
            return;
        }
        let mut requirements = self.requirements.borrow_mut();
        U::clear(&mut requirements);
        for row in self.rows.borrow().iter().filter_map(Weak::upgrade) {
            if !row.requirements_valid.get() {
                let mut row_requirements = row.requirements.borrow_mut();
                U::clear(&mut row_requirements);
                for child in row.children.borrow().iter() {
                    U::add(&mut row_requirements, child.horizontal_requirements());
                }
                row.requirements_valid.set(true);
            }
            U::fold(&mut requirements, &row.requirements.borrow());
        }
        self.requirements_valid.set(true);
    }

    fn required_width(&self) -> LayoutScalar {
        let requirements = self.requirements.borrow();
        let n_columns = U::column_count(&requirements);
        let mut width: LayoutScalar = (0..n_columns).map(|i| U::requirements_at(&requirements, i).size).sum();
        if n_columns > 0 {
            width += self.column_spacing.get() * (n_columns as LayoutScalar - 1);
        }
        width
    }

    fn total_growth(&self) -> f32 {
        let requirements = self.requirements.borrow();
        let n_columns = U::column_count(&requirements);
        (0..n_columns).map(|i| U::requirements_at(&requirements, i).growth_factor as f32).sum()
    }

    fn calculate_column_assignments(&self, assigned_width: LayoutScalar) -> std::cell::Ref<'_, Vec<LayoutScalar>> {
        if !self.assignments_valid.get() {
            self.update_column_requirements();
            let n_columns = U::column_count(&self.requirements.borrow());
            let required_width = self.required_width();
            let mut total_growth = self.total_growth();
            let mut extra_width = assigned_width - required_width;
            let requirements = self.requirements.borrow();
            let mut assignments = Vec::with_capacity(n_columns);
            for i in 0..n_columns {
                let column = U::requirements_at(&requirements, i);
                let mut width = column.size;
                if total_growth != 0.0 {
                    let extra = (column.growth_factor as f32 / total_growth * extra_width as f32).round() as LayoutScalar;
                    extra_width -= extra;
                    total_growth -= column.growth_factor as f32;
                    width += extra;
                }
                assignments.push(width);
            }
            drop(requirements);
            *self.assignments.borrow_mut() = assignments;
            self.assignments_valid.set(true);
        }
        self.assignments.borrow()
    }
}

pub struct GridRow<U: GridUniformity> {
    children: RefCell<Vec<LayoutNodeHandle>>,
    parent: RefCell<Option<LayoutNodeWeak>>,
    cacher: RefCell<LayoutCacher>,
    content_change: Cell<ContentChangeCounter>,
    last_assignment: RefCell<Option<RelativeLayoutAssignment>>,
    requirements: RefCell<U::Columns>,
    requirements_valid: Cell<bool>,
    grid: Rc<GridData<U>>,
}

impl<U: GridUniformity> GridRow<U> {
    pub fn new(grid: Rc<GridData<U>>) -> Rc<Self> {
        let row = Rc::new(Self {
            children: RefCell::new(Vec::new()),
            parent: RefCell::new(None),
            cacher: RefCell::new(LayoutCacher::default()),
            content_change: Cell::new(0),
            last_assignment: RefCell::new(None),
            requirements: RefCell::new(U::Columns::default()),
            requirements_valid: Cell::new(false),
            grid,
        });
        row.grid.register_row(&row);
        row
    }

    pub fn set_parent(&self, parent: LayoutNodeWeak) {
        *self.parent.borrow_mut() = Some(parent);
    }

    pub fn set_children(&self, children: Vec<LayoutNodeHandle>) {
        *self.children.borrow_mut() = children;
    }

    pub fn refresh_spec(&self, ppi: Ppi, style_info: &StyleInfo, layout_spec: Layout, default_flags: LayoutFlags) {
        let mut cacher = self.cacher.borrow_mut();
        if update_layout_cacher(&mut cacher, ppi, style_info, layout_spec, default_flags) {
            drop(cacher);
            self.record_self_change();
        }
    }

    fn record_self_change(&self) {
        if !self.cacher.borrow().is_fully_invalid() {
            self.cacher.borrow_mut().invalidate();
            self.requirements_valid.set(false);
            self.content_change.set(self.content_change.get() + 1);
            notify_parent(&self.parent.borrow());
        }
    }
}

impl<U: GridUniformity> LayoutNode for GridRow<U> {
    fn horizontal_requirements(&self) -> LayoutRequirements {
        let counter = self.content_change.get();
        let mut cacher = self.cacher.borrow_mut();
        let calculated = cache_horizontal_layout_requirements(&mut cacher, counter, || {
            self.grid.update_column_requirements();
            CalculatedLayoutRequirements::new(self.grid.required_width(), 0, 0)
        });
        resolve_requirements(&cacher.resolved_spec, 0, calculated)
    }

    fn vertical_requirements(&self, assigned_width: LayoutScalar) -> LayoutRequirements {
        let counter = self.content_change.get();
        let mut cacher = self.cacher.borrow_mut();
        let calculated = cache_vertical_layout_requirements(&mut cacher, counter, assigned_width, || {
            let widths = self.grid.calculate_column_assignments(assigned_width).clone();
            U::row_vertical_requirements(&self.grid, self, assigned_width, &widths)
        });
        resolve_requirements(&cacher.resolved_spec, 1, calculated)
    }

    fn set_relative_assignment(&self, assignment: RelativeLayoutAssignment) {
        let horizontal = self.horizontal_requirements();
        let vertical = self.vertical_requirements(assignment.region.size.x());
        let counter = self.content_change.get();
        let mut cacher = self.cacher.borrow_mut();
        let resolved_spec = cacher.resolved_spec;
        let resolved = cache_relative_assignment(&mut cacher, counter, assignment, |assignment| {
            resolve_relative_assignment(&resolved_spec, assignment, horizontal, vertical)
        });
        drop(cacher);

        let widths = self.grid.calculate_column_assignments(resolved.region.size.x()).clone();
        let mut x = 0;
        for (child, width) in self.children.borrow().iter().zip(widths.iter()) {
            child.set_relative_assignment(RelativeLayoutAssignment {
                region: LayoutBox::new(LayoutVector::new(x, 0), LayoutVector::new(*width, resolved.region.size.y())),
                baseline_y: resolved.baseline_y,
            });
            x += *width + self.grid.column_spacing.get();
        }
        *self.last_assignment.borrow_mut() = Some(resolved);
    }

    fn assignment(&self) -> Option<RelativeLayoutAssignment> {
        *self.last_assignment.borrow()
    }

    fn record_content_change(&self) {
        if self.cacher.borrow().is_fully_invalid() {
            return;
        }
        *self.grid.vertical_cache.borrow_mut() = None;
        self.grid.assignments_valid.set(false);
        self.grid.requirements_valid.set(false);
        self.cacher.borrow_mut().invalidate();
        self.requirements_valid.set(false);
        self.content_change.set(self.content_change.get() + 1);
        notify_parent(&self.parent.borrow());
        for row in self.grid.rows.borrow().iter().filter_map(Weak::upgrade) {
            row.record_self_change();
        }
    }
}

pub type GridRowHandle = GridRow<NonUniform>;
pub type UniformGridRowHandle = GridRow<Uniform>;

/// A grid is an ordinary column: its rows (and any other children
/// interspersed among them) are simply stacked vertically. Construct the
/// outer container with [`crate::containers::linear::column`] and add
/// [`GridRow::new`] rows (nonuniform or uniform) to it, sharing one
/// [`GridData`] between them.
pub fn grid_data_nonuniform(column_spacing: LayoutScalar) -> Rc<GridData<NonUniform>> {
    GridData::new(column_spacing)
}

pub fn grid_data_uniform(column_spacing: LayoutScalar) -> Rc<GridData<Uniform>> {
    GridData::new(column_spacing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::{LayoutLeaf, LeafRequirements};
    use crate::spec::Layout;
    use crate::units::StyleInfo;

    fn leaf_with(width: LayoutScalar, height: LayoutScalar) -> Rc<LayoutLeaf> {
        let leaf = Rc::new(LayoutLeaf::new());
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
    fn columns_line_up_across_nonuniform_rows() {
        let grid = grid_data_nonuniform(2);
        let row_a = GridRow::new(grid.clone());
        let row_b = GridRow::new(grid.clone());

        let a0: LayoutNodeHandle = leaf_with(10, 5);
        let a1: LayoutNodeHandle = leaf_with(10, 5);
        row_a.set_children(vec![a0, a1]);

        let b0: LayoutNodeHandle = leaf_with(30, 5);
        let b1: LayoutNodeHandle = leaf_with(5, 5);
        row_b.set_children(vec![b0, b1.clone()]);

        // Row a's first column must widen to match row b's wider first
        // column (30), since they share column requirements.
        assert_eq!(row_a.horizontal_requirements().size, 30 + 5 + grid.column_spacing.get());
        let _ = b1;
    }

    #[test]
    fn uniform_grid_shares_one_column_width_for_every_column() {
        let grid = grid_data_uniform(0);
        let row = GridRow::new(grid.clone());
        let a: LayoutNodeHandle = leaf_with(10, 5);
        let b: LayoutNodeHandle = leaf_with(40, 5);
        row.set_children(vec![a, b]);
        row.set_relative_assignment(RelativeLayoutAssignment {
            region: LayoutBox::new(LayoutVector::ZERO, LayoutVector::new(80, 5)),
            baseline_y: 0,
        });
        let widths = grid.calculate_column_assignments(80);
        assert_eq!(widths[0], widths[1]);
    }
}
