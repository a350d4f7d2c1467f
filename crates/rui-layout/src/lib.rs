//! Layout requirement folding and assignment resolution: the quantities,
//! units, and per-kind containers that turn a tree of widgets' size
//! requirements into concrete on-screen regions. This crate has no notion
//! of identity, data graphs, or traversal scopes — it's handed a tree of
//! [`LayoutNode`]s each refresh pass and resolves it.

mod cacher;
pub mod containers;
mod flags;
mod geometry;
mod leaf;
mod node;
mod requirements;
mod spec;
mod units;

pub use cacher::ContentChangeCounter;
pub use flags::{LayoutFlags, XAlignment, YAlignment};
pub use geometry::{
    add_border, as_layout_border, as_layout_size, as_layout_vector, remove_border, BoxBorderWidth, LayoutBox,
    LayoutScalar, LayoutVector,
};
pub use leaf::{
    assign_identical_child_regions, compute_total_height, fold_horizontal_child_requirements,
    fold_vertical_child_requirements, get_max_child_width, LayoutLeaf, LeafRequirements,
};
pub use node::{notify_parent, LayoutNode, LayoutNodeHandle, LayoutNodeWeak};
pub use requirements::{
    fold_in_layout_requirements, fold_in_requirements, resolve_assigned_width, resolve_relative_assignment,
    resolve_requirements, CalculatedLayoutRequirements, LayoutRequirements, RelativeLayoutAssignment,
};
pub use spec::{
    add_default_padding, add_default_size, add_default_x_alignment, add_default_y_alignment, resolve_layout_spec,
    Layout, ResolvedLayoutSpec,
};
pub use units::{
    resolve_absolute_length, resolve_absolute_size, resolve_box_border_width, resolve_relative_length,
    AbsoluteLength, AbsoluteSize, LengthUnit, Ppi, RelativeLength, StyleInfo,
};
