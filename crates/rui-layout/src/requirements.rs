//! Requirement folding and assignment resolution — the math shared by every
//! container and leaf, independent of any particular container's layout
//! policy.

use crate::flags::{XAlignment, YAlignment};
use crate::geometry::{LayoutBox, LayoutScalar, LayoutVector};
use crate::spec::ResolvedLayoutSpec;

/// What a node requires, as advertised to its parent: `size ≥ ascent +
/// descent` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutRequirements {
    pub size: LayoutScalar,
    pub ascent: LayoutScalar,
    pub descent: LayoutScalar,
    pub growth_factor: i32,
}

/// The raw measurement a container's logic computes by folding its
/// children's requirements together, before padding/alignment are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalculatedLayoutRequirements {
    pub size: LayoutScalar,
    pub ascent: LayoutScalar,
    pub descent: LayoutScalar,
}

impl CalculatedLayoutRequirements {
    pub fn new(size: LayoutScalar, ascent: LayoutScalar, descent: LayoutScalar) -> Self {
        Self { size, ascent, descent }
    }
}

/// Widen `current` to also cover `additional`.
pub fn fold_in_requirements(current: &mut CalculatedLayoutRequirements, additional: LayoutRequirements) {
    current.ascent = current.ascent.max(additional.ascent);
    current.descent = current.descent.max(additional.descent);
    current.size = current.size.max(additional.size).max(current.ascent + current.descent);
}

/// The same fold, expressed directly over two [`LayoutRequirements`] (used
/// when folding sibling column requirements together rather than folding
/// children into a running calculation).
pub fn fold_in_layout_requirements(current: &mut LayoutRequirements, additional: &LayoutRequirements) {
    current.ascent = current.ascent.max(additional.ascent);
    current.descent = current.descent.max(additional.descent);
    current.size = current.size.max(additional.size).max(current.ascent + current.descent);
}

/// Combine a raw calculation with the spec's padding to produce the
/// requirements actually advertised to the parent.
pub fn resolve_requirements(
    spec: &ResolvedLayoutSpec,
    axis: usize,
    calculated: CalculatedLayoutRequirements,
) -> LayoutRequirements {
    let padding = spec.padding_size[axis];
    LayoutRequirements {
        size: calculated.size.max(calculated.ascent + calculated.descent).max(spec.size[axis])
            + padding * 2,
        ascent: calculated.ascent + padding,
        descent: calculated.descent + padding,
        growth_factor: spec.growth_factor,
    }
}

/// The region and baseline a node is assigned within its parent, both
/// relative to the parent's own corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelativeLayoutAssignment {
    pub region: LayoutBox,
    pub baseline_y: LayoutScalar,
}

fn resolve_x_axis(
    alignment: Option<XAlignment>,
    assigned_size: LayoutScalar,
    required_size: LayoutScalar,
) -> (LayoutScalar, LayoutScalar) {
    match alignment {
        Some(XAlignment::Center) => ((assigned_size - required_size) / 2, required_size),
        None | Some(XAlignment::Left) => (0, required_size),
        Some(XAlignment::Right) => (assigned_size - required_size, required_size),
        Some(XAlignment::Fill) | Some(XAlignment::Grow) => (0, assigned_size),
        Some(XAlignment::Baseline) => (0, required_size),
    }
}

fn resolve_y_axis(
    alignment: Option<YAlignment>,
    assigned_size: LayoutScalar,
    baseline: LayoutScalar,
    required_size: LayoutScalar,
    ascent: LayoutScalar,
) -> (LayoutScalar, LayoutScalar) {
    match alignment {
        Some(YAlignment::Center) => ((assigned_size - required_size) / 2, required_size),
        None | Some(YAlignment::Top) => (0, required_size),
        Some(YAlignment::Bottom) => (assigned_size - required_size, required_size),
        Some(YAlignment::Fill) | Some(YAlignment::Grow) => (0, assigned_size),
        Some(YAlignment::Baseline) => (baseline - ascent, required_size),
    }
}

/// A node may be assigned more width than it requires; resolve how much of
/// that width the node should actually occupy, net of its own padding.
pub fn resolve_assigned_width(
    spec: &ResolvedLayoutSpec,
    assigned_width: LayoutScalar,
    horizontal_requirements: LayoutRequirements,
) -> LayoutScalar {
    let (_, size) = resolve_x_axis(spec.flags.x_alignment, assigned_width, horizontal_requirements.size);
    size - spec.padding_size[0] * 2
}

/// Resolve the final region+baseline a node occupies, honoring its
/// alignment, out of the region its parent assigned it.
pub fn resolve_relative_assignment(
    spec: &ResolvedLayoutSpec,
    assignment: RelativeLayoutAssignment,
    horizontal_requirements: LayoutRequirements,
    vertical_requirements: LayoutRequirements,
) -> RelativeLayoutAssignment {
    let (x_offset, x_size) =
        resolve_x_axis(spec.flags.x_alignment, assignment.region.size.x(), horizontal_requirements.size);
    let (y_offset, y_size) = resolve_y_axis(
        spec.flags.y_alignment,
        assignment.region.size.y(),
        assignment.baseline_y,
        vertical_requirements.size,
        vertical_requirements.ascent,
    );
    RelativeLayoutAssignment {
        region: LayoutBox::new(
            assignment.region.corner + LayoutVector::new(x_offset, y_offset) + spec.padding_size,
            LayoutVector::new(x_size, y_size) - spec.padding_size * 2,
        ),
        baseline_y: vertical_requirements.ascent - spec.padding_size.y(),
    }
}
