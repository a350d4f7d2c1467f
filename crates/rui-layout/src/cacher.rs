//! Per-node memoization keyed on a content-change counter.
//!
//! Every container and leaf owns a [`LayoutCacher`]. Its fields record the
//! counter value current as of the last horizontal query, vertical query
//! (plus the assigned width it was computed for), and relative-assignment
//! resolution (plus the assignment it was computed for) — so a query is
//! skipped and the cached result reused whenever nothing that could affect
//! it has changed since.

use crate::flags::LayoutFlags;
use crate::geometry::LayoutScalar;
use crate::requirements::{LayoutRequirements, RelativeLayoutAssignment};
use crate::spec::{resolve_layout_spec, Layout, ResolvedLayoutSpec};
use crate::units::{Ppi, StyleInfo};

pub type ContentChangeCounter = u64;

#[derive(Debug, Clone, Default)]
pub struct LayoutCacher {
    pub resolved_spec: ResolvedLayoutSpec,

    last_horizontal_query: ContentChangeCounter,
    horizontal_requirements: LayoutRequirements,

    last_vertical_query: ContentChangeCounter,
    assigned_width: LayoutScalar,
    vertical_requirements: LayoutRequirements,

    last_relative_assignment: ContentChangeCounter,
    relative_assignment: RelativeLayoutAssignment,
    resolved_relative_assignment: RelativeLayoutAssignment,

    /// Set once a change has been recorded and not yet observed by any of
    /// the three caches above; cleared the next time any of them is
    /// refreshed. Lets [`LayoutCacher::record_content_change`] no-op on
    /// repeated invalidation within the same pass.
    fully_invalid: bool,
}

impl LayoutCacher {
    pub fn is_fully_invalid(&self) -> bool {
        self.fully_invalid
    }

    /// Mark every cached field stale. Idempotent: a cacher that's already
    /// fully invalid records no further change (the caller uses this to
    /// decide whether to keep propagating the notification upward).
    pub fn invalidate(&mut self) {
        self.fully_invalid = true;
    }

    fn clear_invalid(&mut self) {
        self.fully_invalid = false;
    }
}

/// Recompute the resolved spec if the raw spec (or the style/DPI context)
/// changed since last time, returning whether it did.
pub fn update_layout_cacher(
    cacher: &mut LayoutCacher,
    ppi: Ppi,
    style_info: &StyleInfo,
    layout_spec: Layout,
    default_flags: LayoutFlags,
) -> bool {
    let resolved = resolve_layout_spec(ppi, style_info, layout_spec, default_flags);
    if resolved != cacher.resolved_spec {
        cacher.resolved_spec = resolved;
        true
    } else {
        false
    }
}

/// Recompute horizontal requirements via `f` only if the content-change
/// counter has moved since the last query; otherwise return the cached
/// value.
pub fn cache_horizontal_layout_requirements(
    cacher: &mut LayoutCacher,
    current_counter: ContentChangeCounter,
    f: impl FnOnce() -> LayoutRequirements,
) -> LayoutRequirements {
    if cacher.last_horizontal_query != current_counter {
        cacher.horizontal_requirements = f();
        cacher.last_horizontal_query = current_counter;
        cacher.clear_invalid();
    }
    cacher.horizontal_requirements
}

/// As [`cache_horizontal_layout_requirements`], but also keyed on the
/// assigned width (a container's vertical requirements generally depend on
/// how much horizontal space its children were given).
pub fn cache_vertical_layout_requirements(
    cacher: &mut LayoutCacher,
    current_counter: ContentChangeCounter,
    assigned_width: LayoutScalar,
    f: impl FnOnce() -> LayoutRequirements,
) -> LayoutRequirements {
    if cacher.last_vertical_query != current_counter || cacher.assigned_width != assigned_width {
        cacher.vertical_requirements = f();
        cacher.last_vertical_query = current_counter;
        cacher.assigned_width = assigned_width;
        cacher.clear_invalid();
    }
    cacher.vertical_requirements
}

/// As the two above, but for `set_relative_assignment`: recomputes only if
/// the counter moved or the assignment passed in differs from last time.
pub fn cache_relative_assignment(
    cacher: &mut LayoutCacher,
    current_counter: ContentChangeCounter,
    assignment: RelativeLayoutAssignment,
    f: impl FnOnce(RelativeLayoutAssignment) -> RelativeLayoutAssignment,
) -> RelativeLayoutAssignment {
    if cacher.last_relative_assignment != current_counter || cacher.relative_assignment != assignment {
        cacher.resolved_relative_assignment = f(assignment);
        cacher.relative_assignment = assignment;
        cacher.last_relative_assignment = current_counter;
        cacher.clear_invalid();
    }
    cacher.resolved_relative_assignment
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cached_value_is_reused_until_counter_advances() {
        let mut cacher = LayoutCacher::default();
        let mut calls = 0;
        let mut compute = |c: &mut LayoutCacher, counter| {
            cache_horizontal_layout_requirements(c, counter, || {
                calls += 1;
                LayoutRequirements { size: 10, ascent: 0, descent: 0, growth_factor: 0 }
            })
        };
        compute(&mut cacher, 1);
        compute(&mut cacher, 1);
        assert_eq!(calls, 1);
        compute(&mut cacher, 2);
        assert_eq!(calls, 2);
    }

    #[test]
    fn invalidate_is_visible_until_a_cache_refreshes() {
        let mut cacher = LayoutCacher::default();
        assert!(!cacher.is_fully_invalid());
        cacher.invalidate();
        assert!(cacher.is_fully_invalid());
        cache_horizontal_layout_requirements(&mut cacher, 1, LayoutRequirements::default);
        assert!(!cacher.is_fully_invalid());
    }
}
