//! Input dispatch helpers shared by the host loop.

use crate::event::Event;
use crate::focus::FocusQueryKind;
use crate::key::KeyInput;

/// Whether a dispatched event was handled by some widget along its
/// delivery path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acknowledged(pub bool);

/// An unmodified Tab or Shift+Tab on a focused key press is handled by the
/// host itself (advancing/regressing focus) rather than being delivered to
/// the focused widget, unless the widget has already consumed it.
pub fn default_tab_handling(key: &KeyInput) -> Option<FocusQueryKind> {
    if key.is_plain_tab() {
        Some(FocusQueryKind::Successor)
    } else if key.is_shift_tab() {
        Some(FocusQueryKind::Predecessor)
    } else {
        None
    }
}

/// Builds the focus-query event issued by `advance_focus`/`regress_focus`.
pub fn focus_query_event(kind: FocusQueryKind) -> Event {
    Event::FocusQuery(kind)
}
