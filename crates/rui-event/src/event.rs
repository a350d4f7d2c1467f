//! The event categories a traversal can be parameterized by.

use crate::focus::FocusQueryKind;
use crate::key::KeyInput;
use crate::mouse::{MouseButton, Point};
use crate::routing::RoutingPath;

#[derive(Debug, Clone)]
pub enum Event {
    /// Constructs or mutates the data graph. The only category for which
    /// [`Event::is_refresh_pass`] is `true`.
    Refresh,
    /// Read-only pass that draws the current layout.
    Render,
    /// Read-only pass locating the widget under a point.
    MouseHitTest { point: Point },
    /// Mouse gained or lost over the hot element.
    MouseNotify { gained: bool },
    MousePress { button: MouseButton, point: Point },
    MouseRelease { button: MouseButton, point: Point },
    MouseMotion { point: Point },
    MouseWheel { delta: Point },
    FocusedKeyPress(KeyInput),
    FocusedKeyRelease(KeyInput),
    BackgroundKeyPress(KeyInput),
    TextInput(String),
    Timer,
    /// Region-targeted request to scroll a widget into view.
    MakeWidgetVisible(RoutingPath),
    FocusQuery(FocusQueryKind),
}

impl Event {
    /// Does this category construct or mutate the data graph? Every other
    /// category runs a read-only traversal over the existing graph.
    pub fn is_refresh_pass(&self) -> bool {
        matches!(self, Event::Refresh)
    }

    /// Does this category carry a natural routing path (so delivery should
    /// be targeted rather than broadcast to the whole tree)? Targeted
    /// delivery itself is supplied separately by the caller building the
    /// [`crate::routing::Delivery`] for the dispatch, since the same event
    /// category can be delivered either way (e.g. a key press targeted at
    /// the focused widget vs. a background key press).
    pub fn default_is_background(&self) -> bool {
        matches!(
            self,
            Event::Refresh
                | Event::Render
                | Event::MouseHitTest { .. }
                | Event::BackgroundKeyPress(_)
                | Event::Timer
                | Event::FocusQuery(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_refresh_is_a_refresh_pass() {
        assert!(Event::Refresh.is_refresh_pass());
        assert!(!Event::Render.is_refresh_pass());
        assert!(!Event::Timer.is_refresh_pass());
    }
}
