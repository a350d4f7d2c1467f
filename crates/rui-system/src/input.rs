//! Input state owned by the system: where the mouse is, what's focused,
//! hot, or captured, and whether the window has keyboard focus at all.

use std::collections::HashSet;

use rui_id::CapturedId;
use rui_event::{MouseButton, Point};

use crate::interfaces::CursorKind;

#[derive(Debug, Clone)]
pub struct InputState {
    pub mouse_position: Point,
    pub mouse_buttons: HashSet<MouseButton>,
    pub focused: Option<CapturedId>,
    pub hot: Option<CapturedId>,
    pub captured: Option<CapturedId>,
    pub keyboard_interaction: bool,
    pub window_has_focus: bool,
    pub cursor: CursorKind,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            mouse_position: Point::new(0.0, 0.0),
            mouse_buttons: HashSet::new(),
            focused: None,
            hot: None,
            captured: None,
            keyboard_interaction: false,
            window_has_focus: true,
            cursor: CursorKind::Default,
        }
    }
}
