//! Key codes and modifiers for keyboard input events.

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const CTRL  = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const SHIFT = 0b0000_0100;
        const SUPER = 0b0000_1000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
    F(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyInput {
    pub code: KeyCode,
    pub mods: Modifiers,
}

impl KeyInput {
    pub fn new(code: KeyCode, mods: Modifiers) -> Self {
        Self { code, mods }
    }

    /// `true` for an unmodified Tab, used by the host to default-handle
    /// focus advancement without a widget having to opt in.
    pub fn is_plain_tab(&self) -> bool {
        self.code == KeyCode::Tab && self.mods.is_empty()
    }

    /// `true` for Shift+Tab, used for focus regression.
    pub fn is_shift_tab(&self) -> bool {
        self.code == KeyCode::Tab && self.mods == Modifiers::SHIFT
    }
}
