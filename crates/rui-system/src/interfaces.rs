//! Host-supplied callback surfaces. The system never touches a window,
//! clipboard, or OS cursor directly — it calls through one of these three
//! traits, each covering exactly the host responsibility its name says.

/// Mouse cursor shapes the system can ask the host's window to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorKind {
    None,
    Default,
    Crosshair,
    Wait,
    Text,
    NotAllowed,
    Pointer,
    EwResize,
    NsResize,
    NeswResize,
    NwseResize,
    Move,
    ZoomIn,
}

/// Asks the host to arrange another traversal (e.g. to continue an
/// in-flight smoothed animation) and reports the host's monotonic clock.
pub trait ExternalInterface {
    fn schedule_animation_refresh(&self);
    fn get_tick_count(&self) -> u64;
}

/// System clipboard access. Failure is reported as `None`/`Err`, never a
/// panic — clipboard unavailability is routine, not a programmer error.
pub trait OsInterface {
    fn get_clipboard_text(&self) -> Option<String>;
    fn set_clipboard_text(&self, text: &str) -> anyhow::Result<()>;
}

/// The one piece of the host window the system asks to change directly.
pub trait WindowInterface {
    fn set_mouse_cursor(&self, kind: CursorKind);
}

/// An external interface that never requests a redraw and reports a
/// stuck clock; useful for tests that drive ticks manually.
pub struct NullExternalInterface;

impl ExternalInterface for NullExternalInterface {
    fn schedule_animation_refresh(&self) {}
    fn get_tick_count(&self) -> u64 {
        0
    }
}

/// An OS interface with no clipboard backing store.
pub struct NullOsInterface;

impl OsInterface for NullOsInterface {
    fn get_clipboard_text(&self) -> Option<String> {
        None
    }
    fn set_clipboard_text(&self, _text: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

/// A window interface that discards cursor-change requests.
pub struct NullWindowInterface;

impl WindowInterface for NullWindowInterface {
    fn set_mouse_cursor(&self, _kind: CursorKind) {}
}
