//! The `Signal<T>` interface.

use rui_id::Id;

use crate::capability::{capability_panic, Capabilities};

/// A value carrier with a declared read/write capability tier.
///
/// This is a single object-safe trait rather than a hierarchy of
/// capability-parametric interfaces: every signal answers [`Signal::capabilities`],
/// and the default method bodies for operations outside a signal's own tier
/// panic rather than being unreachable at compile time. Callers that branch
/// on `capabilities()` first never hit those panics; callers that don't are
/// told clearly what went wrong instead of silently doing nothing.
pub trait Signal<T> {
    fn capabilities(&self) -> Capabilities;

    /// The signal's current identity. Two reads of the same logical value
    /// (even if recomputed) must produce equal ids; a changed id signals
    /// downstream caches to recompute.
    fn value_id(&self) -> Id<'_>;

    /// Does this signal currently have a readable value?
    fn has_value(&self) -> bool {
        false
    }

    /// Borrow the current value. Only call when `has_value()` is true and
    /// `capabilities().reading >= ReadCapability::Readable`.
    fn read(&self) -> &T {
        capability_panic("read", self.capabilities())
    }

    /// Take ownership of the current value, as if by move. Only call when
    /// `capabilities().reading >= ReadCapability::Movable`.
    fn move_out(&self) -> T {
        capability_panic("move_out", self.capabilities())
    }

    /// Is a write currently accepted?
    fn ready_to_write(&self) -> bool {
        false
    }

    /// Write a new value. Only call when `ready_to_write()` is true and
    /// `capabilities().writing >= WriteCapability::Writable`.
    fn write(&self, _value: T) {
        capability_panic("write", self.capabilities())
    }

    /// Reset to the signal's notion of "no value". Only call when
    /// `capabilities().writing >= WriteCapability::Clearable`.
    fn clear(&self) {
        capability_panic("clear", self.capabilities())
    }

    /// Report a validation failure from a write attempt. Returns `true` if
    /// the signal absorbed the error (and `is_invalidated()` will report
    /// `true` until cleared); `false` if the caller should propagate it.
    fn invalidate(&self, _err: &dyn std::error::Error) -> bool {
        false
    }

    fn is_invalidated(&self) -> bool {
        false
    }
}
