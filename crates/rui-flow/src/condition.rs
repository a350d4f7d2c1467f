//! What an if-chain or while-loop can branch on.

/// A condition an if-chain or while-loop can test. Implemented for `bool`
/// (always decided) and, in `rui-signal`, for any readable boolean signal
/// (possibly undecided — see [`Condition::poll`]).
pub trait Condition {
    /// `Some(b)` if the condition is currently decided, `None` if no value
    /// is available yet (only possible for signal conditions).
    fn poll(&self) -> Option<bool>;
}

impl Condition for bool {
    fn poll(&self) -> Option<bool> {
        Some(*self)
    }
}

impl Condition for &bool {
    fn poll(&self) -> Option<bool> {
        Some(**self)
    }
}
