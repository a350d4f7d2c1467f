//! Bridges a `Signal<bool>` into a control-flow [`rui_flow::Condition`],
//! giving if-chains the three-valued behavior the capability layer already
//! has baked into `has_value`.

use rui_flow::Condition;

use crate::core::Signal;

/// Wraps a `Signal<bool>` so it can be used directly as an `if`/`elif`
/// condition. A local newtype is required here rather than a blanket
/// `impl<S: Signal<bool>> Condition for S`, since neither `Signal` nor
/// `Condition` being foreign to each other's crate would satisfy the
/// orphan rule for a bare generic parameter.
pub struct SignalCondition<S>(pub S);

pub fn signal_condition<S: Signal<bool>>(s: S) -> SignalCondition<S> {
    SignalCondition(s)
}

impl<S: Signal<bool>> Condition for SignalCondition<S> {
    fn poll(&self) -> Option<bool> {
        if self.0.has_value() {
            Some(*self.0.read())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{empty, value};

    #[test]
    fn signal_with_value_polls_some() {
        assert_eq!(signal_condition(value(true)).poll(), Some(true));
        assert_eq!(signal_condition(value(false)).poll(), Some(false));
    }

    #[test]
    fn signal_without_value_polls_none() {
        assert_eq!(signal_condition(empty::<bool>()).poll(), None);
    }
}
