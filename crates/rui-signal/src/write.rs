//! The validation error channel for duplex signals.

use crate::core::Signal;

/// Write `v` through `s`. If the signal's own validation rejects the write
/// (via [`Signal::invalidate`] returning `false`), the error is returned to
/// the caller; otherwise it's absorbed and `s.is_invalidated()` reports
/// `true` until the signal chooses to clear that state.
pub fn write_signal<T, S, E>(s: &S, v: T, validate: impl FnOnce(&T) -> Result<(), E>) -> Result<(), E>
where
    S: Signal<T>,
    E: std::error::Error + 'static,
{
    match validate(&v) {
        Ok(()) => {
            s.write(v);
            Ok(())
        }
        Err(err) => {
            if s.invalidate(&err) {
                Ok(())
            } else {
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::direct;
    use std::cell::RefCell;
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("value must be non-negative")]
    struct NegativeError;

    #[test]
    fn validation_failure_is_propagated_when_signal_does_not_absorb_it() {
        let cell = RefCell::new(0i32);
        let s = direct(&cell);
        let result = write_signal(&s, -1, |v| {
            if *v < 0 {
                Err(NegativeError)
            } else {
                Ok(())
            }
        });
        assert!(result.is_err());
        assert_eq!(*cell.borrow(), 0);
    }

    #[test]
    fn successful_validation_writes_through() {
        let cell = RefCell::new(0i32);
        let s = direct(&cell);
        let result = write_signal(&s, 5, |_| Ok::<(), NegativeError>(()));
        assert!(result.is_ok());
        assert_eq!(*cell.borrow(), 5);
    }
}
