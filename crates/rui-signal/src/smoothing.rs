//! Smoothed interpolation between successive signal values, driven by a
//! monotonically increasing tick count supplied externally (this crate has
//! no dependency on the system object that owns the real clock — see
//! [`SmoothingContext`]).

use std::cell::RefCell;

use rui_id::{make_id, Id};

use crate::capability::{Capabilities, ReadCapability, WriteCapability};
use crate::core::Signal;

/// What a smoothed signal needs from its host: the current tick count, and
/// a way to ask for another tick so the animation keeps advancing while
/// it's still interpolating.
pub trait SmoothingContext {
    fn tick_count(&self) -> u64;
    fn request_tick(&self);
}

/// A cubic-Bezier timing curve plus a duration. The default approximates a
/// standard "ease" curve over 300ms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub duration_ms: u32,
    pub curve: (f64, f64, f64, f64),
}

impl Default for Transition {
    fn default() -> Self {
        Transition {
            duration_ms: 300,
            curve: (0.25, 0.1, 0.25, 1.0),
        }
    }
}

impl Transition {
    /// Evaluate the curve's eased progress at normalized time `t` in
    /// `[0, 1]`, treating `t` as the curve's x-coordinate and solving for
    /// its y via bisection (the curve is monotonic in x for any control
    /// points in `[0, 1]`, so bisection converges reliably without needing
    /// the derivative).
    fn ease(&self, t: f64) -> f64 {
        let (x1, y1, x2, y2) = self.curve;
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let bezier = |p1: f64, p2: f64, u: f64| {
            let mu = 1.0 - u;
            3.0 * mu * mu * u * p1 + 3.0 * mu * u * u * p2 + u * u * u
        };
        let (mut lo, mut hi) = (0.0f64, 1.0f64);
        for _ in 0..24 {
            let mid = (lo + hi) / 2.0;
            if bezier(x1, x2, mid) < t {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        bezier(y1, y2, (lo + hi) / 2.0)
    }
}

struct State {
    start_tick: u64,
    start_value: f64,
    target_value: f64,
    target_id: rui_id::CapturedId,
}

/// A read-only signal that interpolates from its previous observed value to
/// the source's current value over `transition`, as returned by
/// [`smooth`].
pub struct Smooth<'c, S> {
    ctx: &'c dyn SmoothingContext,
    source: S,
    transition: Transition,
    state: RefCell<Option<State>>,
    cache: RefCell<f64>,
}

pub fn smooth<'c, S: Signal<f64>>(
    ctx: &'c dyn SmoothingContext,
    source: S,
    transition: Transition,
) -> Smooth<'c, S> {
    Smooth {
        ctx,
        source,
        transition,
        state: RefCell::new(None),
        cache: RefCell::new(0.0),
    }
}

impl<'c, S: Signal<f64>> Smooth<'c, S> {
    /// Recompute the current interpolated value, updating `state` if the
    /// source's value id has changed since the last poll, and requesting
    /// another tick if the animation hasn't settled.
    fn poll(&self) -> Option<f64> {
        if !self.source.has_value() {
            return None;
        }
        let target = *self.source.read();
        let target_id = self.source.value_id().capture();
        let now = self.ctx.tick_count();
        let mut state = self.state.borrow_mut();

        let retarget = match &*state {
            None => true,
            Some(s) => !target_id.matches(&s.target_id.as_id()),
        };
        if retarget {
            let start_value = match &*state {
                Some(s) => self.interpolated_value(s, now),
                None => target,
            };
            *state = Some(State {
                start_tick: now,
                start_value,
                target_value: target,
                target_id,
            });
        }

        let s = state.as_ref().unwrap();
        let value = self.interpolated_value(s, now);
        if now < s.start_tick + self.transition.duration_ms as u64 {
            self.ctx.request_tick();
        }
        Some(value)
    }

    fn interpolated_value(&self, s: &State, now: u64) -> f64 {
        let elapsed = now.saturating_sub(s.start_tick) as f64;
        let duration = self.transition.duration_ms.max(1) as f64;
        let t = (elapsed / duration).min(1.0);
        let eased = self.transition.ease(t);
        s.start_value + (s.target_value - s.start_value) * eased
    }
}

impl<'c, S: Signal<f64>> Signal<f64> for Smooth<'c, S> {
    fn capabilities(&self) -> Capabilities {
        Capabilities::new(ReadCapability::Readable, WriteCapability::Unwritable)
    }
    fn value_id(&self) -> Id<'_> {
        match self.poll() {
            Some(v) => make_id(v.to_bits()),
            None => Id::null(),
        }
    }
    fn has_value(&self) -> bool {
        self.poll().is_some()
    }
    fn read(&self) -> &f64 {
        let value = self.poll().expect("read() called without has_value()");
        *self.cache.borrow_mut() = value;
        let ptr = self.cache.as_ptr();
        // SAFETY: see `LambdaReader::read` in `primitives.rs`.
        unsafe { &*ptr }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::value;
    use std::cell::Cell;

    struct TestCtx {
        tick: Cell<u64>,
        ticks_requested: Cell<u32>,
    }
    impl SmoothingContext for TestCtx {
        fn tick_count(&self) -> u64 {
            self.tick.get()
        }
        fn request_tick(&self) {
            self.ticks_requested.set(self.ticks_requested.get() + 1);
        }
    }

    #[test]
    fn settles_at_target_once_duration_elapses() {
        let ctx = TestCtx {
            tick: Cell::new(0),
            ticks_requested: Cell::new(0),
        };
        let transition = Transition {
            duration_ms: 100,
            ..Default::default()
        };
        let s = smooth(&ctx, value(10.0), transition);
        assert_eq!(*s.read(), 10.0);
        ctx.tick.set(100);
        assert_eq!(*s.read(), 10.0);
    }

    #[test]
    fn requests_another_tick_while_animating() {
        let ctx = TestCtx {
            tick: Cell::new(0),
            ticks_requested: Cell::new(0),
        };
        let transition = Transition {
            duration_ms: 1000,
            ..Default::default()
        };
        let s = smooth(&ctx, value(10.0), transition);
        let _ = s.read();
        ctx.tick.set(10);
        let _ = s.read();
        assert!(ctx.ticks_requested.get() > 0);
    }
}
