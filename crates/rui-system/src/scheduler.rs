//! Ready/scheduled callback queues. "Ready" callbacks run the next time the
//! host calls [`Scheduler::run_ready`] (typically once per idle); scheduled
//! callbacks run once the tick count reaches their trigger.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::collections::VecDeque;

type Callback = Box<dyn FnOnce()>;

pub struct Scheduler {
    ready: RefCell<VecDeque<Callback>>,
    scheduled: RefCell<BTreeMap<u64, Vec<Callback>>>,
}

impl Scheduler {
    /// `scheduled_capacity_hint` has no `BTreeMap::with_capacity` to feed —
    /// it's accepted for symmetry with the ready queue and so a config's
    /// two capacity hints map onto the same constructor uniformly.
    pub fn new(ready_capacity_hint: usize, scheduled_capacity_hint: usize) -> Self {
        let _ = scheduled_capacity_hint;
        Self {
            ready: RefCell::new(VecDeque::with_capacity(ready_capacity_hint)),
            scheduled: RefCell::new(BTreeMap::new()),
        }
    }

    pub fn schedule_ready(&self, callback: impl FnOnce() + 'static) {
        self.ready.borrow_mut().push_back(Box::new(callback));
    }

    pub fn schedule_at(&self, trigger_tick: u64, callback: impl FnOnce() + 'static) {
        self.scheduled
            .borrow_mut()
            .entry(trigger_tick)
            .or_default()
            .push(Box::new(callback));
    }

    /// Run every ready callback queued so far. Callbacks queued by a
    /// callback running during this call are not run until the next pass.
    pub fn run_ready(&self) {
        let drained: Vec<Callback> = self.ready.borrow_mut().drain(..).collect();
        for callback in drained {
            callback();
        }
    }

    /// Run every scheduled callback whose trigger tick is `<= now`.
    pub fn run_due(&self, now: u64) {
        let due: Vec<Callback> = {
            let mut scheduled = self.scheduled.borrow_mut();
            let still_pending = scheduled.split_off(&(now + 1));
            let due_map = std::mem::replace(&mut *scheduled, still_pending);
            due_map.into_values().flatten().collect()
        };
        for callback in due {
            callback();
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.ready.borrow().is_empty() || !self.scheduled.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn ready_callbacks_run_once_and_in_order() {
        let scheduler = Scheduler::new(4, 4);
        let log = Rc::new(RefCell::new(Vec::new()));
        for i in 0..3 {
            let log = log.clone();
            scheduler.schedule_ready(move || log.borrow_mut().push(i));
        }
        scheduler.run_ready();
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
        scheduler.run_ready();
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn scheduled_callbacks_fire_once_their_tick_arrives() {
        let scheduler = Scheduler::new(4, 4);
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        scheduler.schedule_at(10, move || flag.set(true));

        scheduler.run_due(5);
        assert!(!fired.get());

        scheduler.run_due(10);
        assert!(fired.get());
    }

    #[test]
    fn run_due_leaves_later_triggers_pending() {
        let scheduler = Scheduler::new(4, 4);
        let order = Rc::new(RefCell::new(Vec::new()));
        let (a, b) = (order.clone(), order.clone());
        scheduler.schedule_at(5, move || a.borrow_mut().push("5"));
        scheduler.schedule_at(20, move || b.borrow_mut().push("20"));

        scheduler.run_due(10);
        assert_eq!(*order.borrow(), vec!["5"]);
        assert!(scheduler.has_pending());

        scheduler.run_due(20);
        assert_eq!(*order.borrow(), vec!["5", "20"]);
        assert!(!scheduler.has_pending());
    }
}
