//! `if`/`elif`/`else`, with three-valued (possibly-undecided) conditions.

use rui_data::{DataTraversal, ScopedDataBlock};

use crate::condition::Condition;

#[derive(Clone, Copy, PartialEq, Eq)]
enum ChainState {
    Undecided,
    Taken,
    /// A condition reported `None`: the rest of the chain, including any
    /// `else`, is skipped too.
    Indeterminate,
}

/// Builds an if/elif/.../else chain where each branch owns a distinct,
/// stable data block. Construct with [`IfChain::new`], add branches with
/// [`IfChain::branch`], optionally finish with [`IfChain::else_branch`].
///
/// ```ignore
/// IfChain::new(t)
///     .branch(c1, |t| { /* A */ })
///     .branch(c2, |t| { /* B */ })
///     .else_branch(|t| { /* C */ });
/// ```
pub struct IfChain<'t> {
    traversal: &'t mut DataTraversal,
    state: ChainState,
    /// When true, skipped branches are not cache-cleared: the
    /// "event-dependent if" variant (see [`IfChain::event_dependent`]).
    sticky: bool,
}

impl<'t> IfChain<'t> {
    pub fn new(traversal: &'t mut DataTraversal) -> Self {
        Self {
            traversal,
            state: ChainState::Undecided,
            sticky: false,
        }
    }

    /// Like `new`, but a skipped branch's cached state is never cleared —
    /// intended for branches taken intermittently (e.g. once per input
    /// event) that should keep their data between visits.
    pub fn event_dependent(traversal: &'t mut DataTraversal) -> Self {
        Self {
            traversal,
            state: ChainState::Undecided,
            sticky: true,
        }
    }

    pub fn branch(mut self, cond: impl Condition, body: impl FnOnce(&mut DataTraversal)) -> Self {
        let block = self.traversal.get_child_block();
        if self.state == ChainState::Undecided {
            match cond.poll() {
                Some(true) => {
                    self.state = ChainState::Taken;
                    let mut guard = ScopedDataBlock::new(self.traversal, block);
                    body(guard.traversal_ref());
                    return self;
                }
                Some(false) => {}
                None => {
                    tracing::trace!(
                        target: "rui_flow::if_chain",
                        "condition signal had no value yet; skipping remainder of chain including else"
                    );
                    self.state = ChainState::Indeterminate;
                }
            }
        }
        if !self.sticky {
            self.traversal.clear_inactive_block(&block);
        }
        self
    }

    pub fn else_branch(mut self, body: impl FnOnce(&mut DataTraversal)) {
        let block = self.traversal.get_child_block();
        if self.state == ChainState::Undecided {
            let mut guard = ScopedDataBlock::new(self.traversal, block);
            body(guard.traversal_ref());
            return;
        }
        if !self.sticky {
            self.traversal.clear_inactive_block(&block);
        }
    }

    /// Ends the chain without an `else` branch.
    pub fn finish(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use rui_data::{DataGraph, ScopedDataTraversal};

    fn run(graph: &DataGraph, c1: bool, c2: bool, log: &mut Vec<&'static str>) {
        let mut scope = ScopedDataTraversal::new(graph);
        let t = scope.traversal();
        IfChain::new(&mut *t)
            .branch(c1, |t| {
                let (_n, is_new) = t.get_data_node::<i32>();
                log.push(if is_new { "init A" } else { "visit A" });
            })
            .branch(c2, |t| {
                let (_n, is_new) = t.get_data_node::<i32>();
                log.push(if is_new { "init B" } else { "visit B" });
            })
            .else_branch(|t| {
                let (_n, is_new) = t.get_data_node::<i32>();
                log.push(if is_new { "init C" } else { "visit C" });
            });
        let (_n, is_new) = t.get_data_node::<i32>();
        log.push(if is_new { "init X" } else { "visit X" });
    }

    #[test]
    fn first_visit_initializes_exactly_the_taken_branch() {
        let graph = DataGraph::new();
        let mut log = Vec::new();
        run(&graph, false, true, &mut log);
        run(&graph, true, false, &mut log);
        run(&graph, true, true, &mut log);
        run(&graph, false, false, &mut log);
        assert_eq!(
            log,
            vec![
                "init B", "init X", "init A", "visit X", "visit A", "visit X", "init C", "visit X",
            ]
        );
    }

    #[test]
    fn indeterminate_condition_skips_else_too() {
        struct Unknown;
        impl Condition for Unknown {
            fn poll(&self) -> Option<bool> {
                None
            }
        }
        let graph = DataGraph::new();
        let mut scope = ScopedDataTraversal::new(&graph);
        let t = scope.traversal();
        let mut ran_else = false;
        IfChain::new(t)
            .branch(Unknown, |_| panic!("should not run"))
            .else_branch(|_| ran_else = true);
        assert!(!ran_else);
    }
}
