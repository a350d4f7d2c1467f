//! Programmer-error surface for the data graph.
//!
//! These are not recoverable application errors; they indicate the
//! controller violated a traversal invariant (mismatched node type at a
//! call site, or named blocks visited out of order with GC disabled). The
//! spec treats both as fatal: the traversal is abandoned and scope guards
//! must leave the graph exactly as it was before the call so that the next
//! well-formed traversal succeeds. In Rust that "abandon" is a panic rather
//! than an exception, and [`crate::ScopedDataTraversal`]'s `Drop` impl
//! checks [`std::thread::panicking`] to skip GC/commit when one is in
//! flight.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TraversalError {
    #[error(
        "data node type mismatch at call site {index}: expected {expected}, found {found}"
    )]
    TypeMismatch {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("named block out of order: GC is disabled and the traversal visited blocks in a different order than the last GC-enabled pass")]
    NamedBlockOutOfOrder,
}
