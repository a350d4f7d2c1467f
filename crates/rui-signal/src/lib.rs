//! Capability-tiered value carriers (signals): the currency application
//! code reads and writes instead of touching the data graph directly.
//! Every adaptor and operator in this crate is a thin, stateless wrapper
//! over [`Signal`] — none of them own any graph storage themselves.

mod adaptors;
mod capability;
mod condition;
mod core;
mod operators;
mod primitives;
mod projection;
mod smoothing;
mod write;

pub use adaptors::{
    add_default, cast, fake_readability, fake_writability, has_value, mask, mask_reads,
    mask_writes, minimize_id_changes, move_signal, ready_to_write, simplify_id, unwrap, AddDefault,
    Cast, FakeReadability, FakeWritability, HasValue, Mask, MaskReads, MaskWrites,
    MinimizeIdChanges, Move, ReadyToWrite, SimplifyId, Unwrap,
};
pub use capability::{Capabilities, ReadCapability, WriteCapability};
pub use condition::{signal_condition, SignalCondition};
pub use core::Signal;
pub use operators::{
    add, and, bitand, bitor, bitxor, conditional, div, eq, ge, gt, le, lt, mul, ne, or, rem, shl,
    shr, sub, zip_with, And, Conditional, Or, Zip,
};
pub use primitives::{
    direct, empty, lambda_duplex, lambda_reader, value, DirectSignal, EmptySignal, LambdaDuplex,
    LambdaReader, ValueSignal,
};
pub use projection::{field, index, Field, Index};
pub use smoothing::{smooth, Smooth, SmoothingContext, Transition};
pub use write::write_signal;
