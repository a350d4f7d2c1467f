//! Control-flow adapters: the only sanctioned way application code touches
//! the data graph's scoped block activation. A controller never calls
//! `rui_data::ScopedDataBlock` directly — it expresses its control flow
//! through [`IfChain`], [`switch`], [`for_each`]/[`while_loop`], and the
//! untracked variants, each of which encapsulates exactly the scoped
//! activation its control-flow shape requires.

mod condition;
mod if_chain;
mod loops;
mod switch;
mod untracked;

pub use condition::Condition;
pub use if_chain::IfChain;
pub use loops::{for_each, for_each_keyed, while_loop};
pub use switch::switch;
pub use untracked::{untracked_if, untracked_switch};
