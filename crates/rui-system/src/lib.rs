//! The system object: the host-facing orchestration crate that owns the
//! data graph, layout root, input state, and scheduler, and drives the
//! refresh → update → resolve_layout → render cycle described by the
//! runtime's host loop contract. Every other crate in this workspace is a
//! library with no notion of "the host"; this is the one crate that wires
//! them together and is allowed to touch `anyhow`/the filesystem.

mod context;
mod input;
mod interfaces;
mod scheduler;
mod system;

pub use context::Context;
pub use input::InputState;
pub use interfaces::{
    CursorKind, ExternalInterface, NullExternalInterface, NullOsInterface, NullWindowInterface,
    OsInterface, WindowInterface,
};
pub use scheduler::Scheduler;
pub use system::{load_config, Controller, System};

pub use rui_config::RuntimeConfig;
