//! Event categories, targeted routing, and focus tab order. A traversal is
//! always parameterized by one [`Event`]; everything else in this crate
//! exists to answer "which event, delivered where" for the host loop.

mod dispatch;
mod event;
mod focus;
mod key;
mod mouse;
mod routing;

pub use dispatch::{default_tab_handling, focus_query_event, Acknowledged};
pub use event::Event;
pub use focus::{FocusQueryKind, FocusTracker};
pub use key::{KeyCode, KeyInput, Modifiers};
pub use mouse::{MouseButton, Point};
pub use routing::{Delivery, RoutingPath};
