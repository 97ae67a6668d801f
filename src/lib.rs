//! A minimal reactive rendering runtime.
//!
//! An application hands over an immutable [`Widget`] tree and a one-shot
//! [`ApplicationState`]. The runtime mounts the widget into a live tree,
//! routes every user action back to the state as a root-relative [`Edit`]
//! and applies the edit the state answers with.

pub mod config;
pub mod demo;
pub mod driver;
pub mod edit;
pub mod host;
pub mod logging;
pub mod render;
pub mod router;
pub mod state;
pub mod ui;
pub mod update;
pub mod widget;

pub use driver::{Dispatch, Runtime, RuntimeError};
pub use edit::{Action, Edit, Side};
pub use host::{LiveTree, NodeId};
pub use state::{Application, ApplicationState, Continuation, Inert, Machine, Step, Transition};
pub use update::{ApplyReport, Diagnostics, UpdateError};
pub use widget::{Orientation, Widget, WidgetError, WidgetKind};
