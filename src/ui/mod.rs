//! Terminal host: draws the live tree with ratatui and turns key presses
//! into actions on its controls.

pub mod app;
pub mod events;
pub mod input;
pub mod layout;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;

pub use runtime::run;
