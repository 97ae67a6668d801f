//! Bundled application logic used by the binary.
//!
//! Each demo is an [`Application`]: it produces the initial widget and a
//! [`Machine`](crate::state::Machine) whose transitions decode root-relative
//! edits with [`Edit::split_path`](crate::edit::Edit::split_path).

mod converter;
mod counter;
mod layout;
mod panel;

pub use converter::Converter;
pub use counter::Counter;
pub use layout::{LayoutError, StaticLayout};
pub use panel::Panel;

use crate::state::{Application, ApplicationState, Machine};
use crate::widget::Widget;

/// The demos selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoApp {
    Counter,
    Converter,
    Panel,
}

impl DemoApp {
    pub const NAMES: &'static [&'static str] = &["counter", "converter", "panel"];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "counter" => Some(DemoApp::Counter),
            "converter" => Some(DemoApp::Converter),
            "panel" => Some(DemoApp::Panel),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DemoApp::Counter => "counter",
            DemoApp::Converter => "converter",
            DemoApp::Panel => "panel",
        }
    }
}

impl Application for DemoApp {
    fn start(self) -> (Widget, Box<dyn ApplicationState>) {
        match self {
            DemoApp::Counter => (Counter::widget(), Machine::boxed(Counter::default())),
            DemoApp::Converter => (Converter::widget(), Machine::boxed(Converter::default())),
            DemoApp::Panel => (Panel::widget(), Machine::boxed(Panel::default())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for name in DemoApp::NAMES {
            let app = DemoApp::from_name(name).unwrap();
            assert_eq!(app.name(), *name);
        }
        assert!(DemoApp::from_name("nope").is_none());
    }

    #[test]
    fn initial_widgets_are_valid() {
        for name in DemoApp::NAMES {
            let (widget, _) = DemoApp::from_name(name).unwrap().start();
            assert!(widget.validate().is_ok(), "{name}");
        }
    }
}
