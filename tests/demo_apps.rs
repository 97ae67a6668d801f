mod common;

use common::runtime_node;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use widget_rts::demo::{DemoApp, StaticLayout};
use widget_rts::driver::{Dispatch, Runtime};
use widget_rts::edit::{Action, Side};
use widget_rts::host::NodeId;
use widget_rts::render::attr;
use widget_rts::ui::input::native_action;
use widget_rts::update::Diagnostics;
use widget_rts::widget::{Orientation, Widget};

use Side::{Left as L, Right as R};

fn start(app: DemoApp) -> Runtime {
    Runtime::start(app, Diagnostics::quiet()).unwrap()
}

/// Press `code` on `node` the way the terminal host does: native change
/// first, then the raw action.
fn press(runtime: &Runtime, node: NodeId, code: KeyCode) -> Option<Dispatch> {
    let action = {
        let mut tree = runtime.tree_mut();
        native_action(&mut tree, node, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }?;
    Some(runtime.handle(node, action).unwrap())
}

fn type_text(runtime: &Runtime, node: NodeId, text: &str) {
    for ch in text.chars() {
        press(runtime, node, KeyCode::Char(ch));
    }
}

fn is_disabled(runtime: &Runtime, node: NodeId) -> bool {
    runtime
        .tree()
        .attribute(node, attr::DISABLED)
        .unwrap()
        .is_some()
}

/// Reset is only enabled while the count is non-zero.
#[test]
fn test_counter_round_trip() {
    let runtime = start(DemoApp::Counter);
    let value = runtime_node(&runtime, &[L]);
    let minus = runtime_node(&runtime, &[R, L, L]);
    let plus = runtime_node(&runtime, &[R, L, R]);
    let reset = runtime_node(&runtime, &[R, R]);
    assert!(is_disabled(&runtime, reset));

    runtime.handle(plus, Action::Click).unwrap();
    runtime.handle(plus, Action::Click).unwrap();
    assert_eq!(runtime.tree().text(value).unwrap(), "2");
    assert!(!is_disabled(&runtime, reset));

    runtime.handle(reset, Action::Click).unwrap();
    assert_eq!(runtime.tree().text(value).unwrap(), "0");
    assert!(is_disabled(&runtime, reset));

    runtime.handle(minus, Action::Click).unwrap();
    assert_eq!(runtime.tree().text(value).unwrap(), "-1");
    assert!(!is_disabled(&runtime, reset));
}

/// Typing into one entry rewrites the other; garbage marks the entry invalid
/// until it parses again.
#[test]
fn test_converter_keeps_entries_in_sync() {
    let runtime = start(DemoApp::Converter);
    let celsius = runtime_node(&runtime, &[L, R]);
    let fahrenheit = runtime_node(&runtime, &[R, R]);

    press(&runtime, celsius, KeyCode::Backspace);
    type_text(&runtime, celsius, "x");
    assert!(runtime.tree().has_class(celsius, "invalid").unwrap());
    assert_eq!(runtime.tree().value(fahrenheit).unwrap(), "32");

    press(&runtime, celsius, KeyCode::Backspace);
    type_text(&runtime, celsius, "100");
    assert!(!runtime.tree().has_class(celsius, "invalid").unwrap());
    assert_eq!(runtime.tree().value(celsius).unwrap(), "100");
    assert_eq!(runtime.tree().value(fahrenheit).unwrap(), "212");

    while !runtime.tree().value(fahrenheit).unwrap().is_empty() {
        press(&runtime, fahrenheit, KeyCode::Backspace);
    }
    type_text(&runtime, fahrenheit, "50");
    assert_eq!(runtime.tree().value(celsius).unwrap(), "10");
    assert!(!runtime.is_halted());
}

/// The check box enables the picker, the picker drives the caption and the
/// flip button rebuilds the lower row.
#[test]
fn test_panel_flow() {
    let runtime = start(DemoApp::Panel);
    let enable = runtime_node(&runtime, &[L, L]);
    let picker = runtime_node(&runtime, &[L, R]);
    assert!(is_disabled(&runtime, picker));

    press(&runtime, enable, KeyCode::Char(' '));
    assert!(runtime.tree().checked(enable).unwrap());
    assert!(!is_disabled(&runtime, picker));

    press(&runtime, picker, KeyCode::Right);
    press(&runtime, picker, KeyCode::Right);
    let caption = runtime_node(&runtime, &[R, L]);
    assert_eq!(runtime.tree().text(caption).unwrap(), "Selected: blue");

    let flip = runtime_node(&runtime, &[R, R]);
    let dispatch = press(&runtime, flip, KeyCode::Enter).unwrap();
    assert!(matches!(dispatch, Dispatch::Applied(report) if report.replaced == 1));

    let lower = runtime_node(&runtime, &[R]);
    assert_eq!(
        widget_rts::render::describe(&runtime.tree(), lower).unwrap(),
        Widget::container(
            Orientation::Vertical,
            Widget::label("Selected: blue"),
            Widget::button("Flip"),
        )
    );
    // The picker above the replaced row is untouched.
    assert_eq!(runtime_node(&runtime, &[L, R]), picker);
    assert_eq!(runtime.tree().selected(picker).unwrap(), 2);

    let flip = runtime_node(&runtime, &[R, R]);
    press(&runtime, flip, KeyCode::Enter);
    let lower = runtime_node(&runtime, &[R]);
    assert!(runtime.tree().has_class(lower, "horizontal").unwrap());
}

/// A static layout never changes the tree on its own.
#[test]
fn test_static_layout_is_inert() {
    let widget = Widget::hbox(Widget::checkbox(false), Widget::button("Go"));
    let runtime = Runtime::start(StaticLayout::new(widget), Diagnostics::quiet()).unwrap();
    let checkbox = runtime_node(&runtime, &[L]);
    let button = runtime_node(&runtime, &[R]);

    assert_eq!(
        press(&runtime, button, KeyCode::Enter),
        Some(Dispatch::Unchanged)
    );
    assert_eq!(
        press(&runtime, checkbox, KeyCode::Enter),
        Some(Dispatch::Unchanged)
    );
    assert_eq!(
        runtime.describe_root().unwrap(),
        Widget::hbox(Widget::checkbox(true), Widget::button("Go"))
    );
}
