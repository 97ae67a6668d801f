//! Key handling for the terminal host.
//!
//! A key aimed at a control first performs the change a real control would
//! perform on its own (flip the box, edit the text, move the selection) and
//! only then reports the raw action to the runtime.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::driver::{Runtime, RuntimeError};
use crate::edit::Action;
use crate::host::{HostError, LiveTree, NodeId};
use crate::render::kind_of;
use crate::ui::app::App;
use crate::widget::WidgetKind;

pub fn handle_key(app: &mut App, runtime: &Runtime, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.code == KeyCode::Esc || is_ctrl_char(key, 'c') {
        app.request_quit();
        return;
    }

    match key.code {
        KeyCode::Tab => app.focus_next(&runtime.tree()),
        KeyCode::BackTab => app.focus_prev(&runtime.tree()),
        _ => {
            let Some(focus) = app.focus() else {
                return;
            };
            let native = {
                let mut tree = runtime.tree_mut();
                native_action(&mut tree, focus, key)
            };
            match native {
                Ok(Some(action)) => {
                    tracing::debug!(node = %focus, ?action, "dispatching action");
                    app.record(runtime.handle(focus, action));
                }
                Ok(None) => {}
                Err(err) => app.record(Err(RuntimeError::Host(err))),
            }
        }
    }

    app.sync_focus(&runtime.tree());
}

/// Apply the control's own reaction to `key` and return the raw action to
/// report, if the key means anything to the focused control.
pub fn native_action(
    tree: &mut LiveTree,
    node: NodeId,
    key: KeyEvent,
) -> Result<Option<Action>, HostError> {
    let Ok(kind) = kind_of(tree, node) else {
        return Ok(None);
    };
    let action = match (kind, key.code) {
        (WidgetKind::Button, KeyCode::Enter | KeyCode::Char(' ')) => Some(Action::Click),
        (WidgetKind::CheckBox, KeyCode::Enter | KeyCode::Char(' ')) => {
            let checked = tree.checked(node)?;
            tree.set_checked(node, !checked)?;
            Some(Action::Toggle)
        }
        (WidgetKind::ComboBox, KeyCode::Left | KeyCode::Right) => {
            let current = tree.selected(node)?;
            let count = tree.children(node)?.len();
            let next = if key.code == KeyCode::Left {
                current.checked_sub(1)
            } else {
                Some(current + 1).filter(|&i| i < count)
            };
            match next {
                Some(index) => {
                    tree.set_selected(node, index)?;
                    Some(Action::SetSelection(index))
                }
                None => None,
            }
        }
        (WidgetKind::Entry, KeyCode::Char(ch)) if !has_control(key) => {
            let mut value = tree.value(node)?.to_string();
            value.push(ch);
            tree.set_value(node, value.as_str())?;
            Some(Action::SetEntryContent(value))
        }
        (WidgetKind::Entry, KeyCode::Backspace) => {
            let mut value = tree.value(node)?.to_string();
            if value.pop().is_none() {
                return Ok(None);
            }
            tree.set_value(node, value.as_str())?;
            Some(Action::SetEntryContent(value))
        }
        _ => None,
    };
    Ok(action)
}

fn has_control(key: KeyEvent) -> bool {
    key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}
