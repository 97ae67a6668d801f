//! Declarative widget descriptions.
//!
//! A [`Widget`] is an immutable value describing one control or one layout
//! node. Trees are built with the binary [`Widget::Container`] case only, so
//! every child is addressed by a [`Side`] rather than by key or index.
//!
//! The variant set is closed: the renderer, the describer and the updater all
//! match exhaustively, and a new variant has to be taught to all three.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::edit::Side;

/// Layout direction of a [`Widget::Container`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Class name recorded on the live node of a container.
    pub fn class_name(self) -> &'static str {
        match self {
            Orientation::Horizontal => crate::render::class::HORIZONTAL,
            Orientation::Vertical => crate::render::class::VERTICAL,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// Immutable description of a control or layout node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Widget {
    Button {
        enabled: bool,
        label: String,
    },
    CheckBox {
        enabled: bool,
        checked: bool,
    },
    ComboBox {
        enabled: bool,
        options: Vec<String>,
        selected: usize,
    },
    Label {
        text: String,
    },
    Entry {
        enabled: bool,
        width: u16,
        name: String,
        content: String,
        valid: bool,
    },
    Empty,
    Container {
        orientation: Orientation,
        left: Box<Widget>,
        right: Box<Widget>,
    },
}

/// Variant tag of a [`Widget`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Button,
    CheckBox,
    ComboBox,
    Label,
    Entry,
    Empty,
    Container,
}

impl std::fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WidgetKind::Button => "button",
            WidgetKind::CheckBox => "check box",
            WidgetKind::ComboBox => "combo box",
            WidgetKind::Label => "label",
            WidgetKind::Entry => "entry",
            WidgetKind::Empty => "empty",
            WidgetKind::Container => "container",
        };
        f.write_str(name)
    }
}

impl WidgetKind {
    /// Controls that can be enabled/disabled and can originate actions.
    pub fn is_interactive(self) -> bool {
        matches!(
            self,
            WidgetKind::Button | WidgetKind::CheckBox | WidgetKind::ComboBox | WidgetKind::Entry
        )
    }
}

/// A widget tree violates one of the model invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    #[error("combo box at {path:?} selects option {selected} of {len}")]
    SelectionOutOfRange {
        path: Vec<Side>,
        selected: usize,
        len: usize,
    },
}

impl Widget {
    pub fn kind(&self) -> WidgetKind {
        match self {
            Widget::Button { .. } => WidgetKind::Button,
            Widget::CheckBox { .. } => WidgetKind::CheckBox,
            Widget::ComboBox { .. } => WidgetKind::ComboBox,
            Widget::Label { .. } => WidgetKind::Label,
            Widget::Entry { .. } => WidgetKind::Entry,
            Widget::Empty => WidgetKind::Empty,
            Widget::Container { .. } => WidgetKind::Container,
        }
    }

    /// Check the model invariants over the whole tree.
    pub fn validate(&self) -> Result<(), WidgetError> {
        let mut path = Vec::new();
        self.validate_at(&mut path)
    }

    fn validate_at(&self, path: &mut Vec<Side>) -> Result<(), WidgetError> {
        match self {
            Widget::ComboBox {
                options, selected, ..
            } if *selected >= options.len() => Err(WidgetError::SelectionOutOfRange {
                path: path.clone(),
                selected: *selected,
                len: options.len(),
            }),
            Widget::Container { left, right, .. } => {
                path.push(Side::Left);
                left.validate_at(path)?;
                path.pop();
                path.push(Side::Right);
                right.validate_at(path)?;
                path.pop();
                Ok(())
            }
            _ => Ok(()),
        }
    }

    pub fn button(label: impl Into<String>) -> Self {
        Widget::Button {
            enabled: true,
            label: label.into(),
        }
    }

    pub fn label(text: impl Into<String>) -> Self {
        Widget::Label { text: text.into() }
    }

    pub fn checkbox(checked: bool) -> Self {
        Widget::CheckBox {
            enabled: true,
            checked,
        }
    }

    pub fn combo<I, S>(options: I, selected: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Widget::ComboBox {
            enabled: true,
            options: options.into_iter().map(Into::into).collect(),
            selected,
        }
    }

    pub fn entry(width: u16, name: impl Into<String>, content: impl Into<String>) -> Self {
        Widget::Entry {
            enabled: true,
            width,
            name: name.into(),
            content: content.into(),
            valid: true,
        }
    }

    pub fn container(orientation: Orientation, left: Widget, right: Widget) -> Self {
        Widget::Container {
            orientation,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn hbox(left: Widget, right: Widget) -> Self {
        Self::container(Orientation::Horizontal, left, right)
    }

    pub fn vbox(left: Widget, right: Widget) -> Self {
        Self::container(Orientation::Vertical, left, right)
    }

    /// Same widget with `enabled` forced to `false`. Non-interactive widgets
    /// are returned unchanged.
    pub fn disabled(mut self) -> Self {
        match &mut self {
            Widget::Button { enabled, .. }
            | Widget::CheckBox { enabled, .. }
            | Widget::ComboBox { enabled, .. }
            | Widget::Entry { enabled, .. } => *enabled = false,
            Widget::Label { .. } | Widget::Empty | Widget::Container { .. } => {}
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_in_range_selection() {
        let w = Widget::vbox(Widget::combo(["a", "b"], 1), Widget::Empty);
        assert!(w.validate().is_ok());
    }

    #[test]
    fn validate_reports_path_of_bad_combo() {
        let w = Widget::vbox(
            Widget::label("x"),
            Widget::hbox(Widget::combo(["a"], 3), Widget::Empty),
        );
        let err = w.validate().unwrap_err();
        assert_eq!(
            err,
            WidgetError::SelectionOutOfRange {
                path: vec![Side::Right, Side::Left],
                selected: 3,
                len: 1,
            }
        );
    }

    #[test]
    fn empty_combo_is_invalid() {
        let w = Widget::combo(Vec::<String>::new(), 0);
        assert!(w.validate().is_err());
    }

    #[test]
    fn disabled_only_touches_interactive_widgets() {
        assert_eq!(
            Widget::button("Go").disabled(),
            Widget::Button {
                enabled: false,
                label: "Go".into()
            }
        );
        assert_eq!(Widget::label("x").disabled(), Widget::label("x"));
    }

    #[test]
    fn serde_uses_kind_tag() {
        let json = serde_json::to_value(Widget::button("Go")).unwrap();
        assert_eq!(json["kind"], "button");
        assert_eq!(json["label"], "Go");
        let back: Widget = serde_json::from_value(json).unwrap();
        assert_eq!(back, Widget::button("Go"));
    }
}
