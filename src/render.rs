//! Widget → live tree.
//!
//! [`render`] is pure: it turns a [`Widget`] into an [`Element`] description.
//! [`materialize`] builds live nodes from a description, and [`mount`] is the
//! only step that attaches anything to the host root. [`describe`] goes the
//! other way and recovers the presentational projection of a live node.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::host::{HostError, LiveTree, NodeId, Tag};
use crate::widget::{Orientation, Widget, WidgetKind};

/// The fixed set of state-indicating class names.
pub mod class {
    pub const LABEL: &str = "label";
    pub const HORIZONTAL: &str = "horizontal";
    pub const VERTICAL: &str = "vertical";
    pub const INVALID: &str = "invalid";
}

/// Attribute names written by the renderer.
pub mod attr {
    pub const TYPE: &str = "type";
    pub const DISABLED: &str = "disabled";
    pub const SIZE: &str = "size";
    pub const NAME: &str = "name";
}

const TYPE_CHECKBOX: &str = "checkbox";
const TYPE_TEXT: &str = "text";

/// Detached description of a live node and its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: Tag,
    pub attributes: BTreeMap<String, String>,
    pub classes: BTreeSet<String>,
    pub text: String,
    pub value: String,
    pub checked: bool,
    pub selected: usize,
    pub children: Vec<Element>,
}

impl Element {
    fn new(tag: Tag) -> Self {
        Self {
            tag,
            attributes: BTreeMap::new(),
            classes: BTreeSet::new(),
            text: String::new(),
            value: String::new(),
            checked: false,
            selected: 0,
            children: Vec::new(),
        }
    }

    fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    fn class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    fn enabled(self, enabled: bool) -> Self {
        if enabled {
            self
        } else {
            self.attr(attr::DISABLED, "true")
        }
    }
}

/// Pure description of how `widget` looks in the host tree.
pub fn render(widget: &Widget) -> Element {
    match widget {
        Widget::Button { enabled, label } => {
            let mut el = Element::new(Tag::Button).enabled(*enabled);
            el.text = label.clone();
            el
        }
        Widget::CheckBox { enabled, checked } => {
            let mut el = Element::new(Tag::Input)
                .attr(attr::TYPE, TYPE_CHECKBOX)
                .enabled(*enabled);
            el.checked = *checked;
            el
        }
        Widget::ComboBox {
            enabled,
            options,
            selected,
        } => {
            let mut el = Element::new(Tag::Select).enabled(*enabled);
            el.children = options
                .iter()
                .map(|option| {
                    let mut opt = Element::new(Tag::Option);
                    opt.text = option.clone();
                    opt
                })
                .collect();
            el.selected = *selected;
            el
        }
        Widget::Label { text } => {
            let mut el = Element::new(Tag::Span).class(class::LABEL);
            el.text = text.clone();
            el
        }
        Widget::Entry {
            enabled,
            width,
            name,
            content,
            valid,
        } => {
            let mut el = Element::new(Tag::Input)
                .attr(attr::TYPE, TYPE_TEXT)
                .attr(attr::SIZE, width.to_string())
                .attr(attr::NAME, name.clone())
                .enabled(*enabled);
            if !valid {
                el = el.class(class::INVALID);
            }
            el.value = content.clone();
            el
        }
        Widget::Empty => Element::new(Tag::Span),
        Widget::Container {
            orientation,
            left,
            right,
        } => {
            let mut el = Element::new(Tag::Div).class(orientation.class_name());
            el.children = vec![render(left), render(right)];
            el
        }
    }
}

/// Build detached live nodes for `element`. Returns the top node.
pub fn materialize(tree: &mut LiveTree, element: &Element) -> Result<NodeId, HostError> {
    let id = tree.create_node(element.tag);
    {
        let node = tree.get_mut(id)?;
        node.attributes = element.attributes.clone();
        node.classes = element.classes.clone();
        node.text = element.text.clone();
        node.value = element.value.clone();
        node.checked = element.checked;
        node.selected = element.selected;
    }
    for child in &element.children {
        let child_id = materialize(tree, child)?;
        tree.append_child(id, child_id)?;
    }
    Ok(id)
}

/// Render `widget` and attach it under the host root.
pub fn mount(tree: &mut LiveTree, widget: &Widget) -> Result<NodeId, HostError> {
    let element = render(widget);
    let id = materialize(tree, &element)?;
    tree.append_child(tree.root(), id)?;
    tracing::debug!(node = %id, kind = %widget.kind(), "mounted widget");
    Ok(id)
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DescribeError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error("node {node} is a <{tag}> the renderer never produces")]
    Unrecognized { node: NodeId, tag: &'static str },

    #[error("container {node} has {count} children, expected 2")]
    Arity { node: NodeId, count: usize },

    #[error("entry {node} has a non-numeric size attribute")]
    BadWidth { node: NodeId },
}

/// Which widget variant a live node was rendered from.
pub fn kind_of(tree: &LiveTree, id: NodeId) -> Result<WidgetKind, DescribeError> {
    let node = tree.get(id)?;
    let kind = match node.tag {
        Tag::Button => WidgetKind::Button,
        Tag::Select => WidgetKind::ComboBox,
        Tag::Input => match node.attribute(attr::TYPE) {
            Some(TYPE_CHECKBOX) => WidgetKind::CheckBox,
            Some(TYPE_TEXT) => WidgetKind::Entry,
            _ => {
                return Err(DescribeError::Unrecognized {
                    node: id,
                    tag: node.tag.as_str(),
                })
            }
        },
        Tag::Span if node.has_class(class::LABEL) => WidgetKind::Label,
        Tag::Span => WidgetKind::Empty,
        Tag::Div if node.has_class(class::HORIZONTAL) || node.has_class(class::VERTICAL) => {
            WidgetKind::Container
        }
        Tag::Div | Tag::Option => {
            return Err(DescribeError::Unrecognized {
                node: id,
                tag: node.tag.as_str(),
            })
        }
    };
    Ok(kind)
}

/// Recover the widget a live node currently shows.
pub fn describe(tree: &LiveTree, id: NodeId) -> Result<Widget, DescribeError> {
    let node = tree.get(id)?;
    let enabled = node.attribute(attr::DISABLED).is_none();
    let widget = match kind_of(tree, id)? {
        WidgetKind::Button => Widget::Button {
            enabled,
            label: node.text.clone(),
        },
        WidgetKind::CheckBox => Widget::CheckBox {
            enabled,
            checked: node.checked,
        },
        WidgetKind::ComboBox => {
            let options = node
                .children()
                .iter()
                .map(|&opt| tree.text(opt).map(str::to_string))
                .collect::<Result<Vec<_>, _>>()?;
            Widget::ComboBox {
                enabled,
                options,
                selected: node.selected,
            }
        }
        WidgetKind::Label => Widget::Label {
            text: node.text.clone(),
        },
        WidgetKind::Entry => Widget::Entry {
            enabled,
            width: node
                .attribute(attr::SIZE)
                .and_then(|s| s.parse().ok())
                .ok_or(DescribeError::BadWidth { node: id })?,
            name: node.attribute(attr::NAME).unwrap_or_default().to_string(),
            content: node.value.clone(),
            valid: !node.has_class(class::INVALID),
        },
        WidgetKind::Empty => Widget::Empty,
        WidgetKind::Container => {
            let orientation = if node.has_class(class::HORIZONTAL) {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let [left, right] = node.children() else {
                return Err(DescribeError::Arity {
                    node: id,
                    count: node.children().len(),
                });
            };
            Widget::container(orientation, describe(tree, *left)?, describe(tree, *right)?)
        }
    };
    Ok(widget)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Widget {
        Widget::vbox(
            Widget::hbox(Widget::label("name"), Widget::entry(12, "user", "ada")),
            Widget::hbox(
                Widget::combo(["a", "b", "a"], 2),
                Widget::vbox(Widget::checkbox(true).disabled(), Widget::Empty),
            ),
        )
    }

    #[test]
    fn render_is_pure() {
        let w = sample();
        assert_eq!(render(&w), render(&w));
    }

    #[test]
    fn container_records_its_own_orientation() {
        let el = render(&Widget::hbox(Widget::Empty, Widget::Empty));
        assert!(el.classes.contains(class::HORIZONTAL));
        assert_eq!(el.children.len(), 2);
    }

    #[test]
    fn combo_options_keep_order_and_duplicates() {
        let el = render(&Widget::combo(["x", "y", "x"], 1));
        let texts: Vec<_> = el.children.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["x", "y", "x"]);
        assert_eq!(el.selected, 1);
    }

    #[test]
    fn invalid_entry_gets_marker_class() {
        let w = Widget::Entry {
            enabled: true,
            width: 4,
            name: "n".into(),
            content: "??".into(),
            valid: false,
        };
        let el = render(&w);
        assert!(el.classes.contains(class::INVALID));
        assert_eq!(el.attributes.get(attr::SIZE).map(String::as_str), Some("4"));
    }

    #[test]
    fn disabled_button_stays_visible_with_attribute() {
        let el = render(&Widget::button("Go").disabled());
        assert_eq!(el.text, "Go");
        assert!(el.attributes.contains_key(attr::DISABLED));
    }

    #[test]
    fn mount_then_describe_round_trips() {
        let mut tree = LiveTree::new();
        let w = sample();
        let id = mount(&mut tree, &w).unwrap();
        assert_eq!(tree.parent(id).unwrap(), Some(tree.root()));
        assert_eq!(describe(&tree, id).unwrap(), w);
    }

    #[test]
    fn describe_rejects_host_root() {
        let tree = LiveTree::new();
        assert!(matches!(
            describe(&tree, tree.root()),
            Err(DescribeError::Unrecognized { tag: "div", .. })
        ));
    }
}
