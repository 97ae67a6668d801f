//! The edit algebra.
//!
//! An [`Edit`] names one mutation of one live node. `ModifyLeft` and
//! `ModifyRight` address into a container's children, so a single value can
//! describe a change anywhere below the node it is applied to. Raw user
//! actions ([`Action`]) are encoded in the same algebra so the router can wrap
//! them with the same combinators.

use serde::{Deserialize, Serialize};

use crate::widget::Widget;

/// Position of a child inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Index of this side among a container's children.
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// One mutation, addressed relative to the node it is applied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edit {
    /// Discard the node and rebuild it from the widget.
    ReplaceBy(Widget),
    SetLabel(String),
    SetEntryContent(String),
    SetSelection(usize),
    ToggleChecked,
    ToggleEnabled,
    ToggleValidity,
    ModifyLeft(Box<Edit>),
    ModifyRight(Box<Edit>),
    /// Apply the first edit, then the second, to the same node.
    Combine(Box<Edit>, Box<Edit>),
    NoOp,
    /// A button was pressed. Has no visual effect when applied.
    Click,
}

impl Edit {
    /// Wrap `edit` so that it addresses the node at `path` (root first).
    pub fn at(path: &[Side], edit: Edit) -> Edit {
        path.iter().rev().fold(edit, |acc, side| acc.under(*side))
    }

    /// Wrap `self` one level deeper, as the `side` child of a container.
    pub fn under(self, side: Side) -> Edit {
        match side {
            Side::Left => Edit::ModifyLeft(Box::new(self)),
            Side::Right => Edit::ModifyRight(Box::new(self)),
        }
    }

    /// Peel the leading `ModifyLeft`/`ModifyRight` wrappers off.
    ///
    /// Returns the path (root first) and the edit found at its end. A
    /// `Combine` stops the walk since its halves may address different nodes.
    pub fn split_path(self) -> (Vec<Side>, Edit) {
        let mut path = Vec::new();
        let mut current = self;
        loop {
            current = match current {
                Edit::ModifyLeft(inner) => {
                    path.push(Side::Left);
                    *inner
                }
                Edit::ModifyRight(inner) => {
                    path.push(Side::Right);
                    *inner
                }
                other => return (path, other),
            };
        }
    }

    /// Sequential composition: `self` first, then `next`.
    ///
    /// `NoOp` is dropped on either side. Order is kept otherwise, since two
    /// edits at one node are not assumed to commute.
    pub fn then(self, next: Edit) -> Edit {
        match (self, next) {
            (Edit::NoOp, e) | (e, Edit::NoOp) => e,
            (a, b) => Edit::Combine(Box::new(a), Box::new(b)),
        }
    }

    /// Fold a sequence of edits with [`Edit::then`]. An empty sequence is `NoOp`.
    pub fn sequence(edits: impl IntoIterator<Item = Edit>) -> Edit {
        edits.into_iter().fold(Edit::NoOp, Edit::then)
    }

    /// True when applying the edit cannot change anything.
    pub fn is_noop(&self) -> bool {
        match self {
            Edit::NoOp | Edit::Click => true,
            Edit::ModifyLeft(inner) | Edit::ModifyRight(inner) => inner.is_noop(),
            Edit::Combine(a, b) => a.is_noop() && b.is_noop(),
            _ => false,
        }
    }
}

/// A raw action produced by a control when the user interacts with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Button pressed.
    Click,
    /// Check box flipped.
    Toggle,
    /// Entry text changed; carries the new text.
    SetEntryContent(String),
    /// Combo box selection changed; carries the new index.
    SetSelection(usize),
}

impl From<Action> for Edit {
    fn from(action: Action) -> Self {
        match action {
            Action::Click => Edit::Click,
            Action::Toggle => Edit::ToggleChecked,
            Action::SetEntryContent(text) => Edit::SetEntryContent(text),
            Action::SetSelection(index) => Edit::SetSelection(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_wraps_root_first() {
        let edit = Edit::at(&[Side::Right, Side::Left], Edit::Click);
        assert_eq!(
            edit,
            Edit::ModifyRight(Box::new(Edit::ModifyLeft(Box::new(Edit::Click))))
        );
    }

    #[test]
    fn at_empty_path_is_identity() {
        assert_eq!(Edit::at(&[], Edit::ToggleChecked), Edit::ToggleChecked);
    }

    #[test]
    fn split_path_inverts_at() {
        let path = vec![Side::Left, Side::Left, Side::Right];
        let edit = Edit::at(&path, Edit::SetSelection(2));
        assert_eq!(edit.split_path(), (path, Edit::SetSelection(2)));
    }

    #[test]
    fn split_path_stops_at_combine() {
        let inner = Edit::Combine(Box::new(Edit::Click), Box::new(Edit::NoOp));
        let edit = Edit::ModifyLeft(Box::new(inner.clone()));
        assert_eq!(edit.split_path(), (vec![Side::Left], inner));
    }

    #[test]
    fn then_drops_noop_and_keeps_order() {
        assert_eq!(Edit::NoOp.then(Edit::ToggleEnabled), Edit::ToggleEnabled);
        assert_eq!(Edit::ToggleEnabled.then(Edit::NoOp), Edit::ToggleEnabled);
        assert_eq!(
            Edit::SetLabel("a".into()).then(Edit::SetLabel("b".into())),
            Edit::Combine(
                Box::new(Edit::SetLabel("a".into())),
                Box::new(Edit::SetLabel("b".into()))
            )
        );
    }

    #[test]
    fn sequence_of_nothing_is_noop() {
        assert_eq!(Edit::sequence(Vec::new()), Edit::NoOp);
        assert!(Edit::sequence(vec![Edit::NoOp, Edit::NoOp]).is_noop());
    }

    #[test]
    fn toggle_action_maps_to_toggle_checked() {
        assert_eq!(Edit::from(Action::Toggle), Edit::ToggleChecked);
        assert_eq!(Edit::from(Action::Click), Edit::Click);
    }
}
