//! Applying edits to the live tree.
//!
//! [`apply`] runs in two phases. The check phase simulates the edit on a
//! [`Shape`] of the target subtree (loaded lazily, only along the addressed
//! paths) and rejects structural mismatches before anything is touched. The
//! apply phase then performs the mutations, so a rejected edit never leaves
//! the tree half-updated.

use thiserror::Error;

use crate::edit::{Edit, Side};
use crate::host::{HostError, LiveTree, NodeId};
use crate::render::{self, attr, class, DescribeError};
use crate::widget::{Widget, WidgetError, WidgetKind};

/// Which diagnostic-only conditions are reported through `tracing`.
///
/// Diagnostics never change how an edit is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostics {
    /// Warn when a leaf edit sets a value equal to the current one.
    pub redundant_updates: bool,
    /// Log every `ReplaceBy`, which rebuilds a whole subtree.
    pub replacements: bool,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self {
            redundant_updates: true,
            replacements: false,
        }
    }
}

impl Diagnostics {
    pub fn quiet() -> Self {
        Self {
            redundant_updates: false,
            replacements: false,
        }
    }
}

/// What an applied edit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyReport {
    /// Node occupying the target position afterwards. Differs from the
    /// original target only when the target itself was replaced.
    pub target: NodeId,
    /// Leaf edits and replacements performed.
    pub touched: usize,
    /// Leaf edits whose new value equalled the current one.
    pub redundant: usize,
    /// `ReplaceBy` edits performed.
    pub replaced: usize,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpdateError {
    #[error("{edit} cannot be applied to a {found} (at {path:?})")]
    Mismatch {
        path: Vec<Side>,
        edit: &'static str,
        found: WidgetKind,
    },

    #[error("selection {index} is out of range for {len} options (at {path:?})")]
    SelectionOutOfRange {
        path: Vec<Side>,
        index: usize,
        len: usize,
    },

    #[error("node at {path:?} has no parent to be replaced in")]
    NoParent { path: Vec<Side> },

    #[error("replacement widget is invalid: {0}")]
    InvalidWidget(#[from] WidgetError),

    #[error(transparent)]
    Describe(#[from] DescribeError),

    #[error(transparent)]
    Host(#[from] HostError),
}

fn edit_name(edit: &Edit) -> &'static str {
    match edit {
        Edit::ReplaceBy(_) => "ReplaceBy",
        Edit::SetLabel(_) => "SetLabel",
        Edit::SetEntryContent(_) => "SetEntryContent",
        Edit::SetSelection(_) => "SetSelection",
        Edit::ToggleChecked => "ToggleChecked",
        Edit::ToggleEnabled => "ToggleEnabled",
        Edit::ToggleValidity => "ToggleValidity",
        Edit::ModifyLeft(_) => "ModifyLeft",
        Edit::ModifyRight(_) => "ModifyRight",
        Edit::Combine(_, _) => "Combine",
        Edit::NoOp => "NoOp",
        Edit::Click => "Click",
    }
}

/// Validate `edit` against the subtree at `node`, then apply it.
pub fn apply(
    tree: &mut LiveTree,
    node: NodeId,
    edit: &Edit,
    diagnostics: &Diagnostics,
) -> Result<ApplyReport, UpdateError> {
    check(tree, node, edit)?;
    let mut report = ApplyReport {
        target: node,
        touched: 0,
        redundant: 0,
        replaced: 0,
    };
    let mut path = Vec::new();
    report.target = apply_at(tree, node, edit, diagnostics, &mut path, &mut report)?;
    Ok(report)
}

/// Run only the check phase.
pub fn check(tree: &LiveTree, node: NodeId, edit: &Edit) -> Result<(), UpdateError> {
    let has_parent = tree.parent(node)?.is_some();
    let mut shape = Shape::of_live(tree, node)?;
    let mut path = Vec::new();
    shape.check(tree, edit, has_parent, &mut path)
}

/// Structural projection of a subtree: just enough to validate edits.
///
/// Shapes of live nodes load their children on first descent; shapes of
/// replacement widgets are built eagerly.
struct Shape {
    kind: WidgetKind,
    options: usize,
    origin: Option<NodeId>,
    children: Option<Box<(Shape, Shape)>>,
}

impl Shape {
    fn of_live(tree: &LiveTree, id: NodeId) -> Result<Self, UpdateError> {
        let kind = render::kind_of(tree, id)?;
        let options = match kind {
            WidgetKind::ComboBox => tree.children(id)?.len(),
            _ => 0,
        };
        Ok(Self {
            kind,
            options,
            origin: Some(id),
            children: None,
        })
    }

    fn of_widget(widget: &Widget) -> Self {
        let (options, children) = match widget {
            Widget::ComboBox { options, .. } => (options.len(), None),
            Widget::Container { left, right, .. } => (
                0,
                Some(Box::new((Shape::of_widget(left), Shape::of_widget(right)))),
            ),
            _ => (0, None),
        };
        Self {
            kind: widget.kind(),
            options,
            origin: None,
            children,
        }
    }

    fn mismatch(&self, edit: &Edit, path: &[Side]) -> UpdateError {
        UpdateError::Mismatch {
            path: path.to_vec(),
            edit: edit_name(edit),
            found: self.kind,
        }
    }

    fn child_mut(
        &mut self,
        tree: &LiveTree,
        side: Side,
        edit: &Edit,
        path: &[Side],
    ) -> Result<&mut Shape, UpdateError> {
        if self.kind != WidgetKind::Container {
            return Err(self.mismatch(edit, path));
        }
        if self.children.is_none() {
            let id = self.origin.ok_or_else(|| self.mismatch(edit, path))?;
            let pair = match tree.children(id)? {
                [left, right] => (Shape::of_live(tree, *left)?, Shape::of_live(tree, *right)?),
                other => {
                    return Err(DescribeError::Arity {
                        node: id,
                        count: other.len(),
                    }
                    .into())
                }
            };
            self.children = Some(Box::new(pair));
        }
        let kind = self.kind;
        let pair = self
            .children
            .as_deref_mut()
            .ok_or_else(|| UpdateError::Mismatch {
                path: path.to_vec(),
                edit: edit_name(edit),
                found: kind,
            })?;
        Ok(match side {
            Side::Left => &mut pair.0,
            Side::Right => &mut pair.1,
        })
    }

    fn check(
        &mut self,
        tree: &LiveTree,
        edit: &Edit,
        has_parent: bool,
        path: &mut Vec<Side>,
    ) -> Result<(), UpdateError> {
        let allowed = match edit {
            Edit::NoOp => true,
            Edit::ReplaceBy(widget) => {
                if !has_parent {
                    return Err(UpdateError::NoParent { path: path.clone() });
                }
                widget.validate()?;
                *self = Shape::of_widget(widget);
                true
            }
            Edit::ModifyLeft(inner) | Edit::ModifyRight(inner) => {
                let side = if matches!(edit, Edit::ModifyLeft(_)) {
                    Side::Left
                } else {
                    Side::Right
                };
                let child = self.child_mut(tree, side, edit, path)?;
                path.push(side);
                child.check(tree, inner, true, path)?;
                path.pop();
                true
            }
            Edit::Combine(first, second) => {
                self.check(tree, first, has_parent, path)?;
                self.check(tree, second, has_parent, path)?;
                true
            }
            Edit::SetLabel(_) => matches!(self.kind, WidgetKind::Label | WidgetKind::Button),
            Edit::SetEntryContent(_) | Edit::ToggleValidity => self.kind == WidgetKind::Entry,
            Edit::SetSelection(index) => {
                if self.kind == WidgetKind::ComboBox && *index >= self.options {
                    return Err(UpdateError::SelectionOutOfRange {
                        path: path.clone(),
                        index: *index,
                        len: self.options,
                    });
                }
                self.kind == WidgetKind::ComboBox
            }
            Edit::ToggleChecked => self.kind == WidgetKind::CheckBox,
            Edit::ToggleEnabled => self.kind.is_interactive(),
            Edit::Click => self.kind == WidgetKind::Button,
        };
        if allowed {
            Ok(())
        } else {
            Err(self.mismatch(edit, path))
        }
    }
}

fn apply_at(
    tree: &mut LiveTree,
    id: NodeId,
    edit: &Edit,
    diagnostics: &Diagnostics,
    path: &mut Vec<Side>,
    report: &mut ApplyReport,
) -> Result<NodeId, UpdateError> {
    match edit {
        Edit::NoOp | Edit::Click => {}
        Edit::ReplaceBy(widget) => {
            let parent = tree
                .parent(id)?
                .ok_or_else(|| UpdateError::NoParent { path: path.clone() })?;
            let fresh = render::materialize(tree, &render::render(widget))?;
            tree.replace_child(parent, fresh, id)?;
            tree.remove_subtree(id)?;
            if diagnostics.replacements {
                tracing::debug!(?path, old = %id, new = %fresh, kind = %widget.kind(), "replaced subtree");
            }
            report.touched += 1;
            report.replaced += 1;
            return Ok(fresh);
        }
        Edit::SetLabel(text) => {
            if tree.text(id)? == text.as_str() {
                redundant(diagnostics, report, path, id, "label text set to its current value");
            }
            tree.set_text(id, text.clone())?;
            report.touched += 1;
        }
        Edit::SetEntryContent(text) => {
            if tree.value(id)? == text.as_str() {
                redundant(diagnostics, report, path, id, "entry value set to its current value");
            }
            tree.set_value(id, text.clone())?;
            report.touched += 1;
        }
        Edit::SetSelection(index) => {
            if tree.selected(id)? == *index {
                redundant(diagnostics, report, path, id, "option selected that was already selected");
            }
            tree.set_selected(id, *index)?;
            report.touched += 1;
        }
        Edit::ToggleChecked => {
            let checked = tree.checked(id)?;
            tree.set_checked(id, !checked)?;
            report.touched += 1;
        }
        Edit::ToggleEnabled => {
            if tree.attribute(id, attr::DISABLED)?.is_some() {
                tree.remove_attribute(id, attr::DISABLED)?;
            } else {
                tree.set_attribute(id, attr::DISABLED, "true")?;
            }
            report.touched += 1;
        }
        Edit::ToggleValidity => {
            tree.toggle_class(id, class::INVALID)?;
            report.touched += 1;
        }
        Edit::ModifyLeft(inner) | Edit::ModifyRight(inner) => {
            let side = if matches!(edit, Edit::ModifyLeft(_)) {
                Side::Left
            } else {
                Side::Right
            };
            let children = tree.children(id)?;
            let child = children
                .get(side.index())
                .copied()
                .ok_or(DescribeError::Arity {
                    node: id,
                    count: children.len(),
                })?;
            path.push(side);
            apply_at(tree, child, inner, diagnostics, path, report)?;
            path.pop();
        }
        Edit::Combine(first, second) => {
            let id = apply_at(tree, id, first, diagnostics, path, report)?;
            return apply_at(tree, id, second, diagnostics, path, report);
        }
    }
    Ok(id)
}

fn redundant(
    diagnostics: &Diagnostics,
    report: &mut ApplyReport,
    path: &[Side],
    id: NodeId,
    message: &'static str,
) {
    report.redundant += 1;
    if diagnostics.redundant_updates {
        tracing::warn!(?path, node = %id, "{message}");
    }
}
