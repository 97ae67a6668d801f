use crate::driver::{Dispatch, RuntimeError};
use crate::host::{LiveTree, NodeId};
use crate::render::{attr, kind_of};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

/// Frontend state of the terminal host: which control has focus and what the
/// status line says. The live tree itself belongs to the runtime.
pub struct App {
    title: String,
    outline: bool,
    should_quit: bool,
    focus: Option<NodeId>,
    status: Option<Status>,
    actions: u64,
}

impl App {
    pub fn new(title: impl Into<String>, outline: bool) -> Self {
        Self {
            title: title.into(),
            outline,
            should_quit: false,
            focus: None,
            status: None,
            actions: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn outline(&self) -> bool {
        self.outline
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn focus(&self) -> Option<NodeId> {
        self.focus
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn actions(&self) -> u64 {
        self.actions
    }

    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(Status {
            kind,
            text: text.into(),
        });
    }

    /// Enabled interactive controls in document order.
    pub fn focusable(tree: &LiveTree) -> Vec<NodeId> {
        let Ok(nodes) = tree.descendants(tree.root()) else {
            return Vec::new();
        };
        nodes
            .into_iter()
            .filter(|&id| {
                let interactive = kind_of(tree, id).is_ok_and(|kind| kind.is_interactive());
                let enabled = matches!(tree.attribute(id, attr::DISABLED), Ok(None));
                interactive && enabled
            })
            .collect()
    }

    /// Keep focus on a control that still exists and is enabled. Falls back
    /// to the first focusable control after a replacement or a disable.
    pub fn sync_focus(&mut self, tree: &LiveTree) {
        let focusable = Self::focusable(tree);
        if self.focus.is_some_and(|id| focusable.contains(&id)) {
            return;
        }
        self.focus = focusable.first().copied();
    }

    pub fn focus_next(&mut self, tree: &LiveTree) {
        self.cycle_focus(tree, 1);
    }

    pub fn focus_prev(&mut self, tree: &LiveTree) {
        self.cycle_focus(tree, -1);
    }

    fn cycle_focus(&mut self, tree: &LiveTree, step: isize) {
        let focusable = Self::focusable(tree);
        if focusable.is_empty() {
            self.focus = None;
            return;
        }
        let len = focusable.len() as isize;
        let next = match self.focus.and_then(|id| focusable.iter().position(|&f| f == id)) {
            Some(pos) => (pos as isize + step).rem_euclid(len),
            None if step < 0 => len - 1,
            None => 0,
        };
        self.focus = Some(focusable[next as usize]);
    }

    /// Reflect the outcome of one dispatched action in the status line.
    pub fn record(&mut self, outcome: Result<Dispatch, RuntimeError>) {
        self.actions += 1;
        match outcome {
            Ok(Dispatch::Applied(report)) if report.redundant > 0 => self.set_status(
                StatusKind::Warning,
                format!("{} redundant update(s) in last edit", report.redundant),
            ),
            Ok(Dispatch::Applied(report)) => self.set_status(
                StatusKind::Info,
                format!("applied: {} change(s)", report.touched),
            ),
            Ok(Dispatch::Unchanged) => self.status = None,
            Ok(Dispatch::Dropped) => {
                self.set_status(StatusKind::Warning, "action dropped while busy")
            }
            Err(err) => self.set_status(StatusKind::Error, err.to_string()),
        }
    }
}
