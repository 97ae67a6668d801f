//! The single-step driver.
//!
//! [`Runtime`] owns the live tree and the application-state slot. It is the
//! only mutator of both. Every call to [`Runtime::handle`] runs to completion
//! before the next one may start; a nested call made while a step is in
//! progress finds the slot busy and is dropped.

use std::cell::{Ref, RefCell, RefMut};

use thiserror::Error;

use crate::edit::Edit;
use crate::host::{HostError, LiveTree, NodeId};
use crate::render::{self, DescribeError};
use crate::router::{self, RouteError};
use crate::state::{Application, ApplicationState};
use crate::update::{self, ApplyReport, Diagnostics, UpdateError};
use crate::widget::{Widget, WidgetError};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("initial widget is invalid: {0}")]
    InvalidInitialWidget(#[from] WidgetError),

    #[error("failed to route action: {0}")]
    Route(#[from] RouteError),

    #[error("application produced an edit that does not fit the live tree: {0}")]
    Update(#[from] UpdateError),

    #[error(transparent)]
    Describe(#[from] DescribeError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error("nothing is mounted under the host root")]
    NotMounted,

    #[error("runtime halted after an earlier failure")]
    Halted,
}

/// Outcome of one accepted or rejected action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The state produced an edit and it was applied.
    Applied(ApplyReport),
    /// The state produced no edit.
    Unchanged,
    /// Another action was still being processed; this one was discarded.
    Dropped,
}

/// Contents of the application-state slot.
enum Slot {
    Ready(Box<dyn ApplicationState>),
    /// A step is running and owns the state.
    Busy,
    /// A step produced an unusable edit; its next state was discarded.
    Halted,
}

/// Halts the slot if the application panics inside `step`, so later
/// actions fail with [`RuntimeError::Halted`] instead of finding it busy.
struct HaltOnUnwind<'a> {
    slot: &'a RefCell<Slot>,
}

impl Drop for HaltOnUnwind<'_> {
    fn drop(&mut self) {
        tracing::error!("application step panicked; halting");
        if let Ok(mut slot) = self.slot.try_borrow_mut() {
            *slot = Slot::Halted;
        }
    }
}

pub struct Runtime {
    tree: RefCell<LiveTree>,
    slot: RefCell<Slot>,
    diagnostics: Diagnostics,
}

impl Runtime {
    /// Bootstrap: ask the application for its initial widget and state,
    /// mount the widget and install the state.
    pub fn start(app: impl Application, diagnostics: Diagnostics) -> Result<Self, RuntimeError> {
        let (widget, state) = app.start();
        widget.validate()?;
        let mut tree = LiveTree::new();
        let root = render::mount(&mut tree, &widget)?;
        tracing::info!(node = %root, nodes = tree.len(), "application mounted");
        Ok(Self {
            tree: RefCell::new(tree),
            slot: RefCell::new(Slot::Ready(state)),
            diagnostics,
        })
    }

    /// Route `action` raised at `node`, step the application with it and
    /// apply whatever edit comes back.
    pub fn handle(&self, node: NodeId, action: impl Into<Edit>) -> Result<Dispatch, RuntimeError> {
        let root_edit = {
            let tree = self.tree.borrow();
            router::route_event(&tree, node, action)?
        };

        let taken = std::mem::replace(&mut *self.slot.borrow_mut(), Slot::Busy);
        let state = match taken {
            Slot::Ready(state) => state,
            Slot::Busy => {
                tracing::debug!(%node, edit = ?root_edit, "action dropped: a step is in progress");
                return Ok(Dispatch::Dropped);
            }
            Slot::Halted => {
                *self.slot.borrow_mut() = Slot::Halted;
                return Err(RuntimeError::Halted);
            }
        };

        let guard = HaltOnUnwind { slot: &self.slot };
        let (output, next) = state.step(Some(root_edit));
        std::mem::forget(guard);

        let Some(output) = output else {
            *self.slot.borrow_mut() = Slot::Ready(next);
            return Ok(Dispatch::Unchanged);
        };

        let applied = {
            let mut tree = self.tree.borrow_mut();
            let live_root = tree.first_child(tree.root());
            match live_root {
                Ok(Some(live_root)) => {
                    update::apply(&mut tree, live_root, &output, &self.diagnostics)
                        .map_err(RuntimeError::from)
                }
                Ok(None) => Err(RuntimeError::NotMounted),
                Err(err) => Err(err.into()),
            }
        };

        match applied {
            Ok(report) => {
                tracing::debug!(
                    touched = report.touched,
                    redundant = report.redundant,
                    replaced = report.replaced,
                    "output applied"
                );
                *self.slot.borrow_mut() = Slot::Ready(next);
                Ok(Dispatch::Applied(report))
            }
            Err(err) => {
                tracing::error!(error = %err, edit = ?output, "rejected application output; halting");
                drop(next);
                *self.slot.borrow_mut() = Slot::Halted;
                Err(err)
            }
        }
    }

    /// The top node of the mounted application.
    pub fn live_root(&self) -> Result<NodeId, RuntimeError> {
        let tree = self.tree.borrow();
        tree.first_child(tree.root())?
            .ok_or(RuntimeError::NotMounted)
    }

    /// What the live tree currently shows, as a widget.
    pub fn describe_root(&self) -> Result<Widget, RuntimeError> {
        let root = self.live_root()?;
        Ok(render::describe(&self.tree.borrow(), root)?)
    }

    pub fn tree(&self) -> Ref<'_, LiveTree> {
        self.tree.borrow()
    }

    /// Mutable access for the host, which performs a control's native state
    /// change (typed text, flipped check box) before reporting the action.
    pub fn tree_mut(&self) -> RefMut<'_, LiveTree> {
        self.tree.borrow_mut()
    }

    pub fn is_halted(&self) -> bool {
        matches!(*self.slot.borrow(), Slot::Halted)
    }

    /// True while a step is running.
    pub fn is_busy(&self) -> bool {
        matches!(*self.slot.borrow(), Slot::Busy)
    }
}
