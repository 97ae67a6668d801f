//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use tempfile::TempDir;
use widget_rts::driver::Runtime;
use widget_rts::edit::{Edit, Side};
use widget_rts::host::{LiveTree, NodeId};
use widget_rts::render::mount;
use widget_rts::state::{ApplicationState, Continuation, Inert, Step};
use widget_rts::update::Diagnostics;
use widget_rts::widget::Widget;

/// Mount `widget` into a fresh live tree.
pub fn mounted(widget: &Widget) -> (LiveTree, NodeId) {
    let mut tree = LiveTree::new();
    let root = mount(&mut tree, widget).expect("mount failed");
    (tree, root)
}

/// Follow `path` from `root` through the live tree.
pub fn node_at(tree: &LiveTree, root: NodeId, path: &[Side]) -> NodeId {
    path.iter().fold(root, |id, side| {
        let child = match side {
            Side::Left => tree.first_child(id),
            Side::Right => tree.second_child(id),
        };
        child
            .expect("stale node on path")
            .expect("path leaves the tree")
    })
}

/// Start a runtime with diagnostics off.
pub fn start(widget: Widget, state: Box<dyn ApplicationState>) -> Runtime {
    Runtime::start(move || (widget, state), Diagnostics::quiet()).expect("runtime start failed")
}

/// The live node at `path` below the runtime's mounted root.
pub fn runtime_node(runtime: &Runtime, path: &[Side]) -> NodeId {
    let root = runtime.live_root().expect("nothing mounted");
    node_at(&runtime.tree(), root, path)
}

/// A state that records every input it sees and answers with the edits in
/// `outputs`, one per step, then with nothing.
pub fn scripted(log: Rc<RefCell<Vec<Edit>>>, mut outputs: Vec<Edit>) -> Box<dyn ApplicationState> {
    Continuation::boxed(move |input| {
        if let Some(edit) = input {
            log.borrow_mut().push(edit);
        }
        let output = if outputs.is_empty() {
            None
        } else {
            Some(outputs.remove(0))
        };
        (output, scripted(log, outputs))
    })
}

/// Create a temporary config file with the given TOML body.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
