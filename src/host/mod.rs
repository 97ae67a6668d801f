//! The host visual-tree environment.
//!
//! A small DOM-like tree of nodes supporting attribute, text and class
//! mutation, child insertion and replacement. The renderer, the updater and
//! the router only talk to the live tree through this module.

mod tree;

pub use tree::{HostError, LiveTree, Node, NodeId, Tag};
