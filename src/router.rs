//! Positional event routing.
//!
//! A raw action happens at some control deep inside the live tree. The
//! application only understands edits relative to the root, so the router
//! walks parent links up to the host root and wraps the action once per level
//! in `ModifyLeft` or `ModifyRight`.

use thiserror::Error;

use crate::edit::{Edit, Side};
use crate::host::{HostError, LiveTree, NodeId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error("node {0} is not attached to the host root")]
    Detached(NodeId),

    #[error("the host root itself cannot originate an action")]
    HostRoot,

    #[error("node {child} is child #{position} of {parent}; only two children are addressable")]
    NotAddressable {
        parent: NodeId,
        child: NodeId,
        position: usize,
    },
}

/// Path from the mounted widget (the host root's child) down to `node`.
pub fn path_to(tree: &LiveTree, node: NodeId) -> Result<Vec<Side>, RouteError> {
    let host_root = tree.root();
    if node == host_root {
        return Err(RouteError::HostRoot);
    }
    let mut path = Vec::new();
    let mut current = node;
    loop {
        let parent = tree.parent(current)?.ok_or(RouteError::Detached(node))?;
        if parent == host_root {
            break;
        }
        let position = tree
            .children(parent)?
            .iter()
            .position(|&c| c == current)
            .ok_or(RouteError::Detached(node))?;
        let side = match position {
            0 => Side::Left,
            1 => Side::Right,
            _ => {
                return Err(RouteError::NotAddressable {
                    parent,
                    child: current,
                    position,
                })
            }
        };
        path.push(side);
        current = parent;
    }
    path.reverse();
    Ok(path)
}

/// Rewrite `action`, raised at `node`, as an edit relative to the root.
pub fn route_event(
    tree: &LiveTree,
    node: NodeId,
    action: impl Into<Edit>,
) -> Result<Edit, RouteError> {
    let path = path_to(tree, node)?;
    let edit = Edit::at(&path, action.into());
    tracing::trace!(%node, depth = path.len(), ?edit, "routed action");
    Ok(edit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::Action;
    use crate::render::mount;
    use crate::widget::Widget;

    #[test]
    fn scenario_click_on_second_child() {
        let mut tree = LiveTree::new();
        let root = mount(
            &mut tree,
            &Widget::vbox(Widget::label("hi"), Widget::button("Go")),
        )
        .unwrap();
        let button = tree.second_child(root).unwrap().unwrap();
        let edit = route_event(&tree, button, Action::Click).unwrap();
        assert_eq!(edit, Edit::ModifyRight(Box::new(Edit::Click)));
    }

    #[test]
    fn mounted_root_routes_to_bare_action() {
        let mut tree = LiveTree::new();
        let root = mount(&mut tree, &Widget::checkbox(false)).unwrap();
        assert_eq!(
            route_event(&tree, root, Action::Toggle).unwrap(),
            Edit::ToggleChecked
        );
    }

    #[test]
    fn deep_paths_are_root_first() {
        let mut tree = LiveTree::new();
        let w = Widget::hbox(
            Widget::vbox(Widget::Empty, Widget::hbox(Widget::entry(3, "e", ""), Widget::Empty)),
            Widget::Empty,
        );
        let root = mount(&mut tree, &w).unwrap();
        let left = tree.first_child(root).unwrap().unwrap();
        let inner = tree.second_child(left).unwrap().unwrap();
        let entry = tree.first_child(inner).unwrap().unwrap();

        assert_eq!(
            path_to(&tree, entry).unwrap(),
            vec![Side::Left, Side::Right, Side::Left]
        );
        let edit = route_event(&tree, entry, Action::SetEntryContent("x".into())).unwrap();
        assert_eq!(
            edit.split_path(),
            (
                vec![Side::Left, Side::Right, Side::Left],
                Edit::SetEntryContent("x".into())
            )
        );
    }

    #[test]
    fn host_root_and_detached_nodes_are_rejected() {
        let mut tree = LiveTree::new();
        assert_eq!(
            route_event(&tree, tree.root(), Action::Click),
            Err(RouteError::HostRoot)
        );
        let loose = tree.create_node(crate::host::Tag::Button);
        assert_eq!(
            route_event(&tree, loose, Action::Click),
            Err(RouteError::Detached(loose))
        );
    }
}
