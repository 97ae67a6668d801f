//! Arena-backed live visual tree.
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeId`]. Freed
//! slots are recycled through a free list; a stale id is detected by its
//! generation and rejected with [`HostError::StaleNode`].

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

/// Handle to a live node. Copyable and cheap to compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Element type of a live node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Div,
    Span,
    Button,
    Input,
    Select,
    Option,
}

impl Tag {
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Div => "div",
            Tag::Span => "span",
            Tag::Button => "button",
            Tag::Input => "input",
            Tag::Select => "select",
            Tag::Option => "option",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("node {0} no longer exists")]
    StaleNode(NodeId),

    #[error("node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    #[error("node {0} already has a parent")]
    AlreadyAttached(NodeId),

    #[error("the host root cannot be moved or removed")]
    RootImmovable,
}

/// Mutable state of a single live node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub tag: Tag,
    pub attributes: BTreeMap<String, String>,
    pub classes: BTreeSet<String>,
    pub text: String,
    /// Editable value of an input.
    pub value: String,
    pub checked: bool,
    /// Current option index of a select.
    pub selected: usize,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(tag: Tag) -> Self {
        Self {
            tag,
            attributes: BTreeMap::new(),
            classes: BTreeSet::new(),
            text: String::new(),
            value: String::new(),
            checked: false,
            selected: 0,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// The live tree. Slot 0 holds the host root, a `div` that owns the mounted
/// application and is never removed.
pub struct LiveTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
}

impl Default for LiveTree {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveTree {
    pub fn new() -> Self {
        let root = NodeId {
            index: 0,
            generation: 0,
        };
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(Node::new(Tag::Div)),
            }],
            free: Vec::new(),
            root,
        }
    }

    /// The host root container.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, the host root included.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_ok()
    }

    pub fn get(&self, id: NodeId) -> Result<&Node, HostError> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
            .ok_or(HostError::StaleNode(id))
    }

    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, HostError> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or(HostError::StaleNode(id))
    }

    /// Create a detached node.
    pub fn create_node(&mut self, tag: Tag) -> NodeId {
        let node = Node::new(tag);
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId {
                index,
                generation: 0,
            }
        }
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, HostError> {
        Ok(self.get(id)?.parent)
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId], HostError> {
        Ok(&self.get(id)?.children)
    }

    pub fn first_child(&self, id: NodeId) -> Result<Option<NodeId>, HostError> {
        Ok(self.get(id)?.children.first().copied())
    }

    pub fn second_child(&self, id: NodeId) -> Result<Option<NodeId>, HostError> {
        Ok(self.get(id)?.children.get(1).copied())
    }

    /// Attach a detached node as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), HostError> {
        if child == self.root {
            return Err(HostError::RootImmovable);
        }
        self.get(parent)?;
        if self.get(child)?.parent.is_some() {
            return Err(HostError::AlreadyAttached(child));
        }
        self.get_mut(child)?.parent = Some(parent);
        self.get_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Put the detached node `new` where `old` was under `parent`.
    ///
    /// `old` is left detached but alive; call [`LiveTree::remove_subtree`] to
    /// free it.
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        new: NodeId,
        old: NodeId,
    ) -> Result<(), HostError> {
        if new == self.root {
            return Err(HostError::RootImmovable);
        }
        if self.get(new)?.parent.is_some() {
            return Err(HostError::AlreadyAttached(new));
        }
        let position = self
            .get(parent)?
            .children
            .iter()
            .position(|&c| c == old)
            .ok_or(HostError::NotAChild { parent, child: old })?;
        self.get_mut(parent)?.children[position] = new;
        self.get_mut(new)?.parent = Some(parent);
        self.get_mut(old)?.parent = None;
        Ok(())
    }

    /// Detach `id` if needed and free it together with all descendants.
    pub fn remove_subtree(&mut self, id: NodeId) -> Result<(), HostError> {
        if id == self.root {
            return Err(HostError::RootImmovable);
        }
        if let Some(parent) = self.get(id)?.parent {
            self.get_mut(parent)?.children.retain(|&c| c != id);
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let slot = &mut self.slots[current.index as usize];
            if let Some(node) = slot.node.take() {
                stack.extend(node.children);
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(current.index);
            }
        }
        Ok(())
    }

    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), HostError> {
        self.get_mut(id)?
            .attributes
            .insert(name.to_string(), value.into());
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<(), HostError> {
        self.get_mut(id)?.attributes.remove(name);
        Ok(())
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Result<Option<&str>, HostError> {
        Ok(self.get(id)?.attribute(name))
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<(), HostError> {
        self.get_mut(id)?.text = text.into();
        Ok(())
    }

    pub fn text(&self, id: NodeId) -> Result<&str, HostError> {
        Ok(&self.get(id)?.text)
    }

    /// Add `class` if absent, remove it if present. Returns whether the class
    /// is set afterwards.
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> Result<bool, HostError> {
        let classes = &mut self.get_mut(id)?.classes;
        if classes.remove(class) {
            Ok(false)
        } else {
            classes.insert(class.to_string());
            Ok(true)
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> Result<bool, HostError> {
        Ok(self.get(id)?.has_class(class))
    }

    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) -> Result<(), HostError> {
        self.get_mut(id)?.value = value.into();
        Ok(())
    }

    pub fn value(&self, id: NodeId) -> Result<&str, HostError> {
        Ok(&self.get(id)?.value)
    }

    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> Result<(), HostError> {
        self.get_mut(id)?.checked = checked;
        Ok(())
    }

    pub fn checked(&self, id: NodeId) -> Result<bool, HostError> {
        Ok(self.get(id)?.checked)
    }

    pub fn set_selected(&mut self, id: NodeId, index: usize) -> Result<(), HostError> {
        self.get_mut(id)?.selected = index;
        Ok(())
    }

    pub fn selected(&self, id: NodeId) -> Result<usize, HostError> {
        Ok(self.get(id)?.selected)
    }

    /// Pre-order list of `id` and all its descendants.
    pub fn descendants(&self, id: NodeId) -> Result<Vec<NodeId>, HostError> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = self.get(current)?;
            out.push(current);
            stack.extend(node.children.iter().rev().copied());
        }
        Ok(out)
    }
}
