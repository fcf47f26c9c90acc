//! The document: an ordered node list plus its id allocator.
//!
//! Index 0 is painted first (bottom-most); the last node is top-most.
//! List position is the only stacking authority; see [`crate::layers`].

use crate::id::{IdAllocator, NodeId};
use crate::model::{Node, NodeKind};

#[derive(Debug, Clone, Default)]
pub struct Document {
    pub(crate) nodes: Vec<Node>,
    pub(crate) ids: IdAllocator,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node with a fresh id and append it at the top.
    pub fn create(&mut self, kind: NodeKind, x: f64, y: f64) -> NodeId {
        let id = self.ids.next();
        self.nodes.push(Node::new(id, kind, x, y));
        log::debug!("created {} {id}", kind.as_str());
        id
    }

    /// Append a node that already has an id (e.g. restored from a snapshot).
    ///
    /// Advances the allocator past the node's id so future ids never collide.
    /// A node whose id is already present replaces nothing and is dropped.
    pub fn insert_restored(&mut self, node: Node) -> bool {
        if self.contains(node.id) {
            log::warn!("duplicate node id {} ignored", node.id);
            return false;
        }
        self.ids.advance_past(node.id);
        self.nodes.push(node);
        true
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index_of(id).is_some()
    }

    /// Remove a node by identity. Remaining nodes keep their relative order.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        let idx = self.index_of(id)?;
        Some(self.nodes.remove(idx))
    }

    /// Drop every node and reset the id counter.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.ids.reset();
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in paint order (bottom → top).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn ids(&self) -> Vec<NodeId> {
        self.nodes.iter().map(|n| n.id).collect()
    }

    pub fn id_allocator(&self) -> &IdAllocator {
        &self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn create_appends_on_top() {
        let mut doc = Document::new();
        let a = doc.create(NodeKind::Rectangle, 0.0, 0.0);
        let b = doc.create(NodeKind::Text, 0.0, 0.0);
        assert_eq!(doc.ids(), vec![a, b]);
        assert_eq!(doc.index_of(b), Some(1));
    }

    #[test]
    fn ids_not_reused_after_delete() {
        let mut doc = Document::new();
        let a = doc.create(NodeKind::Rectangle, 0.0, 0.0);
        doc.remove(a);
        let b = doc.create(NodeKind::Rectangle, 0.0, 0.0);
        assert_ne!(a, b);
        assert!(doc.get(a).is_none());
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut doc = Document::new();
        doc.create(NodeKind::Rectangle, 0.0, 0.0);
        assert!(doc.remove(NodeId::new(99)).is_none());
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn restored_nodes_advance_counter() {
        let mut doc = Document::new();
        let restored = Node::new(NodeId::new(12), NodeKind::Text, 0.0, 0.0);
        assert!(doc.insert_restored(restored.clone()));
        assert!(!doc.insert_restored(restored));
        let fresh = doc.create(NodeKind::Rectangle, 0.0, 0.0);
        assert_eq!(fresh, NodeId::new(13));
    }

    #[test]
    fn clear_resets_counter() {
        let mut doc = Document::new();
        doc.create(NodeKind::Rectangle, 0.0, 0.0);
        doc.create(NodeKind::Rectangle, 0.0, 0.0);
        doc.clear();
        assert!(doc.is_empty());
        assert_eq!(doc.create(NodeKind::Text, 0.0, 0.0), NodeId::new(1));
    }
}
