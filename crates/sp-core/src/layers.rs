//! Layer ordering on top of [`Document`].
//!
//! The node list is the stacking order. Z-indices are never stored; they are
//! derived as `list index + 1` whenever a caller asks for them, so they
//! cannot drift from the list.

use crate::document::Document;
use crate::id::NodeId;
use crate::model::NodeKind;

/// One row of a layer panel.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerEntry {
    pub id: NodeId,
    pub kind: NodeKind,
    pub label: String,
    pub z_index: u32,
}

fn z_of(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

impl Document {
    /// Swap the node with its higher neighbor. Returns `false` if it is
    /// already top-most or not in the document.
    pub fn move_up(&mut self, id: NodeId) -> bool {
        match self.index_of(id) {
            Some(idx) if idx + 1 < self.nodes.len() => {
                self.nodes.swap(idx, idx + 1);
                true
            }
            _ => false,
        }
    }

    /// Swap the node with its lower neighbor. Returns `false` if it is
    /// already bottom-most or not in the document.
    pub fn move_down(&mut self, id: NodeId) -> bool {
        match self.index_of(id) {
            Some(idx) if idx > 0 => {
                self.nodes.swap(idx, idx - 1);
                true
            }
            _ => false,
        }
    }

    pub fn bring_to_front(&mut self, id: NodeId) -> bool {
        match self.index_of(id) {
            Some(idx) if idx + 1 < self.nodes.len() => {
                let node = self.nodes.remove(idx);
                self.nodes.push(node);
                true
            }
            _ => false,
        }
    }

    pub fn send_to_back(&mut self, id: NodeId) -> bool {
        match self.index_of(id) {
            Some(idx) if idx > 0 => {
                let node = self.nodes.remove(idx);
                self.nodes.insert(0, node);
                true
            }
            _ => false,
        }
    }

    pub fn z_index(&self, id: NodeId) -> Option<u32> {
        self.index_of(id).map(z_of)
    }

    /// `(id, z-index)` pairs bottom → top. Applying this to the host in
    /// order is idempotent.
    pub fn paint_order(&self) -> Vec<(NodeId, u32)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id, z_of(i)))
            .collect()
    }

    /// Layer panel rows, top-most first.
    pub fn layer_list(&self) -> Vec<LayerEntry> {
        self.nodes
            .iter()
            .enumerate()
            .rev()
            .map(|(i, n)| LayerEntry {
                id: n.id,
                kind: n.kind,
                label: format!("{} {}", n.kind.label(), n.id.get()),
                z_index: z_of(i),
            })
            .collect()
    }
}
