//! Snapshot format: the persisted form of a document.
//!
//! A snapshot is an ordered array of flat records, bottom-most node first.
//! Capture → JSON → restore reproduces ids, kinds, geometry, color, text,
//! and order.

use crate::document::Document;
use crate::id::NodeId;
use crate::model::{Color, Geometry, Node, NodeKind, Style};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid color `{color}` on {id}")]
    Color { id: NodeId, color: String },
    #[error("non-finite geometry on {0}")]
    Geometry(NodeId),
    #[error("{0} leaves no room for new ids")]
    Id(NodeId),
}

/// One node, flattened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub kind: NodeKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    pub color: String,
    /// Empty for non-text nodes.
    #[serde(default)]
    pub text: String,
}

impl NodeRecord {
    pub fn from_node(node: &Node) -> Self {
        let g = &node.geometry;
        Self {
            id: node.id,
            kind: node.kind,
            x: g.x,
            y: g.y,
            width: g.width,
            height: g.height,
            rotation: g.rotation,
            color: node.style.fill.to_hex(),
            text: if node.is_text() {
                node.content.clone()
            } else {
                String::new()
            },
        }
    }

    /// Rebuild the node. Sizes below `min_size` are floored.
    pub fn to_node(&self, min_size: f64) -> Result<Node, SnapshotError> {
        if !self.id.has_successor() {
            return Err(SnapshotError::Id(self.id));
        }
        let fill = Color::from_hex(&self.color).ok_or_else(|| SnapshotError::Color {
            id: self.id,
            color: self.color.clone(),
        })?;
        let values = [self.x, self.y, self.width, self.height, self.rotation];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(SnapshotError::Geometry(self.id));
        }

        let mut geometry = Geometry::new(self.x, self.y, self.width, self.height);
        geometry.rotation = self.rotation;
        geometry.clamp_size(min_size);

        Ok(Node {
            id: self.id,
            kind: self.kind,
            geometry,
            style: Style { fill },
            content: if self.kind == NodeKind::Text {
                self.text.clone()
            } else {
                String::new()
            },
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    pub records: Vec<NodeRecord>,
}

impl Snapshot {
    pub fn capture(doc: &Document) -> Self {
        Self {
            records: doc.iter().map(NodeRecord::from_node).collect(),
        }
    }

    pub fn to_json(&self) -> String {
        // A Vec of plain records has no map keys or non-string keys to fail on.
        serde_json::to_string(self).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a document from this snapshot, validating every record first.
    ///
    /// Either the whole snapshot restores or nothing does.
    pub fn restore(&self, min_size: f64) -> Result<Document, SnapshotError> {
        let nodes = self
            .records
            .iter()
            .map(|r| r.to_node(min_size))
            .collect::<Result<Vec<_>, _>>()?;

        let mut doc = Document::new();
        for node in nodes {
            doc.insert_restored(node);
        }
        Ok(doc)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
