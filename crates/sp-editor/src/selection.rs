//! Selection and property-panel sync.
//!
//! The selection is a weak reference: it stores a node id, never the node.
//! The property view is rebuilt from the authoritative document on demand,
//! and property edits are written straight back into the node.

use smallvec::SmallVec;
use sp_core::geometry::Handle;
use sp_core::{Color, Node, NodeId, NodeKind};
use std::str::FromStr;

// ─── Selection ───────────────────────────────────────────────────────────

/// An interactive control attached to the selected node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoration {
    Resize(Handle),
    Rotate,
}

pub type Decorations = SmallVec<[Decoration; 5]>;

/// The single active node, plus the handles attached to it.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    active: Option<NodeId>,
    decorations: Decorations,
}

impl Selection {
    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    pub fn is_selected(&self, id: NodeId) -> bool {
        self.active == Some(id)
    }

    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    /// Make `id` the selection. Returns the previously selected node when it
    /// was a different one (its decorations are stripped).
    pub fn set(&mut self, id: NodeId) -> Option<NodeId> {
        if self.active == Some(id) {
            return None;
        }
        let previous = self.clear();
        self.active = Some(id);
        self.decorations = Handle::ALL
            .into_iter()
            .map(Decoration::Resize)
            .chain(std::iter::once(Decoration::Rotate))
            .collect();
        previous
    }

    /// Drop the selection and its decorations. Returns what was selected.
    pub fn clear(&mut self) -> Option<NodeId> {
        self.decorations.clear();
        self.active.take()
    }
}

// ─── Properties ──────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PropertyError {
    #[error("unknown property `{0}`")]
    UnknownField(String),
    #[error("`{value}` is not a number for `{field}`")]
    InvalidNumber { field: &'static str, value: String },
    #[error("`{0}` is not a color")]
    InvalidColor(String),
    #[error("{0} is not a text node")]
    NotText(NodeId),
}

/// An editable field of the property panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyField {
    X,
    Y,
    Width,
    Height,
    Rotation,
    Color,
    Content,
}

impl PropertyField {
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyField::X => "x",
            PropertyField::Y => "y",
            PropertyField::Width => "width",
            PropertyField::Height => "height",
            PropertyField::Rotation => "rotation",
            PropertyField::Color => "color",
            PropertyField::Content => "content",
        }
    }
}

impl FromStr for PropertyField {
    type Err = PropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(PropertyField::X),
            "y" => Ok(PropertyField::Y),
            "width" => Ok(PropertyField::Width),
            "height" => Ok(PropertyField::Height),
            "rotation" => Ok(PropertyField::Rotation),
            "color" | "fill" => Ok(PropertyField::Color),
            "content" | "text" => Ok(PropertyField::Content),
            _ => Err(PropertyError::UnknownField(s.to_string())),
        }
    }
}

/// Mirror of the selected node's editable fields.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyView {
    pub id: NodeId,
    pub kind: NodeKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub color: String,
    /// `None` for non-text nodes: the content field is hidden.
    pub content: Option<String>,
}

impl PropertyView {
    pub fn of(node: &Node) -> Self {
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
            content: node.is_text().then(|| node.content.clone()),
        }
    }
}

fn parse_number(field: PropertyField, value: &str) -> Result<f64, PropertyError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| PropertyError::InvalidNumber {
            field: field.as_str(),
            value: value.to_string(),
        })
}

/// Write `value` into `node`. Returns whether the node changed.
///
/// Width and height below `min_size` are floored, not rejected.
pub fn apply_property(
    node: &mut Node,
    field: PropertyField,
    value: &str,
    min_size: f64,
) -> Result<bool, PropertyError> {
    let g = &mut node.geometry;
    let slot = match field {
        PropertyField::X => &mut g.x,
        PropertyField::Y => &mut g.y,
        PropertyField::Width => &mut g.width,
        PropertyField::Height => &mut g.height,
        PropertyField::Rotation => &mut g.rotation,
        PropertyField::Color => {
            let color =
                Color::from_hex(value).ok_or_else(|| PropertyError::InvalidColor(value.to_string()))?;
            let changed = node.style.fill != color;
            node.style.fill = color;
            return Ok(changed);
        }
        PropertyField::Content => {
            if node.kind != NodeKind::Text {
                return Err(PropertyError::NotText(node.id));
            }
            let changed = node.content != value;
            node.content = value.to_string();
            return Ok(changed);
        }
    };

    let mut number = parse_number(field, value)?;
    if matches!(field, PropertyField::Width | PropertyField::Height) {
        number = number.max(min_size);
    }
    let changed = *slot != number;
    *slot = number;
    Ok(changed)
}
