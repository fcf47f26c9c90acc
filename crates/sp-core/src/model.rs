//! Core data model for Scenepad documents.
//!
//! A document is a flat, ordered list of nodes (rectangles and text boxes).
//! Every node carries numeric geometry and a fill color; text nodes also
//! carry their content. Presentation units (pixels, CSS strings) only appear at the host
//! boundary; everything in here is plain numbers.

use crate::id::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Colors ──────────────────────────────────────────────────────────────

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB`, or `#RRGGBBAA`. The `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let bytes = hex.strip_prefix('#').unwrap_or(hex).as_bytes();

        let short = |i: usize| hex_val(bytes[i]).map(|v| v * 17);
        let long = |i: usize| Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?);

        match bytes.len() {
            3 => Some(Self::rgb(short(0)?, short(1)?, short(2)?)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgb(long(0)?, long(2)?, long(4)?)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// `#RRGGBB` when opaque, `#RRGGBBAA` otherwise.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ─── Node kinds ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Rectangle,
    Text,
}

impl NodeKind {
    /// Size a freshly added node of this kind gets.
    pub fn default_size(self) -> (f64, f64) {
        match self {
            NodeKind::Rectangle => (80.0, 80.0),
            NodeKind::Text => (120.0, 40.0),
        }
    }

    pub fn default_fill(self) -> Color {
        match self {
            NodeKind::Rectangle => Color::rgb(0x3B, 0x82, 0xF6),
            NodeKind::Text => Color::rgb(0xFF, 0xFF, 0xFF),
        }
    }

    pub fn default_content(self) -> &'static str {
        match self {
            NodeKind::Rectangle => "",
            NodeKind::Text => "Text Box",
        }
    }

    /// Human-readable label, used by the layer list.
    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Rectangle => "Rectangle",
            NodeKind::Text => "Text",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Rectangle => "rectangle",
            NodeKind::Text => "text",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "rectangle" | "rect" => Some(NodeKind::Rectangle),
            "text" => Some(NodeKind::Text),
            _ => None,
        }
    }
}

// ─── Geometry ────────────────────────────────────────────────────────────

/// Unrotated bounding box plus a rotation about its center.
///
/// `width`/`height` are the physical size of the node, not of its rotated
/// bounding box. `rotation` is in degrees and is never normalized.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
}

impl Geometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation: 0.0,
        }
    }

    /// Center of the bounding box, used as the rotation pivot.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Floor both dimensions at `min_size`.
    pub fn clamp_size(&mut self, min_size: f64) {
        self.width = self.width.max(min_size);
        self.height = self.height.max(min_size);
    }
}

// ─── Nodes ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub fill: Color,
}

/// One placed shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub geometry: Geometry,
    pub style: Style,
    /// Text content; empty and ignored unless `kind` is `Text`.
    pub content: String,
}

impl Node {
    /// A node of `kind` at `(x, y)` with the kind's default size, fill, and content.
    pub fn new(id: NodeId, kind: NodeKind, x: f64, y: f64) -> Self {
        let (width, height) = kind.default_size();
        Self {
            id,
            kind,
            geometry: Geometry::new(x, y, width, height),
            style: Style {
                fill: kind.default_fill(),
            },
            content: kind.default_content().to_string(),
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }
}
