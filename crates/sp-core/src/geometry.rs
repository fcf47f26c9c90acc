//! Geometry engine: pure transforms for drag, resize, rotate, and pan.
//!
//! Every function takes the snapshot captured when the gesture started plus
//! the *latest* pointer position, and returns the new value outright. Nothing
//! is accumulated frame to frame, so a long gesture cannot drift.

use crate::model::Geometry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Host rendering surface: its size and its origin in pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
    pub origin_x: f64,
    pub origin_y: f64,
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }

    pub fn with_origin(mut self, origin_x: f64, origin_y: f64) -> Self {
        self.origin_x = origin_x;
        self.origin_y = origin_y;
        self
    }

    /// Pointer coordinates → surface-local coordinates.
    pub fn to_local(&self, px: f64, py: f64) -> (f64, f64) {
        (px - self.origin_x, py - self.origin_y)
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// How far a dragged node may leave the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum DragBounds {
    /// Partial overhang allowed; at least `margin` units stay on-surface on
    /// every side: `x ∈ [margin - width, surface_width - margin]`.
    Soft { margin: f64 },
    /// The node stays fully inside the surface.
    Contained,
}

impl Default for DragBounds {
    fn default() -> Self {
        DragBounds::Soft { margin: 10.0 }
    }
}

/// Clamp `v` into `[lo, hi]`, preferring `lo` when the range is empty.
fn clamp_to(v: f64, lo: f64, hi: f64) -> f64 {
    v.min(hi).max(lo)
}

impl DragBounds {
    /// Clamp a proposed top-left corner for a node of the given size.
    pub fn clamp(&self, x: f64, y: f64, width: f64, height: f64, surface: &Surface) -> (f64, f64) {
        match *self {
            DragBounds::Soft { margin } => (
                clamp_to(x, margin - width, surface.width - margin),
                clamp_to(y, margin - height, surface.height - margin),
            ),
            DragBounds::Contained => (
                clamp_to(x, 0.0, surface.width - width),
                clamp_to(y, 0.0, surface.height - height),
            ),
        }
    }
}

// ─── Drag ────────────────────────────────────────────────────────────────

/// Drag snapshot: where inside the node the pointer grabbed it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStart {
    pub grab_dx: f64,
    pub grab_dy: f64,
}

impl DragStart {
    /// Capture the offset between the pointer and the node's top-left corner.
    pub fn capture(px: f64, py: f64, geometry: &Geometry, surface: &Surface) -> Self {
        let (lx, ly) = surface.to_local(px, py);
        Self {
            grab_dx: lx - geometry.x,
            grab_dy: ly - geometry.y,
        }
    }
}

/// New top-left corner for a drag, clamped by `bounds`.
pub fn drag_to(
    start: &DragStart,
    px: f64,
    py: f64,
    geometry: &Geometry,
    surface: &Surface,
    bounds: DragBounds,
) -> (f64, f64) {
    let (lx, ly) = surface.to_local(px, py);
    bounds.clamp(
        lx - start.grab_dx,
        ly - start.grab_dy,
        geometry.width,
        geometry.height,
        surface,
    )
}

// ─── Resize ──────────────────────────────────────────────────────────────

/// A corner resize handle. The opposite corner is the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Handle {
    pub const ALL: [Handle; 4] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Handle::TopLeft => "top-left",
            Handle::TopRight => "top-right",
            Handle::BottomLeft => "bottom-left",
            Handle::BottomRight => "bottom-right",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.as_str() == s)
    }

    /// Whether the handle moves the left edge.
    pub fn moves_left(self) -> bool {
        matches!(self, Handle::TopLeft | Handle::BottomLeft)
    }

    /// Whether the handle moves the top edge.
    pub fn moves_top(self) -> bool {
        matches!(self, Handle::TopLeft | Handle::TopRight)
    }

    /// Position of this corner on an unrotated box, as fractions of its size.
    pub fn unit_offset(self) -> (f64, f64) {
        match self {
            Handle::TopLeft => (0.0, 0.0),
            Handle::TopRight => (1.0, 0.0),
            Handle::BottomLeft => (0.0, 1.0),
            Handle::BottomRight => (1.0, 1.0),
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resize snapshot: pointer and geometry at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeStart {
    pub handle: Handle,
    pub pointer_x: f64,
    pub pointer_y: f64,
    pub geometry: Geometry,
}

/// Geometry after dragging `start.handle` to `(px, py)`.
///
/// Works in the node's unrotated frame. Width and height are floored at
/// `min_size` independently; x/y are *not* re-derived after the floor, so
/// shrinking a top or left handle past the minimum lets the anchor corner
/// drift by the overshoot.
pub fn resize_from(start: &ResizeStart, px: f64, py: f64, min_size: f64) -> Geometry {
    let dx = px - start.pointer_x;
    let dy = py - start.pointer_y;
    let g0 = start.geometry;
    let mut g = g0;

    if start.handle.moves_left() {
        g.width = g0.width - dx;
        g.x = g0.x + dx;
    } else {
        g.width = g0.width + dx;
    }

    if start.handle.moves_top() {
        g.height = g0.height - dy;
        g.y = g0.y + dy;
    } else {
        g.height = g0.height + dy;
    }

    g.clamp_size(min_size);
    g
}

// ─── Rotate ──────────────────────────────────────────────────────────────

/// Angle in degrees of the pointer around `(cx, cy)`.
pub fn pointer_angle(px: f64, py: f64, cx: f64, cy: f64) -> f64 {
    (py - cy).atan2(px - cx).to_degrees()
}

/// Rotation snapshot: pointer angle and node rotation at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateStart {
    pub start_angle: f64,
    pub start_rotation: f64,
}

impl RotateStart {
    pub fn capture(px: f64, py: f64, geometry: &Geometry) -> Self {
        let (cx, cy) = geometry.center();
        Self {
            start_angle: pointer_angle(px, py, cx, cy),
            start_rotation: geometry.rotation,
        }
    }
}

/// Rotation after moving the pointer to `(px, py)` around the node's
/// current center. Unbounded: no modulo-360.
pub fn rotate_from(start: &RotateStart, px: f64, py: f64, geometry: &Geometry) -> f64 {
    let (cx, cy) = geometry.center();
    start.start_rotation + (pointer_angle(px, py, cx, cy) - start.start_angle)
}

// ─── Pan ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanStart {
    pub pointer_x: f64,
    pub pointer_y: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

/// Scroll offset after panning to `(px, py)`.
pub fn pan_from(start: &PanStart, px: f64, py: f64) -> (f64, f64) {
    (
        start.scroll_x - (px - start.pointer_x),
        start.scroll_y - (py - start.pointer_y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn resize(handle: Handle, g: Geometry, dx: f64, dy: f64) -> Geometry {
        let start = ResizeStart {
            handle,
            pointer_x: 500.0,
            pointer_y: 500.0,
            geometry: g,
        };
        resize_from(&start, 500.0 + dx, 500.0 + dy, 20.0)
    }

    #[test]
    fn bottom_right_grows_in_place() {
        let g = resize(Handle::BottomRight, Geometry::new(30.0, 40.0, 80.0, 80.0), 20.0, 15.0);
        assert_eq!(g, Geometry::new(30.0, 40.0, 100.0, 95.0));
    }

    #[test]
    fn top_left_moves_origin() {
        let g = resize(Handle::TopLeft, Geometry::new(50.0, 50.0, 100.0, 100.0), 10.0, 10.0);
        assert_eq!(g, Geometry::new(60.0, 60.0, 90.0, 90.0));
    }

    #[test]
    fn bottom_left_and_top_right() {
        let base = Geometry::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(
            resize(Handle::BottomLeft, base, 10.0, 5.0),
            Geometry::new(10.0, 0.0, 90.0, 105.0)
        );
        assert_eq!(
            resize(Handle::TopRight, base, 10.0, 5.0),
            Geometry::new(0.0, 5.0, 110.0, 95.0)
        );
    }

    #[test]
    fn resize_floors_size_without_reanchoring() {
        // Shrinking 100 → -50 floors at 20, but x still follows the pointer.
        let g = resize(Handle::TopLeft, Geometry::new(0.0, 0.0, 100.0, 100.0), 150.0, 150.0);
        assert_eq!((g.width, g.height), (20.0, 20.0));
        assert_eq!((g.x, g.y), (150.0, 150.0));
    }

    #[test]
    fn resize_keeps_rotation() {
        let mut base = Geometry::new(0.0, 0.0, 50.0, 50.0);
        base.rotation = 33.0;
        assert_eq!(resize(Handle::BottomRight, base, 5.0, 5.0).rotation, 33.0);
    }

    #[test]
    fn soft_drag_keeps_margin_visible() {
        let surface = Surface::new(400.0, 300.0);
        let g = Geometry::new(0.0, 0.0, 80.0, 80.0);
        let start = DragStart::capture(10.0, 10.0, &g, &surface);
        let bounds = DragBounds::default();

        let (x, y) = drag_to(&start, -1000.0, -1000.0, &g, &surface, bounds);
        assert_eq!((x, y), (-70.0, -70.0));

        let (x, y) = drag_to(&start, 5000.0, 5000.0, &g, &surface, bounds);
        assert_eq!((x, y), (390.0, 290.0));
    }

    #[test]
    fn drag_respects_surface_origin() {
        let surface = Surface::new(400.0, 300.0).with_origin(100.0, 50.0);
        let g = Geometry::new(20.0, 20.0, 80.0, 80.0);
        let start = DragStart::capture(130.0, 75.0, &g, &surface);
        assert_eq!((start.grab_dx, start.grab_dy), (10.0, 5.0));
        let (x, y) = drag_to(&start, 170.0, 95.0, &g, &surface, DragBounds::default());
        assert_eq!((x, y), (60.0, 40.0));
    }

    #[test]
    fn contained_drag_hard_clamps() {
        let surface = Surface::new(400.0, 300.0);
        let bounds = DragBounds::Contained;
        assert_eq!(bounds.clamp(-5.0, 500.0, 80.0, 80.0, &surface), (0.0, 220.0));
        // Node larger than the surface pins to the origin.
        assert_eq!(bounds.clamp(50.0, 0.0, 900.0, 80.0, &surface), (0.0, 0.0));
    }

    #[test]
    fn rotation_is_delta_from_start() {
        let g = Geometry::new(0.0, 0.0, 100.0, 100.0);
        // Pointer straight right of center (50, 50) → 0°, straight below → 90°.
        let start = RotateStart::capture(100.0, 50.0, &g);
        let angle = rotate_from(&start, 50.0, 100.0, &g);
        assert!((angle - 90.0).abs() < EPS);
    }

    #[test]
    fn rotation_is_not_normalized() {
        let mut g = Geometry::new(0.0, 0.0, 100.0, 100.0);
        g.rotation = 350.0;
        let start = RotateStart::capture(100.0, 50.0, &g);
        let angle = rotate_from(&start, 50.0, 100.0, &g);
        assert!((angle - 440.0).abs() < EPS);
    }

    #[test]
    fn pan_moves_opposite_pointer() {
        let start = PanStart {
            pointer_x: 100.0,
            pointer_y: 100.0,
            scroll_x: 10.0,
            scroll_y: 0.0,
        };
        assert_eq!(pan_from(&start, 130.0, 80.0), (-20.0, 20.0));
    }

    #[test]
    fn handle_names_roundtrip() {
        for h in Handle::ALL {
            assert_eq!(Handle::parse(h.as_str()), Some(h));
        }
        assert_eq!(Handle::parse("middle"), None);
    }
}
