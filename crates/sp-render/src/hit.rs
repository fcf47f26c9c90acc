//! Hit testing: surface point → node part lookup.
//!
//! Handles of the selected node are checked first, then node bodies from
//! top-most to bottom-most. Points are mapped into each node's unrotated
//! frame, so rotated nodes hit where they are drawn.

use kurbo::{Affine, Point, Rect};
use sp_core::geometry::Handle;
use sp_core::{Document, Geometry, NodeId};

/// Hit radius around a handle, in surface units.
pub const HANDLE_RADIUS: f64 = 8.0;

/// Distance from the top edge to the rotate handle, before rotation.
pub const ROTATE_HANDLE_OFFSET: f64 = 24.0;

/// Which part of a node was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(Handle),
    RotateHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub node_id: NodeId,
    pub part: HitPart,
}

/// Rotation of the node about its center, as an affine map from its
/// unrotated frame to the surface.
pub fn node_transform(g: &Geometry) -> Affine {
    let (cx, cy) = g.center();
    Affine::rotate_about(g.rotation.to_radians(), Point::new(cx, cy))
}

/// Surface position of a resize handle.
pub fn handle_position(g: &Geometry, handle: Handle) -> Point {
    let (ux, uy) = handle.unit_offset();
    node_transform(g) * Point::new(g.x + ux * g.width, g.y + uy * g.height)
}

/// Surface position of the rotate handle (above the top edge's midpoint).
pub fn rotate_handle_position(g: &Geometry) -> Point {
    let (cx, _) = g.center();
    node_transform(g) * Point::new(cx, g.y - ROTATE_HANDLE_OFFSET)
}

fn body_contains(g: &Geometry, p: Point) -> bool {
    let local = node_transform(g).inverse() * p;
    Rect::new(g.x, g.y, g.x + g.width, g.y + g.height).contains(local)
}

/// Find what is under surface-local point `(px, py)`.
/// Returns `None` for the background.
pub fn hit_test(doc: &Document, selected: Option<NodeId>, px: f64, py: f64) -> Option<Hit> {
    let p = Point::new(px, py);

    if let Some(node) = selected.and_then(|id| doc.get(id)) {
        let g = &node.geometry;
        if rotate_handle_position(g).distance(p) <= HANDLE_RADIUS {
            return Some(Hit {
                node_id: node.id,
                part: HitPart::RotateHandle,
            });
        }
        if let Some(handle) = Handle::ALL
            .into_iter()
            .find(|h| handle_position(g, *h).distance(p) <= HANDLE_RADIUS)
        {
            return Some(Hit {
                node_id: node.id,
                part: HitPart::ResizeHandle(handle),
            });
        }
    }

    let hit = doc
        .iter()
        .rev()
        .find(|n| body_contains(&n.geometry, p))
        .map(|n| Hit {
            node_id: n.id,
            part: HitPart::Body,
        });
    log::trace!("hit ({px}, {py}) → {hit:?}");
    hit
}
