//! The interaction state machine.
//!
//! A `Gesture` lives from pointer-down to pointer-up. Each active variant
//! carries the snapshot taken at pointer-down; moves recompute the node's
//! geometry from that snapshot and the latest pointer position only. At most
//! one variant exists at a time, so transform modes are mutually exclusive
//! by construction.

use sp_core::geometry::{
    self, DragStart, Handle, PanStart, ResizeStart, RotateStart, Surface,
};
use sp_core::{Document, EditorConfig, NodeId};

/// The observable mode of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Dragging,
    Resizing(Handle),
    Rotating,
    Panning,
}

#[derive(Debug, Clone, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging {
        id: NodeId,
        start: DragStart,
        moved: bool,
    },
    Resizing {
        id: NodeId,
        start: ResizeStart,
        moved: bool,
    },
    Rotating {
        id: NodeId,
        start: RotateStart,
        moved: bool,
    },
    Panning {
        start: PanStart,
    },
}

/// Result of feeding one pointer-move into the active gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Idle, or the pointer moved without changing anything.
    Unchanged,
    /// The node's geometry changed.
    NodeChanged(NodeId),
    /// The scroll offset changed.
    Scrolled,
    /// The gesture's node no longer exists; the gesture was dropped.
    Lost,
}

impl Gesture {
    pub fn mode(&self) -> Mode {
        match self {
            Gesture::Idle => Mode::Idle,
            Gesture::Dragging { .. } => Mode::Dragging,
            Gesture::Resizing { start, .. } => Mode::Resizing(start.handle),
            Gesture::Rotating { .. } => Mode::Rotating,
            Gesture::Panning { .. } => Mode::Panning,
        }
    }

    /// The node this gesture transforms, if any.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Gesture::Dragging { id, .. }
            | Gesture::Resizing { id, .. }
            | Gesture::Rotating { id, .. } => Some(*id),
            Gesture::Idle | Gesture::Panning { .. } => None,
        }
    }

    /// Whether this is a node-editing gesture (drag, resize, rotate).
    pub fn is_edit(&self) -> bool {
        self.node().is_some()
    }

    /// Whether an edit gesture has changed its node at least once.
    pub fn has_mutated(&self) -> bool {
        match self {
            Gesture::Dragging { moved, .. }
            | Gesture::Resizing { moved, .. }
            | Gesture::Rotating { moved, .. } => *moved,
            Gesture::Idle | Gesture::Panning { .. } => false,
        }
    }

    /// Apply a pointer-move at `(px, py)` (pointer coordinates).
    ///
    /// Reads and writes go through `doc`, never through a cached copy of
    /// the node.
    pub fn apply_move(
        &mut self,
        doc: &mut Document,
        surface: &Surface,
        config: &EditorConfig,
        scroll: &mut (f64, f64),
        px: f64,
        py: f64,
    ) -> MoveOutcome {
        if let Gesture::Panning { start } = self {
            let next = geometry::pan_from(start, px, py);
            if next == *scroll {
                return MoveOutcome::Unchanged;
            }
            *scroll = next;
            return MoveOutcome::Scrolled;
        }

        let Some(id) = self.node() else {
            return MoveOutcome::Unchanged;
        };
        let Some(node) = doc.get_mut(id) else {
            log::debug!("gesture target {id} vanished; dropping gesture");
            *self = Gesture::Idle;
            return MoveOutcome::Lost;
        };

        let before = node.geometry;
        let g = &mut node.geometry;
        let moved = match self {
            Gesture::Dragging { start, moved, .. } => {
                (g.x, g.y) = geometry::drag_to(start, px, py, g, surface, config.drag_bounds);
                moved
            }
            Gesture::Resizing { start, moved, .. } => {
                let next = geometry::resize_from(start, px, py, config.min_size);
                (g.x, g.y, g.width, g.height) = (next.x, next.y, next.width, next.height);
                moved
            }
            Gesture::Rotating { start, moved, .. } => {
                let (lx, ly) = surface.to_local(px, py);
                g.rotation = geometry::rotate_from(start, lx, ly, g);
                moved
            }
            Gesture::Idle | Gesture::Panning { .. } => return MoveOutcome::Unchanged,
        };

        if node.geometry == before {
            return MoveOutcome::Unchanged;
        }
        *moved = true;
        log::trace!("{:?} {id} → {:?}", self.mode(), node.geometry);
        MoveOutcome::NodeChanged(id)
    }
}
