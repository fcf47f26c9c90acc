//! Input abstraction layer.
//!
//! The host classifies every pointer press (handle, node body, or
//! background) and forwards it together with pointer coordinates. Moves and
//! releases carry no target: they always act on the gesture in progress.

use sp_core::NodeId;
use sp_core::geometry::Handle;
use sp_render::hit::{Hit, HitPart};

/// What a pointer press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    ResizeHandle(NodeId, Handle),
    RotateHandle(NodeId),
    Body(NodeId),
    Background,
}

impl PointerTarget {
    pub fn node(&self) -> Option<NodeId> {
        match *self {
            Self::ResizeHandle(id, _) | Self::RotateHandle(id) | Self::Body(id) => Some(id),
            Self::Background => None,
        }
    }
}

impl From<Option<Hit>> for PointerTarget {
    fn from(hit: Option<Hit>) -> Self {
        match hit {
            Some(Hit {
                node_id,
                part: HitPart::Body,
            }) => Self::Body(node_id),
            Some(Hit {
                node_id,
                part: HitPart::ResizeHandle(h),
            }) => Self::ResizeHandle(node_id, h),
            Some(Hit {
                node_id,
                part: HitPart::RotateHandle,
            }) => Self::RotateHandle(node_id),
            None => Self::Background,
        }
    }
}

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on most platforms, ⌘ on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A normalized host event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        x: f64,
        y: f64,
        target: PointerTarget,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp,
    Key {
        key: String,
        modifiers: Modifiers,
        /// Focus is inside a text-editing context; the key must be ignored.
        editing_text: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_converts_to_target() {
        let id = NodeId::new(4);
        let hit = Some(Hit {
            node_id: id,
            part: HitPart::ResizeHandle(Handle::TopRight),
        });
        assert_eq!(
            PointerTarget::from(hit),
            PointerTarget::ResizeHandle(id, Handle::TopRight)
        );
        assert_eq!(PointerTarget::from(None), PointerTarget::Background);
        assert_eq!(PointerTarget::Body(id).node(), Some(id));
    }
}
