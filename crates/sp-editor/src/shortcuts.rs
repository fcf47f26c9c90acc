//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. `key` is the
//! browser's `KeyboardEvent.key` value (e.g. `"ArrowLeft"`, `"Delete"`).

use crate::input::Modifiers;

/// Arrow direction for nudging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Unit vector in surface coordinates (y grows downward).
    pub fn unit(self) -> (f64, f64) {
        match self {
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
        }
    }
}

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Tool switching ──
    ToolSelect,
    ToolPan,

    // ── Edit ──
    Delete,
    Deselect,
    /// Move the selection one step; `large` when Shift is held.
    Nudge { direction: Direction, large: bool },

    // ── Z-order ──
    SendBackward,
    BringForward,
    SendToBack,
    BringToFront,
}

pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action, or `None` if unbound.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        let direction = match key {
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            _ => None,
        };
        if let Some(direction) = direction {
            return Some(ShortcutAction::Nudge {
                direction,
                large: modifiers.shift,
            });
        }

        if modifiers.command() {
            return match (key, modifiers.shift) {
                ("]" | "}", true) => Some(ShortcutAction::BringToFront),
                ("[" | "{", true) => Some(ShortcutAction::SendToBack),
                ("]", false) => Some(ShortcutAction::BringForward),
                ("[", false) => Some(ShortcutAction::SendBackward),
                _ => None,
            };
        }

        match key {
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "Escape" => Some(ShortcutAction::Deselect),
            "v" | "V" => Some(ShortcutAction::ToolSelect),
            "h" | "H" => Some(ShortcutAction::ToolPan),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };
    const CMD: Modifiers = Modifiers {
        meta: true,
        ..Modifiers::NONE
    };

    #[test]
    fn resolve_delete_and_escape() {
        assert_eq!(
            ShortcutMap::resolve("Delete", Modifiers::NONE),
            Some(ShortcutAction::Delete)
        );
        assert_eq!(
            ShortcutMap::resolve("Backspace", Modifiers::NONE),
            Some(ShortcutAction::Delete)
        );
        assert_eq!(
            ShortcutMap::resolve("Escape", Modifiers::NONE),
            Some(ShortcutAction::Deselect)
        );
    }

    #[test]
    fn resolve_arrows() {
        assert_eq!(
            ShortcutMap::resolve("ArrowLeft", Modifiers::NONE),
            Some(ShortcutAction::Nudge {
                direction: Direction::Left,
                large: false
            })
        );
        assert_eq!(
            ShortcutMap::resolve("ArrowDown", SHIFT),
            Some(ShortcutAction::Nudge {
                direction: Direction::Down,
                large: true
            })
        );
    }

    #[test]
    fn resolve_z_order() {
        assert_eq!(
            ShortcutMap::resolve("]", CMD),
            Some(ShortcutAction::BringForward)
        );
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        assert_eq!(
            ShortcutMap::resolve("[", ctrl),
            Some(ShortcutAction::SendBackward)
        );
        let cmd_shift = Modifiers { shift: true, ..CMD };
        assert_eq!(
            ShortcutMap::resolve("}", cmd_shift),
            Some(ShortcutAction::BringToFront)
        );
        assert_eq!(
            ShortcutMap::resolve("{", cmd_shift),
            Some(ShortcutAction::SendToBack)
        );
    }

    #[test]
    fn resolve_tools_and_unbound() {
        assert_eq!(
            ShortcutMap::resolve("v", Modifiers::NONE),
            Some(ShortcutAction::ToolSelect)
        );
        assert_eq!(
            ShortcutMap::resolve("h", Modifiers::NONE),
            Some(ShortcutAction::ToolPan)
        );
        assert_eq!(ShortcutMap::resolve("q", Modifiers::NONE), None);
        assert_eq!(ShortcutMap::resolve("Delete", CMD), None);
    }
}
