//! Tool modes.
//!
//! | Tool | press on node | press on handle | press on background |
//! |------|---------------|-----------------|---------------------|
//! | **Select** | select + drag | resize / rotate | deselect |
//! | **Pan** | pan | pan | pan |

/// The active tool determines how pointer presses are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Pan,
}

impl ToolKind {
    /// Whether nodes can be selected and transformed under this tool.
    pub fn is_editing(self) -> bool {
        matches!(self, ToolKind::Select)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Pan => "pan",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "select" => Some(ToolKind::Select),
            "pan" => Some(ToolKind::Pan),
            _ => None,
        }
    }
}
