//! Editor configuration.

use crate::geometry::DragBounds;
use serde::{Deserialize, Serialize};

/// Default floor for node width and height.
pub const MIN_SIZE: f64 = 20.0;

/// Default key the document snapshot is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "scenepad.document";

/// Tunables for an editor session.
///
/// Deserializes from partial JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Smallest width/height any committed operation may leave. Default: **20**.
    pub min_size: f64,

    /// Drag boundary contract. Default: soft, 10-unit visible margin.
    pub drag_bounds: DragBounds,

    /// Key in the host store that holds the snapshot.
    pub storage_key: String,

    /// Arrow-key nudge distance. Default: **1**.
    pub nudge_step: f64,

    /// Arrow-key nudge distance with Shift held. Default: **10**.
    pub nudge_step_large: f64,

    /// Save after every committed mutation. Default: **true**.
    pub autosave: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_size: MIN_SIZE,
            drag_bounds: DragBounds::default(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            nudge_step: 1.0,
            nudge_step_large: 10.0,
            autosave: true,
        }
    }
}

impl EditorConfig {
    /// Parse a JSON config object. Unknown keys are ignored.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
