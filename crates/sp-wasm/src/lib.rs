//! WASM bridge for Scenepad: exposes the editor controller to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the DOM; it
//! forwards pointer and key events here and re-renders from the JSON this
//! module hands back.

mod protocol;
mod storage;

use rand::SeedableRng;
use rand::rngs::StdRng;
use sp_core::geometry::Surface;
use sp_core::{EditorConfig, NodeId, NodeKind, Snapshot};
use sp_editor::{Editor, ExportFile, Modifiers, PointerTarget, PropertyField, ToolKind};
use sp_render::hit::hit_test;
use storage::LocalStore;
use wasm_bindgen::prelude::*;

pub use protocol::parse_target;

/// The main WASM-facing editor controller.
#[wasm_bindgen]
pub struct ScenePad {
    editor: Editor<LocalStore>,
    rng: StdRng,
}

#[wasm_bindgen]
impl ScenePad {
    /// Create an editor over a `width`×`height` surface and restore the
    /// autosaved document. `config_json` may be empty or a partial
    /// `EditorConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, config_json: &str) -> Self {
        console_setup();

        let config = if config_json.trim().is_empty() {
            EditorConfig::default()
        } else {
            EditorConfig::from_json(config_json).unwrap_or_else(|err| {
                log::warn!("invalid editor config, using defaults: {err}");
                EditorConfig::default()
            })
        };

        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
        Self {
            editor: Editor::open(Surface::new(width, height), config, LocalStore::from_window()),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The surface was resized or scrolled within the page.
    pub fn set_surface(&mut self, width: f64, height: f64, origin_x: f64, origin_y: f64) {
        self.editor
            .set_surface(Surface::new(width, height).with_origin(origin_x, origin_y));
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    /// Pointer down in page coordinates; the target is found by hit testing.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        let (lx, ly) = self.editor.surface().to_local(x, y);
        let hit = hit_test(self.editor.document(), self.editor.selected(), lx, ly);
        self.editor.pointer_down(x, y, PointerTarget::from(hit));
    }

    /// Pointer down on a target the page classified itself (see
    /// `parse_target`). Returns `false` if the target is not understood.
    pub fn pointer_down_on(&mut self, x: f64, y: f64, target: &str) -> bool {
        match parse_target(target) {
            Some(target) => {
                self.editor.pointer_down(x, y, target);
                true
            }
            None => {
                log::warn!("unknown pointer target `{target}`");
                false
            }
        }
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.editor.pointer_move(x, y);
    }

    pub fn pointer_up(&mut self) {
        self.editor.pointer_up();
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    /// Handle a `keydown`. Returns `true` if the key was bound, so the page
    /// can `preventDefault()`.
    pub fn handle_key(
        &mut self,
        key: &str,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
        editing_text: bool,
    ) -> bool {
        let modifiers = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        self.editor.handle_key(key, modifiers, editing_text)
    }

    // ─── Commands ────────────────────────────────────────────────────────

    /// Add a `rectangle` or `text` node at a random position. Returns its id.
    pub fn add_node(&mut self, kind: &str) -> Option<String> {
        let kind = NodeKind::parse(kind)?;
        Some(self.editor.add_node(kind, &mut self.rng).to_string())
    }

    pub fn remove_selected(&mut self) -> bool {
        self.editor.remove_selected()
    }

    pub fn select(&mut self, id: &str) -> bool {
        id.parse::<NodeId>()
            .is_ok_and(|id| self.editor.select(id))
    }

    pub fn deselect(&mut self) -> bool {
        self.editor.deselect()
    }

    pub fn set_tool(&mut self, name: &str) -> bool {
        let Some(tool) = ToolKind::parse(name) else {
            return false;
        };
        self.editor.set_tool(tool);
        true
    }

    pub fn move_up(&mut self) -> bool {
        self.editor.move_selected_up()
    }

    pub fn move_down(&mut self) -> bool {
        self.editor.move_selected_down()
    }

    pub fn bring_to_front(&mut self) -> bool {
        self.editor.bring_selected_to_front()
    }

    pub fn send_to_back(&mut self) -> bool {
        self.editor.send_selected_to_back()
    }

    /// Set a property on the selected node.
    /// Returns `true` if the node changed.
    pub fn set_property(&mut self, field: &str, value: &str) -> bool {
        let result = field
            .parse::<PropertyField>()
            .and_then(|field| self.editor.set_property(field, value));
        result.unwrap_or_else(|err| {
            log::warn!("property edit rejected: {err}");
            false
        })
    }

    /// Commit in-place text editing on node `id`.
    pub fn set_content(&mut self, id: &str, text: &str) -> bool {
        let Ok(id) = id.parse::<NodeId>() else {
            return false;
        };
        self.editor.set_content(id, text).unwrap_or_else(|err| {
            log::warn!("content edit rejected: {err}");
            false
        })
    }

    pub fn save(&mut self) {
        self.editor.save();
    }

    pub fn load(&mut self) -> usize {
        self.editor.load()
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// Nodes in paint order, in the snapshot record format.
    pub fn get_nodes(&self) -> String {
        Snapshot::capture(self.editor.document()).to_json()
    }

    /// The property panel for the selection, or `null`.
    pub fn get_properties(&self) -> String {
        protocol::properties_json(self.editor.property_view())
    }

    /// Layer panel rows, top-most first.
    pub fn get_layers(&self) -> String {
        protocol::layers_json(&self.editor.layer_list())
    }

    pub fn selected_id(&self) -> Option<String> {
        self.editor.selected().map(|id| id.to_string())
    }

    pub fn mode(&self) -> String {
        protocol::mode_name(self.editor.mode())
    }

    pub fn tool(&self) -> String {
        self.editor.tool().as_str().to_string()
    }

    pub fn scroll_x(&self) -> f64 {
        self.editor.scroll().0
    }

    pub fn scroll_y(&self) -> f64 {
        self.editor.scroll().1
    }

    /// Drain pending editor events as a JSON array.
    pub fn take_events(&mut self) -> String {
        protocol::events_json(self.editor.take_events())
    }

    // ─── Export ──────────────────────────────────────────────────────────

    /// Export as `{"filename": ..., "content": ...}` for the page to offer as
    /// a download. `format` is `html` or `json`.
    pub fn export(&self, format: &str) -> Option<String> {
        let mut files: Vec<ExportFile> = Vec::new();
        match format {
            "html" => self.editor.export_html(&mut files),
            "json" => self.editor.export_json(&mut files),
            _ => return None,
        }
        let file = files.pop()?;
        let content = String::from_utf8_lossy(&file.bytes);
        Some(serde_json::json!({ "filename": file.filename, "content": content }).to_string())
    }
}

/// Route panics and `log` output to the browser console.
fn console_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Scenepad WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
            let _ = console_log::init_with_level(log::Level::Debug);
        });
    }
}
