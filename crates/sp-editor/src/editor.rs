//! The editor controller.
//!
//! `Editor` owns the document, the selection, the in-flight gesture and the
//! host store. Every host event goes through it; the host re-renders from
//! the `EditorEvent`s it drains with [`Editor::take_events`].

use crate::gesture::{Gesture, Mode, MoveOutcome};
use crate::input::{InputEvent, Modifiers, PointerTarget};
use crate::persistence::{self, ExportSink, KeyValueStore, MemoryStore};
use crate::selection::{self, Decoration, PropertyError, PropertyField, PropertyView, Selection};
use crate::shortcuts::{Direction, ShortcutAction, ShortcutMap};
use crate::tools::ToolKind;
use rand::Rng;
use sp_core::geometry::{DragStart, PanStart, ResizeStart, RotateStart, Surface};
use sp_core::{Document, EditorConfig, LayerEntry, NodeId, NodeKind, Snapshot};

pub const HTML_EXPORT_FILENAME: &str = "scenepad-export.html";
pub const JSON_EXPORT_FILENAME: &str = "scenepad-export.json";

/// A change the host must reflect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    Selected(NodeId),
    Deselected(NodeId),
    NodeAdded(NodeId),
    /// Geometry, style or content changed.
    NodeChanged(NodeId),
    NodeRemoved(NodeId),
    /// Paint order changed; re-read [`Editor::paint_order`].
    Restacked,
    /// The pan offset changed; re-read [`Editor::scroll`].
    Scrolled,
    Saved,
    /// The document was replaced from the store with this many nodes.
    Loaded(usize),
}

pub struct Editor<S: KeyValueStore = MemoryStore> {
    document: Document,
    selection: Selection,
    gesture: Gesture,
    tool: ToolKind,
    scroll: (f64, f64),
    surface: Surface,
    config: EditorConfig,
    store: S,
    events: Vec<EditorEvent>,
}

impl<S: KeyValueStore> Editor<S> {
    /// An empty editor. Nothing is read from `store` until [`Editor::load`].
    pub fn new(surface: Surface, config: EditorConfig, store: S) -> Self {
        Self {
            document: Document::new(),
            selection: Selection::default(),
            gesture: Gesture::Idle,
            tool: ToolKind::Select,
            scroll: (0.0, 0.0),
            surface,
            config,
            store,
            events: Vec::new(),
        }
    }

    /// Create an editor and restore whatever the store holds.
    pub fn open(surface: Surface, config: EditorConfig, store: S) -> Self {
        let mut editor = Self::new(surface, config, store);
        editor.load();
        editor
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selection.active()
    }

    pub fn decorations(&self) -> &[Decoration] {
        self.selection.decorations()
    }

    pub fn mode(&self) -> Mode {
        self.gesture.mode()
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn scroll(&self) -> (f64, f64) {
        self.scroll
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The host surface was resized or moved.
    pub fn set_surface(&mut self, surface: Surface) {
        self.surface = surface;
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Drain the events queued since the last call.
    pub fn take_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn layer_list(&self) -> Vec<LayerEntry> {
        self.document.layer_list()
    }

    pub fn paint_order(&self) -> Vec<(NodeId, u32)> {
        self.document.paint_order()
    }

    /// The property panel for the selection; `None` clears the panel.
    pub fn property_view(&self) -> Option<PropertyView> {
        let id = self.selection.active()?;
        self.document.get(id).map(PropertyView::of)
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// Write the snapshot to the store unconditionally.
    pub fn save(&mut self) {
        persistence::save_document(&mut self.store, &self.config.storage_key, &self.document);
        self.events.push(EditorEvent::Saved);
    }

    /// Save if autosave is on. Called after every completed user action.
    fn commit(&mut self) {
        if self.config.autosave {
            self.save();
        }
    }

    /// Replace the document with the stored snapshot.
    ///
    /// Absent or malformed data yields an empty document; the error is
    /// logged, never returned. Returns the number of restored nodes.
    pub fn load(&mut self) -> usize {
        self.gesture = Gesture::Idle;
        if let Some(previous) = self.selection.clear() {
            self.events.push(EditorEvent::Deselected(previous));
        }

        let key = &self.config.storage_key;
        self.document = match persistence::load_document(&self.store, key, self.config.min_size) {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                log::debug!("no saved document under `{key}`");
                Document::new()
            }
            Err(err) => {
                log::warn!("discarding saved document under `{key}`: {err}");
                Document::new()
            }
        };

        let count = self.document.len();
        log::info!("loaded {count} nodes");
        self.events.push(EditorEvent::Loaded(count));
        count
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Dispatch a host event. Returns `false` for keys that were ignored.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::PointerDown { x, y, target } => {
                self.pointer_down(*x, *y, *target);
                true
            }
            InputEvent::PointerMove { x, y } => {
                self.pointer_move(*x, *y);
                true
            }
            InputEvent::PointerUp => {
                self.pointer_up();
                true
            }
            InputEvent::Key {
                key,
                modifiers,
                editing_text,
            } => self.handle_key(key, *modifiers, *editing_text),
        }
    }

    pub fn pointer_down(&mut self, x: f64, y: f64, target: PointerTarget) {
        if !self.tool.is_editing() {
            self.finish_gesture();
            self.gesture = Gesture::Panning {
                start: PanStart {
                    pointer_x: x,
                    pointer_y: y,
                    scroll_x: self.scroll.0,
                    scroll_y: self.scroll.1,
                },
            };
            log::debug!("pan start at ({x}, {y})");
            return;
        }

        // Handles only exist on the selected node.
        let target = match target {
            PointerTarget::ResizeHandle(id, _) | PointerTarget::RotateHandle(id)
                if !self.selection.is_selected(id) =>
            {
                PointerTarget::Body(id)
            }
            other => other,
        };

        match target {
            PointerTarget::Background => {
                self.finish_gesture();
                self.deselect();
            }
            PointerTarget::ResizeHandle(id, handle) => {
                let Some(node) = self.document.get(id) else {
                    return;
                };
                let start = ResizeStart {
                    handle,
                    pointer_x: x,
                    pointer_y: y,
                    geometry: node.geometry,
                };
                self.finish_gesture();
                self.gesture = Gesture::Resizing {
                    id,
                    start,
                    moved: false,
                };
                log::debug!("resize {id} from {handle}");
            }
            PointerTarget::RotateHandle(id) => {
                let Some(node) = self.document.get(id) else {
                    return;
                };
                let (lx, ly) = self.surface.to_local(x, y);
                let start = RotateStart::capture(lx, ly, &node.geometry);
                self.finish_gesture();
                self.gesture = Gesture::Rotating {
                    id,
                    start,
                    moved: false,
                };
                log::debug!("rotate {id} from {:.1}°", start.start_rotation);
            }
            PointerTarget::Body(id) => {
                if matches!(self.gesture.mode(), Mode::Resizing(_) | Mode::Rotating) {
                    return;
                }
                let Some(node) = self.document.get(id) else {
                    return;
                };
                let start = DragStart::capture(x, y, &node.geometry, &self.surface);
                self.finish_gesture();
                self.select(id);
                self.gesture = Gesture::Dragging {
                    id,
                    start,
                    moved: false,
                };
                log::debug!("drag {id}");
            }
        }
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let outcome = self.gesture.apply_move(
            &mut self.document,
            &self.surface,
            &self.config,
            &mut self.scroll,
            x,
            y,
        );
        match outcome {
            MoveOutcome::NodeChanged(id) => self.events.push(EditorEvent::NodeChanged(id)),
            MoveOutcome::Scrolled => self.events.push(EditorEvent::Scrolled),
            MoveOutcome::Unchanged | MoveOutcome::Lost => {}
        }
    }

    pub fn pointer_up(&mut self) {
        self.finish_gesture();
    }

    /// End the current gesture, committing it if it changed its node.
    fn finish_gesture(&mut self) {
        let gesture = std::mem::take(&mut self.gesture);
        if gesture.has_mutated() {
            if let Some(id) = gesture.node() {
                log::debug!("commit {:?} on {id}", gesture.mode());
            }
            self.commit();
        }
    }

    /// Run the shortcut bound to `key`. Keys typed into a text field are
    /// ignored. Returns whether the key was bound.
    pub fn handle_key(&mut self, key: &str, modifiers: Modifiers, editing_text: bool) -> bool {
        if editing_text {
            return false;
        }
        let Some(action) = ShortcutMap::resolve(key, modifiers) else {
            return false;
        };
        log::trace!("shortcut {key:?} → {action:?}");
        match action {
            ShortcutAction::ToolSelect => self.set_tool(ToolKind::Select),
            ShortcutAction::ToolPan => self.set_tool(ToolKind::Pan),
            ShortcutAction::Delete => {
                self.remove_selected();
            }
            ShortcutAction::Deselect => {
                self.deselect();
            }
            ShortcutAction::Nudge { direction, large } => {
                self.nudge(direction, large);
            }
            ShortcutAction::BringForward => {
                self.move_selected_up();
            }
            ShortcutAction::SendBackward => {
                self.move_selected_down();
            }
            ShortcutAction::BringToFront => {
                self.bring_selected_to_front();
            }
            ShortcutAction::SendToBack => {
                self.send_selected_to_back();
            }
        }
        true
    }

    // ─── Tools & selection ───────────────────────────────────────────────

    /// Switch tools. A non-editing tool drops the selection and ends any
    /// drag, resize or rotate in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.tool == tool {
            return;
        }
        log::debug!("tool {} → {}", self.tool.as_str(), tool.as_str());
        self.tool = tool;
        if !tool.is_editing() {
            self.deselect();
        }
    }

    /// Select `id`, deselecting the previous node first. A gesture on
    /// another node is committed and ended.
    ///
    /// Returns `false` if the node does not exist or the active tool cannot
    /// select. Reselecting the current node is a silent no-op.
    pub fn select(&mut self, id: NodeId) -> bool {
        if !self.tool.is_editing() || !self.document.contains(id) {
            return false;
        }
        if self.gesture.is_edit() && self.gesture.node() != Some(id) {
            self.finish_gesture();
        }
        if self.selection.is_selected(id) {
            return true;
        }
        if let Some(previous) = self.selection.set(id) {
            self.events.push(EditorEvent::Deselected(previous));
        }
        self.events.push(EditorEvent::Selected(id));
        true
    }

    /// Clear the selection, ending any drag, resize or rotate first.
    /// Returns whether anything was selected.
    pub fn deselect(&mut self) -> bool {
        if self.gesture.is_edit() {
            self.finish_gesture();
        }
        match self.selection.clear() {
            Some(previous) => {
                self.events.push(EditorEvent::Deselected(previous));
                true
            }
            None => false,
        }
    }

    // ─── Node commands ───────────────────────────────────────────────────

    /// Add a node of `kind` at a random spot where it fits on the surface.
    pub fn add_node(&mut self, kind: NodeKind, rng: &mut impl Rng) -> NodeId {
        let (width, height) = kind.default_size();
        let x = rng.random::<f64>() * (self.surface.width - width).max(0.0);
        let y = rng.random::<f64>() * (self.surface.height - height).max(0.0);
        self.add_node_at(kind, x.floor(), y.floor())
    }

    /// Add a node on top of the stack. The selection is left alone.
    pub fn add_node_at(&mut self, kind: NodeKind, x: f64, y: f64) -> NodeId {
        let id = self.document.create(kind, x, y);
        self.events.push(EditorEvent::NodeAdded(id));
        self.events.push(EditorEvent::Restacked);
        self.commit();
        id
    }

    pub fn remove(&mut self, id: NodeId) -> bool {
        if self.gesture.node() == Some(id) {
            self.gesture = Gesture::Idle;
        }
        if self.selection.is_selected(id) {
            self.deselect();
        }
        if self.document.remove(id).is_none() {
            return false;
        }
        log::debug!("removed {id}");
        self.events.push(EditorEvent::NodeRemoved(id));
        self.events.push(EditorEvent::Restacked);
        self.commit();
        true
    }

    pub fn remove_selected(&mut self) -> bool {
        match self.selection.active() {
            Some(id) => self.remove(id),
            None => false,
        }
    }

    /// Move the selection by one nudge step, honoring the drag bounds.
    pub fn nudge(&mut self, direction: Direction, large: bool) -> bool {
        let Some(id) = self.selection.active() else {
            return false;
        };
        let Some(node) = self.document.get_mut(id) else {
            return false;
        };
        let step = if large {
            self.config.nudge_step_large
        } else {
            self.config.nudge_step
        };
        let (ux, uy) = direction.unit();
        let g = &mut node.geometry;
        let (x, y) = self.config.drag_bounds.clamp(
            g.x + ux * step,
            g.y + uy * step,
            g.width,
            g.height,
            &self.surface,
        );
        if (x, y) == (g.x, g.y) {
            return false;
        }
        (g.x, g.y) = (x, y);
        self.events.push(EditorEvent::NodeChanged(id));
        self.commit();
        true
    }

    // ─── Layers ──────────────────────────────────────────────────────────

    fn restack_selected(&mut self, op: fn(&mut Document, NodeId) -> bool) -> bool {
        let Some(id) = self.selection.active() else {
            return false;
        };
        if !op(&mut self.document, id) {
            return false;
        }
        self.events.push(EditorEvent::Restacked);
        self.commit();
        true
    }

    pub fn move_selected_up(&mut self) -> bool {
        self.restack_selected(Document::move_up)
    }

    pub fn move_selected_down(&mut self) -> bool {
        self.restack_selected(Document::move_down)
    }

    pub fn bring_selected_to_front(&mut self) -> bool {
        self.restack_selected(Document::bring_to_front)
    }

    pub fn send_selected_to_back(&mut self) -> bool {
        self.restack_selected(Document::send_to_back)
    }

    // ─── Properties ──────────────────────────────────────────────────────

    /// Push a property-panel edit into the selected node.
    ///
    /// `Ok(false)` when nothing is selected or the value is unchanged.
    /// Rejected values leave the node untouched and do not save.
    pub fn set_property(&mut self, field: PropertyField, value: &str) -> Result<bool, PropertyError> {
        match self.selection.active() {
            Some(id) => self.edit_node(id, field, value),
            None => Ok(false),
        }
    }

    /// The host finished in-place text editing on `id`.
    pub fn set_content(&mut self, id: NodeId, text: &str) -> Result<bool, PropertyError> {
        self.edit_node(id, PropertyField::Content, text)
    }

    fn edit_node(
        &mut self,
        id: NodeId,
        field: PropertyField,
        value: &str,
    ) -> Result<bool, PropertyError> {
        let Some(node) = self.document.get_mut(id) else {
            return Ok(false);
        };
        if !selection::apply_property(node, field, value, self.config.min_size)? {
            return Ok(false);
        }
        log::debug!("{id}.{} = {value:?}", field.as_str());
        self.events.push(EditorEvent::NodeChanged(id));
        self.commit();
        Ok(true)
    }

    // ─── Export ──────────────────────────────────────────────────────────

    /// Deliver the read-only HTML page.
    pub fn export_html(&self, sink: &mut impl ExportSink) {
        let html = sp_render::export::render_html(&self.document, &self.surface);
        sink.deliver(HTML_EXPORT_FILENAME, html.as_bytes());
    }

    /// Deliver the snapshot as pretty-printed JSON.
    pub fn export_json(&self, sink: &mut impl ExportSink) {
        let json = Snapshot::capture(&self.document).to_json_pretty();
        log::info!("exporting {} nodes as JSON", self.document.len());
        sink.deliver(JSON_EXPORT_FILENAME, json.as_bytes());
    }
}
