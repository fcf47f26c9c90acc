//! String protocol between the JS host and the editor.
//!
//! Everything crossing the boundary is a plain string or JSON text, built
//! with `serde_json` so the host can `JSON.parse` it directly.

use serde_json::{Value, json};
use sp_core::geometry::Handle;
use sp_core::{LayerEntry, NodeId};
use sp_editor::{EditorEvent, Mode, PointerTarget, PropertyView};

/// Parse a host-classified pointer target.
///
/// Accepted forms: `background`, `body:<id>`, `rotate:<id>`,
/// `resize:<id>:<handle>` where `<id>` is `element-<n>` and `<handle>` is
/// `top-left`, `top-right`, `bottom-left` or `bottom-right`.
pub fn parse_target(s: &str) -> Option<PointerTarget> {
    let mut parts = s.split(':');
    let target = match (parts.next()?, parts.next(), parts.next()) {
        ("background", None, None) => PointerTarget::Background,
        ("body", Some(id), None) => PointerTarget::Body(id.parse().ok()?),
        ("rotate", Some(id), None) => PointerTarget::RotateHandle(id.parse().ok()?),
        ("resize", Some(id), Some(handle)) => {
            PointerTarget::ResizeHandle(id.parse().ok()?, Handle::parse(handle)?)
        }
        _ => return None,
    };
    parts.next().is_none().then_some(target)
}

pub fn mode_name(mode: Mode) -> String {
    match mode {
        Mode::Idle => "idle".into(),
        Mode::Dragging => "dragging".into(),
        Mode::Resizing(handle) => format!("resizing:{handle}"),
        Mode::Rotating => "rotating".into(),
        Mode::Panning => "panning".into(),
    }
}

fn event_json(event: EditorEvent) -> Value {
    let with_id = |kind: &str, id: NodeId| json!({ "type": kind, "id": id.to_string() });
    match event {
        EditorEvent::Selected(id) => with_id("selected", id),
        EditorEvent::Deselected(id) => with_id("deselected", id),
        EditorEvent::NodeAdded(id) => with_id("nodeAdded", id),
        EditorEvent::NodeChanged(id) => with_id("nodeChanged", id),
        EditorEvent::NodeRemoved(id) => with_id("nodeRemoved", id),
        EditorEvent::Restacked => json!({ "type": "restacked" }),
        EditorEvent::Scrolled => json!({ "type": "scrolled" }),
        EditorEvent::Saved => json!({ "type": "saved" }),
        EditorEvent::Loaded(count) => json!({ "type": "loaded", "count": count }),
    }
}

pub fn events_json(events: Vec<EditorEvent>) -> String {
    Value::Array(events.into_iter().map(event_json).collect()).to_string()
}

/// The property panel as JSON; `null` when nothing is selected.
pub fn properties_json(view: Option<PropertyView>) -> String {
    let Some(view) = view else {
        return "null".to_string();
    };
    let mut props = json!({
        "id": view.id.to_string(),
        "kind": view.kind.as_str(),
        "x": view.x,
        "y": view.y,
        "width": view.width,
        "height": view.height,
        "rotation": view.rotation,
        "color": view.color,
    });
    if let Some(content) = view.content {
        props["content"] = json!(content);
    }
    props.to_string()
}

pub fn layers_json(layers: &[LayerEntry]) -> String {
    let rows: Vec<Value> = layers
        .iter()
        .map(|layer| {
            json!({
                "id": layer.id.to_string(),
                "kind": layer.kind.as_str(),
                "label": layer.label,
                "zIndex": layer.z_index,
            })
        })
        .collect();
    Value::Array(rows).to_string()
}
