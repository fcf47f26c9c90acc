//! Integration tests: autosave into a host store and restore on open.

use pretty_assertions::assert_eq;
use sp_core::config::DEFAULT_STORAGE_KEY;
use sp_core::geometry::{Handle, Surface};
use sp_core::{Color, EditorConfig, NodeId, NodeKind};
use sp_editor::{
    Editor, EditorEvent, ExportFile, KeyValueStore, MemoryStore, PointerTarget, PropertyField,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn open(store: MemoryStore) -> Editor {
    init();
    Editor::open(Surface::new(800.0, 600.0), EditorConfig::default(), store)
}

/// An editor with three edited nodes, saved through normal commands.
fn populated() -> (Editor, [NodeId; 3]) {
    let mut ed = open(MemoryStore::new());
    let a = ed.add_node_at(NodeKind::Rectangle, 10.0, 20.0);
    let b = ed.add_node_at(NodeKind::Text, 300.0, 200.0);
    let c = ed.add_node_at(NodeKind::Rectangle, 500.0, 400.0);

    ed.select(a);
    ed.set_property(PropertyField::Rotation, "45.5").expect("rotation");
    ed.set_property(PropertyField::Color, "#10b981").expect("color");
    ed.select(b);
    ed.set_content(b, "Quarterly <plan> & notes").expect("content");
    ed.pointer_down(420.0, 240.0, PointerTarget::ResizeHandle(b, Handle::BottomRight));
    ed.pointer_move(450.0, 250.0);
    ed.pointer_up();
    ed.select(c);
    ed.send_selected_to_back();
    (ed, [a, b, c])
}

#[test]
fn reopen_restores_document() {
    let (ed, [a, b, c]) = populated();
    let mut restored = open(ed.store().clone());

    assert_eq!(restored.document().ids(), vec![c, a, b]);
    for (left, right) in ed.document().iter().zip(restored.document().iter()) {
        assert_eq!(left.id, right.id);
        assert_eq!(left.kind, right.kind);
        assert_eq!(left.style, right.style);
        assert_eq!(left.content, right.content);
        let (l, r) = (left.geometry, right.geometry);
        for (x, y) in [
            (l.x, r.x),
            (l.y, r.y),
            (l.width, r.width),
            (l.height, r.height),
            (l.rotation, r.rotation),
        ] {
            assert!((x - y).abs() < 1e-9, "{x} != {y}");
        }
    }

    let node = restored.document().get(b).expect("b restored");
    assert_eq!((node.geometry.width, node.geometry.height), (150.0, 50.0));
    assert_eq!(
        restored.document().get(a).expect("a restored").style.fill,
        Color::rgb(0x10, 0xb9, 0x81)
    );

    assert_eq!(restored.selected(), None);
    assert_eq!(restored.take_events(), vec![EditorEvent::Loaded(3)]);

    let next = restored.add_node_at(NodeKind::Text, 0.0, 0.0);
    assert_eq!(next, NodeId::new(4));
}

#[test]
fn each_completed_action_saves() {
    let mut ed = open(MemoryStore::new());
    ed.take_events();
    let saves = |ed: &mut Editor| {
        ed.take_events()
            .into_iter()
            .filter(|e| *e == EditorEvent::Saved)
            .count()
    };

    let a = ed.add_node_at(NodeKind::Rectangle, 0.0, 0.0);
    let b = ed.add_node_at(NodeKind::Rectangle, 100.0, 100.0);
    assert_eq!(saves(&mut ed), 2);

    ed.select(a);
    ed.move_selected_up();
    assert_eq!(saves(&mut ed), 1);

    ed.pointer_down(105.0, 105.0, PointerTarget::Body(b));
    ed.pointer_move(120.0, 120.0);
    ed.pointer_move(140.0, 130.0);
    assert_eq!(saves(&mut ed), 0);
    ed.pointer_up();
    assert_eq!(saves(&mut ed), 1);

    ed.set_property(PropertyField::Y, "12").expect("y");
    assert_eq!(saves(&mut ed), 1);

    ed.remove(a);
    assert_eq!(saves(&mut ed), 1);
}

#[test]
fn malformed_storage_starts_empty() {
    for garbage in [
        "not json",
        "{\"id\": 1}",
        r##"[{"id":"element-1","kind":"circle","x":0,"y":0,"width":1,"height":1,"color":"#fff"}]"##,
        r#"[{"id":"element-1","kind":"rectangle","x":0,"y":0,"width":1,"height":1,"color":"blue"}]"#,
    ] {
        let mut ed = open(MemoryStore::with_entry(DEFAULT_STORAGE_KEY, garbage));
        assert!(ed.document().is_empty(), "{garbage}");
        assert_eq!(ed.take_events(), vec![EditorEvent::Loaded(0)]);

        let id = ed.add_node_at(NodeKind::Rectangle, 0.0, 0.0);
        assert_eq!(id, NodeId::new(1));
    }
}

#[test]
fn exhausted_id_in_storage_starts_empty() {
    let json = format!(
        r##"[{{"id":"element-{}","kind":"rectangle","x":0,"y":0,"width":80,"height":80,"color":"#3B82F6"}}]"##,
        u64::MAX
    );
    let mut ed = open(MemoryStore::with_entry(DEFAULT_STORAGE_KEY, &json));
    assert!(ed.document().is_empty());
    assert_eq!(ed.take_events(), vec![EditorEvent::Loaded(0)]);

    let first = ed.add_node_at(NodeKind::Rectangle, 0.0, 0.0);
    let second = ed.add_node_at(NodeKind::Text, 10.0, 10.0);
    assert_eq!((first, second), (NodeId::new(1), NodeId::new(2)));
}

#[test]
fn load_floors_undersized_records() {
    let json = r##"[{"id":"element-7","kind":"text","x":1,"y":2,"width":3,"height":400,"color":"#FFFFFF","text":"hi"}]"##;
    let ed = open(MemoryStore::with_entry(DEFAULT_STORAGE_KEY, json));
    let node = ed.document().get(NodeId::new(7)).expect("restored");
    assert_eq!((node.geometry.width, node.geometry.height), (20.0, 400.0));
    assert_eq!(node.geometry.rotation, 0.0);
    assert_eq!(node.content, "hi");
}

#[test]
fn load_replaces_current_document() {
    let (ed, _) = populated();
    let saved = ed.store().clone();

    let mut other = open(MemoryStore::new());
    let stray = other.add_node_at(NodeKind::Rectangle, 0.0, 0.0);
    other.select(stray);
    *other.store_mut() = saved;
    other.take_events();

    assert_eq!(other.load(), 3);
    assert_eq!(
        other.take_events(),
        vec![EditorEvent::Deselected(stray), EditorEvent::Loaded(3)]
    );
    assert_eq!(other.document().len(), 3);
}

#[test]
fn custom_storage_key() {
    init();
    let config = EditorConfig {
        storage_key: "my-scene".to_string(),
        ..EditorConfig::default()
    };
    let mut ed = Editor::new(Surface::default(), config, MemoryStore::new());
    ed.add_node_at(NodeKind::Rectangle, 0.0, 0.0);
    assert!(ed.store().get("my-scene").is_some());
    assert_eq!(ed.store().get(DEFAULT_STORAGE_KEY), None);
}

#[test]
fn html_export_inlines_every_node() {
    let (ed, [a, b, c]) = populated();
    let mut sink: Vec<ExportFile> = Vec::new();
    ed.export_html(&mut sink);

    let html = String::from_utf8(sink.remove(0).bytes).expect("utf-8");
    for id in [a, b, c] {
        assert!(html.contains(&format!("id=\"{id}\"")), "{id} missing");
    }
    assert!(html.contains("Quarterly &lt;plan&gt; &amp; notes"));
    assert!(html.contains("transform:rotate(45.5deg)"));
    assert!(html.contains("z-index:1;"));
}
