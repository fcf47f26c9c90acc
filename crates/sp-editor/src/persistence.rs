//! Host storage and export seams.
//!
//! The editor never touches the filesystem or the browser directly. The
//! host injects a string key-value store (for autosave) and hands an
//! `ExportSink` to export calls.

use sp_core::{Document, Snapshot, SnapshotError};
use std::collections::HashMap;

/// A string key-value store, e.g. `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

/// In-memory store for native hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.set(key, value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }
}

/// Receives exported files for the user to download.
pub trait ExportSink {
    fn deliver(&mut self, filename: &str, bytes: &[u8]);
}

/// A delivered export, kept in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ExportSink for Vec<ExportFile> {
    fn deliver(&mut self, filename: &str, bytes: &[u8]) {
        self.push(ExportFile {
            filename: filename.to_string(),
            bytes: bytes.to_vec(),
        });
    }
}

/// Write the document's snapshot under `key`.
pub fn save_document<S: KeyValueStore + ?Sized>(store: &mut S, key: &str, doc: &Document) {
    let json = Snapshot::capture(doc).to_json();
    log::debug!("saving {} nodes ({} bytes) to `{key}`", doc.len(), json.len());
    store.set(key, json);
}

/// Read the document stored under `key`.
///
/// `Ok(None)` when nothing is stored; `Err` when the stored data is not a
/// valid snapshot.
pub fn load_document<S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
    min_size: f64,
) -> Result<Option<Document>, SnapshotError> {
    let Some(json) = store.get(key) else {
        return Ok(None);
    };
    let doc = Snapshot::from_json(&json)?.restore(min_size)?;
    Ok(Some(doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sp_core::{NodeId, NodeKind};

    #[test]
    fn save_then_load() {
        let mut doc = Document::new();
        doc.create(NodeKind::Rectangle, 1.0, 2.0);
        doc.create(NodeKind::Text, 3.0, 4.0);

        let mut store = MemoryStore::new();
        save_document(&mut store, "k", &doc);
        let loaded = load_document(&store, "k", 20.0)
            .expect("valid")
            .expect("present");
        assert_eq!(loaded.ids(), vec![NodeId::new(1), NodeId::new(2)]);
    }

    #[test]
    fn absent_and_malformed() {
        let store = MemoryStore::with_entry("k", "<<garbage>>");
        assert!(matches!(load_document(&store, "other", 20.0), Ok(None)));
        assert!(load_document(&store, "k", 20.0).is_err());
    }

    #[test]
    fn vec_sink_collects_files() {
        let mut sink: Vec<ExportFile> = Vec::new();
        sink.deliver("a.json", b"[]");
        assert_eq!(sink[0].filename, "a.json");
        assert_eq!(sink[0].bytes, b"[]");
    }
}
