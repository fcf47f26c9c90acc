//! `localStorage`-backed key-value store.

use sp_editor::{KeyValueStore, MemoryStore};

/// Autosave target in the browser. Falls back to memory when
/// `localStorage` is unavailable (private mode, sandboxed iframes).
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
    fallback: MemoryStore,
}

impl LocalStore {
    pub fn from_window() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage unavailable; document is kept in memory only");
        }
        Self {
            storage,
            fallback: MemoryStore::new(),
        }
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        match &self.storage {
            Some(storage) => storage.get_item(key).ok().flatten(),
            None => self.fallback.get(key),
        }
    }

    fn set(&mut self, key: &str, value: String) {
        match &self.storage {
            Some(storage) => {
                if let Err(err) = storage.set_item(key, &value) {
                    log::warn!("localStorage write to `{key}` failed: {err:?}");
                }
            }
            None => self.fallback.set(key, value),
        }
    }
}
