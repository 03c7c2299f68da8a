//! Key-value preference storage contracts and adapters.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

/// Host service for durable key-value slots (JSON stored as text per key).
///
/// Calls are synchronous: the browser `localStorage` API this models never suspends, and the
/// window manager applies every mutation within the input event that caused it.
pub trait PrefsStore {
    /// Loads the raw JSON string stored under `key`.
    fn load_pref(&self, key: &str) -> Result<Option<String>, String>;

    /// Saves a raw JSON string under `key`, replacing any previous value.
    fn save_pref(&self, key: &str, raw_json: &str) -> Result<(), String>;

    /// Deletes `key`.
    fn delete_pref(&self, key: &str) -> Result<(), String>;
}

impl<S: PrefsStore + ?Sized> PrefsStore for Rc<S> {
    fn load_pref(&self, key: &str) -> Result<Option<String>, String> {
        (**self).load_pref(key)
    }

    fn save_pref(&self, key: &str, raw_json: &str) -> Result<(), String> {
        (**self).save_pref(key, raw_json)
    }

    fn delete_pref(&self, key: &str) -> Result<(), String> {
        (**self).delete_pref(key)
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op preference store for unsupported targets and baseline tests.
pub struct NoopPrefsStore;

impl PrefsStore for NoopPrefsStore {
    fn load_pref(&self, _key: &str) -> Result<Option<String>, String> {
        Ok(None)
    }

    fn save_pref(&self, _key: &str, _raw_json: &str) -> Result<(), String> {
        Ok(())
    }

    fn delete_pref(&self, _key: &str) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory preference store keyed by string.
///
/// Clones share the same backing map, so a clone handed to the runtime can be inspected by the
/// host (or a test) afterwards. An optional quota rejects writes whose total stored size would
/// exceed it, mirroring browser storage limits.
pub struct MemoryPrefsStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
    quota_bytes: Option<usize>,
}

impl MemoryPrefsStore {
    /// Creates a store that rejects writes once the stored values exceed `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            inner: Rc::default(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns `true` when no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load_pref(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn save_pref(&self, key: &str, raw_json: &str) -> Result<(), String> {
        let mut inner = self.inner.borrow_mut();
        if let Some(quota) = self.quota_bytes {
            let others: usize = inner
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();
            if others + raw_json.len() > quota {
                return Err(format!("quota exceeded writing `{key}`"));
            }
        }
        inner.insert(key.to_string(), raw_json.to_string());
        Ok(())
    }

    fn delete_pref(&self, key: &str) -> Result<(), String> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn memory_prefs_store_round_trip_and_delete() {
        let store = MemoryPrefsStore::default();
        let store_obj: &dyn PrefsStore = &store;

        store_obj.save_pref("pref.key", "{\"k\":1}").expect("save");
        assert_eq!(
            store_obj.load_pref("pref.key").expect("load"),
            Some("{\"k\":1}".to_string())
        );
        store_obj.delete_pref("pref.key").expect("delete");
        assert_eq!(store_obj.load_pref("pref.key").expect("load"), None);
    }

    #[test]
    fn clones_share_backing_map() {
        let store = MemoryPrefsStore::default();
        let handle = store.clone();
        store.save_pref("a", "1").expect("save");
        assert_eq!(handle.load_pref("a").expect("load"), Some("1".to_string()));
        assert_eq!(handle.len(), 1);
    }

    #[test]
    fn quota_rejects_oversized_writes_and_keeps_previous_value() {
        let store = MemoryPrefsStore::with_quota(8);
        store.save_pref("slot", "[1,2]").expect("fits");
        let err = store.save_pref("slot", "[1,2,3,4,5]").expect_err("over quota");
        assert!(err.contains("quota"), "unexpected error: {err}");
        assert_eq!(store.load_pref("slot").expect("load"), Some("[1,2]".to_string()));
    }

    #[test]
    fn quota_ignores_value_being_replaced() {
        let store = MemoryPrefsStore::with_quota(6);
        store.save_pref("slot", "123456").expect("fits exactly");
        store.save_pref("slot", "654321").expect("replacement fits");
    }

    #[test]
    fn noop_prefs_store_is_empty_and_successful() {
        let store = NoopPrefsStore;
        let store_obj: &dyn PrefsStore = &store;
        assert_eq!(store_obj.load_pref("k").expect("load"), None);
        store_obj.save_pref("k", "{}").expect("save");
        store_obj.delete_pref("k").expect("delete");
    }
}
