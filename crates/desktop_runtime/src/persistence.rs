//! Window-layout persistence over a durable key-value slot.
//!
//! Persistence is best-effort. [`PersistenceBridge::save`] and [`PersistenceBridge::load`] never
//! report failure to their caller: a failed write is logged and skipped, and a missing or
//! unreadable slot loads as an empty desktop. The `try_*` variants expose the underlying
//! [`PersistenceError`] for hosts that want to surface it.

use std::{collections::HashSet, fmt, rc::Rc};

use platform_host::PrefsStore;
use thiserror::Error;

use crate::model::{WindowId, WindowRecord};

#[derive(Debug, Error)]
/// Failure while reading or writing the layout slot.
pub enum PersistenceError {
    /// The key-value backend rejected the operation (quota, unavailable storage).
    #[error("storage backend failed: {0}")]
    Storage(String),
    /// The window list could not be serialized.
    #[error("failed to encode window layout: {0}")]
    Encode(#[source] serde_json::Error),
    /// The stored text is not a valid window list (bad JSON, wrong shape, duplicate ids).
    #[error("failed to decode window layout: {0}")]
    Decode(#[source] serde_json::Error),
}

#[derive(Clone)]
/// Serializes the window collection to and from one named slot of a [`PrefsStore`].
pub struct PersistenceBridge {
    store: Rc<dyn PrefsStore>,
    key: String,
}

impl fmt::Debug for PersistenceBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistenceBridge")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl PersistenceBridge {
    /// Creates a bridge writing to `key` in `store`.
    pub fn new(store: Rc<dyn PrefsStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Slot name used in the backing store.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Writes the full window list to the slot.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the backend write fails.
    pub fn try_save(&self, windows: &[WindowRecord]) -> Result<(), PersistenceError> {
        let raw = serde_json::to_string(windows).map_err(PersistenceError::Encode)?;
        self.store
            .save_pref(&self.key, &raw)
            .map_err(PersistenceError::Storage)
    }

    /// Reads the window list from the slot; a missing slot is an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend read fails, the stored text does not parse, or two
    /// records share an id.
    pub fn try_load(&self) -> Result<Vec<WindowRecord>, PersistenceError> {
        let Some(raw) = self
            .store
            .load_pref(&self.key)
            .map_err(PersistenceError::Storage)?
        else {
            return Ok(Vec::new());
        };
        let windows: Vec<WindowRecord> =
            serde_json::from_str(&raw).map_err(PersistenceError::Decode)?;
        if let Some(window_id) = first_duplicate_id(&windows) {
            return Err(PersistenceError::Decode(serde::de::Error::custom(
                format_args!("duplicate window id `{window_id}`"),
            )));
        }
        Ok(windows)
    }

    /// Fail-soft save: errors are logged and dropped.
    pub fn save(&self, windows: &[WindowRecord]) {
        if let Err(err) = self.try_save(windows) {
            leptos::logging::warn!("persist window layout `{}` failed: {err}", self.key);
        }
    }

    /// Fail-soft load: errors are logged and yield an empty collection.
    pub fn load(&self) -> Vec<WindowRecord> {
        match self.try_load() {
            Ok(windows) => windows,
            Err(err) => {
                leptos::logging::warn!("window layout `{}` load failed: {err}", self.key);
                Vec::new()
            }
        }
    }
}

fn first_duplicate_id(windows: &[WindowRecord]) -> Option<WindowId> {
    let mut seen = HashSet::with_capacity(windows.len());
    windows
        .iter()
        .map(|w| w.id)
        .find(|window_id| !seen.insert(*window_id))
}

#[cfg(test)]
mod tests {
    use platform_host::MemoryPrefsStore;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{
        WindowId, WindowPosition, WindowSize, BASE_Z_INDEX, DEFAULT_STORAGE_KEY,
    };

    struct BrokenStore;

    impl PrefsStore for BrokenStore {
        fn load_pref(&self, _key: &str) -> Result<Option<String>, String> {
            Err("storage disabled".to_string())
        }

        fn save_pref(&self, _key: &str, _raw_json: &str) -> Result<(), String> {
            Err("quota exceeded".to_string())
        }

        fn delete_pref(&self, _key: &str) -> Result<(), String> {
            Err("storage disabled".to_string())
        }
    }

    fn sample_windows() -> Vec<WindowRecord> {
        vec![
            WindowRecord {
                id: WindowId(1),
                title: "Document Editor".to_string(),
                icon: "📄".to_string(),
                position: WindowPosition { x: 12, y: 40 },
                size: WindowSize {
                    width: 640,
                    height: 480,
                },
                is_minimized: true,
                is_maximized: false,
                z_index: BASE_Z_INDEX,
                is_focused: false,
                created_at: 1_700_000_000_000,
            },
            WindowRecord {
                id: WindowId(2),
                title: "Image Viewer".to_string(),
                icon: "🎨".to_string(),
                position: WindowPosition { x: 100, y: 100 },
                size: WindowSize {
                    width: 600,
                    height: 400,
                },
                is_minimized: false,
                is_maximized: true,
                z_index: BASE_Z_INDEX + 4,
                is_focused: true,
                created_at: 1_700_000_000_500,
            },
        ]
    }

    fn bridge(store: &MemoryPrefsStore) -> PersistenceBridge {
        PersistenceBridge::new(Rc::new(store.clone()), DEFAULT_STORAGE_KEY)
    }

    #[test]
    fn save_then_load_round_trips_every_field() {
        let store = MemoryPrefsStore::default();
        let bridge = bridge(&store);
        bridge.save(&sample_windows());
        assert_eq!(bridge.load(), sample_windows());
    }

    #[test]
    fn saved_slot_is_a_json_array_of_records() {
        let store = MemoryPrefsStore::default();
        bridge(&store).save(&sample_windows());
        let raw = store
            .load_pref(DEFAULT_STORAGE_KEY)
            .expect("load")
            .expect("slot written");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        let first = &value.as_array().expect("array")[0];
        assert_eq!(first["isMinimized"], serde_json::json!(true));
        assert_eq!(first["zIndex"], serde_json::json!(1000));
        assert_eq!(first["size"]["width"], serde_json::json!(640));
    }

    #[test]
    fn missing_slot_loads_empty() {
        let store = MemoryPrefsStore::default();
        assert!(bridge(&store).load().is_empty());
    }

    #[test]
    fn corrupt_slot_loads_empty() {
        let store = MemoryPrefsStore::default();
        store
            .save_pref(DEFAULT_STORAGE_KEY, "{\"windows\": [")
            .expect("seed");
        let bridge = bridge(&store);
        assert!(matches!(bridge.try_load(), Err(PersistenceError::Decode(_))));
        assert!(bridge.load().is_empty());
    }

    #[test]
    fn wrong_shape_loads_empty() {
        let store = MemoryPrefsStore::default();
        store
            .save_pref(DEFAULT_STORAGE_KEY, "[{\"id\":\"not-a-number\"}]")
            .expect("seed");
        assert!(bridge(&store).load().is_empty());
    }

    #[test]
    fn backend_failures_are_swallowed() {
        let bridge = PersistenceBridge::new(Rc::new(BrokenStore), DEFAULT_STORAGE_KEY);
        bridge.save(&sample_windows());
        assert!(bridge.load().is_empty());
        assert!(matches!(
            bridge.try_save(&sample_windows()),
            Err(PersistenceError::Storage(msg)) if msg == "quota exceeded"
        ));
    }

    #[test]
    fn duplicate_ids_load_empty() {
        let store = MemoryPrefsStore::default();
        let mut windows = sample_windows();
        windows[1].id = windows[0].id;
        bridge(&store).save(&windows);

        let bridge = bridge(&store);
        let err = bridge.try_load().expect_err("duplicate ids rejected");
        assert!(matches!(err, PersistenceError::Decode(_)));
        assert!(err.to_string().contains("window-1"), "unexpected error: {err}");
        assert!(bridge.load().is_empty());
    }
}
