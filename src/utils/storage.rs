//! Key-value storage for persisted explorer state.
//!
//! [`KeyValueStore`] abstracts over localStorage so persisted state can be
//! exercised without a browser. Values are stored as JSON strings.

use serde::{Serialize, de::DeserializeOwned};

use super::dom;
use crate::core::error::StorageError;

/// String key-value storage.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Browser localStorage.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        dom::local_storage()?.get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = dom::local_storage().ok_or(StorageError::StorageUnavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| StorageError::WriteFailed)
    }
}

/// Get stored data.
///
/// Returns `None` if the key doesn't exist or deserialization fails.
pub fn get_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let json = store.get_item(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring corrupt stored value for '{}': {}", key, e);
            None
        }
    }
}

/// Store data as JSON.
pub fn set_json<T: Serialize>(
    store: &impl KeyValueStore,
    key: &str,
    data: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(data).map_err(|_| StorageError::SerializationFailed)?;
    store.set_item(key, &json)
}

/// In-memory store for tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    items: std::cell::RefCell<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_roundtrip_through_store() {
        let store = MemoryStore::default();
        set_json(&store, "k", &vec![1, 2, 3]).unwrap();
        assert_eq!(get_json::<Vec<i32>>(&store, "k"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_corrupt_value_reads_as_none() {
        let store = MemoryStore::default();
        store.set_item("k", "{not json").unwrap();
        assert_eq!(get_json::<Vec<i32>>(&store, "k"), None);
        assert_eq!(get_json::<Vec<i32>>(&store, "missing"), None);
    }
}
