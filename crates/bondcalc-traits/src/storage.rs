//! Storage traits for persistence.
//!
//! [`KeyValueStore`] is a string key to string value store, the shape of a
//! browser's local storage. Implementations are EXTENSIONS (JSON files,
//! in-memory maps).

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::TraitError;

/// Synchronous string key-value storage.
///
/// Methods take `&self`; implementations use interior mutability so a store
/// can be shared between sessions.
pub trait KeyValueStore: Send + Sync {
    /// Reads a value. `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, TraitError>;

    /// Writes a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), TraitError>;

    /// Deletes a value. Absent keys are not an error.
    fn remove(&self, key: &str) -> Result<(), TraitError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, TraitError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TraitError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), TraitError> {
        (**self).remove(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, TraitError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TraitError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), TraitError> {
        (**self).remove(key)
    }
}

/// Reads and deserializes a JSON value.
pub fn get_json<T, S>(store: &S, key: &str) -> Result<Option<T>, TraitError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serializes a value to JSON and writes it.
pub fn set_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), TraitError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MapStore(Mutex<HashMap<String, String>>);

    impl KeyValueStore for MapStore {
        fn get(&self, key: &str) -> Result<Option<String>, TraitError> {
            Ok(self.0.lock().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), TraitError> {
            self.0.lock().unwrap().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), TraitError> {
            self.0.lock().unwrap().remove(key);
            Ok(())
        }
    }

    #[test]
    fn test_json_helpers() {
        let store = MapStore::default();
        assert_eq!(get_json::<Vec<u32>, _>(&store, "k").unwrap(), None);

        set_json(&store, "k", &vec![1u32, 2, 3]).unwrap();
        assert_eq!(get_json::<Vec<u32>, _>(&store, "k").unwrap(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_corrupt_json_is_parse_error() {
        let store = MapStore::default();
        store.set("k", "{not json").unwrap();
        let err = get_json::<Vec<u32>, _>(&store, "k").unwrap_err();
        assert!(matches!(err, TraitError::ParseError(_)));
    }

    #[test]
    fn test_dyn_store_through_arc() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MapStore::default());
        store.set("a", "1").unwrap();
        store.remove("a").unwrap();
        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }
}
