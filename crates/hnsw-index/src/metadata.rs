//! Metadata sidecar: an optional string payload per identifier.
//!
//! The sidecar is independent of the engine. Nothing links an entry to a
//! stored point: metadata may exist for identifiers that were never
//! inserted, were deleted, or were lost through `load_index`, and none of
//! those states is an error. Callers that need the two stores to agree must
//! update both inside one container call.

use std::collections::hash_map::{self, HashMap};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::HnswResult;

/// Identifier → metadata map. Last write wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataStore {
    entries: HashMap<i32, String>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: i32) -> Option<&str> {
        self.entries.get(&id).map(String::as_str)
    }

    /// Upsert `value` for `id`, returning the previous value.
    pub fn set(&mut self, id: i32, value: impl Into<String>) -> Option<String> {
        self.entries.insert(id, value.into())
    }

    pub fn remove(&mut self, id: i32) -> Option<String> {
        self.entries.remove(&id)
    }

    pub fn contains(&self, id: i32) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &str)> {
        self.entries.iter().map(|(id, v)| (*id, v.as_str()))
    }

    /// Write the store as a JSON object keyed by identifier.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> HnswResult<()> {
        let bytes = serde_json::to_vec_pretty(self)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> HnswResult<Self> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl<'a> IntoIterator for &'a MetadataStore {
    type Item = (&'a i32, &'a String);
    type IntoIter = hash_map::Iter<'a, i32, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(i32, String)> for MetadataStore {
    fn from_iter<T: IntoIterator<Item = (i32, String)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HnswError;

    #[test]
    fn test_get_absent_is_none() {
        let store = MetadataStore::new();
        assert_eq!(store.get(1), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_is_last_write_wins() {
        let mut store = MetadataStore::new();
        assert_eq!(store.set(1, "fruit"), None);
        assert_eq!(store.set(1, "vegetable"), Some("fruit".to_string()));
        assert_eq!(store.get(1), Some("vegetable"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_returns_value_and_is_total() {
        let mut store = MetadataStore::new();
        store.set(4, "x");
        assert_eq!(store.remove(4), Some("x".to_string()));
        assert_eq!(store.remove(4), None);
        assert!(!store.contains(4));
    }

    #[test]
    fn test_negative_and_extreme_ids() {
        let mut store = MetadataStore::new();
        store.set(i32::MIN, "min");
        store.set(-1, "neg");
        store.set(i32::MAX, "max");
        assert_eq!(store.get(i32::MIN), Some("min"));
        assert_eq!(store.get(-1), Some("neg"));
        assert_eq!(store.get(i32::MAX), Some("max"));
    }

    #[test]
    fn test_clear_and_iter() {
        let mut store: MetadataStore =
            [(1, "a".to_string()), (2, "b".to_string())].into_iter().collect();
        let mut seen: Vec<(i32, &str)> = store.iter().collect();
        seen.sort();
        assert_eq!(seen, vec![(1, "a"), (2, "b")]);
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta.json");

        let mut store = MetadataStore::new();
        store.set(-3, "negative");
        store.set(10, "{\"tag\":\"json inside\"}");
        store.save_to(&path).unwrap();

        let loaded = MetadataStore::load_from(&path).unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn test_load_missing_file_is_operation_failed() {
        let dir = tempfile::tempdir().unwrap();
        let result = MetadataStore::load_from(dir.path().join("absent.json"));
        assert!(matches!(result, Err(HnswError::OperationFailed(_))));
    }
}
