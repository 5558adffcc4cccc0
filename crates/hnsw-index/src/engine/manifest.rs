//! Engine manifest written next to a saved usearch file.
//!
//! usearch persists the graph and vectors; the manifest carries what the
//! engine tracks outside of it: the space, graph parameters and tombstoned
//! keys.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::SpaceType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct EngineManifest {
    pub space: SpaceType,
    pub dimension: usize,
    pub m: usize,
    pub ef_construction: usize,
    pub deleted: Vec<u64>,
}

impl EngineManifest {
    pub fn path_for(index_path: &str) -> String {
        format!("{}.manifest.json", index_path)
    }

    pub fn write(&self, index_path: &str) -> Result<(), String> {
        let path = Self::path_for(index_path);
        let bytes = serde_json::to_vec_pretty(self)
            .map_err(|e| format!("manifest serialization failed: {}", e))?;
        fs::write(Path::new(&path), bytes)
            .map_err(|e| format!("failed to write manifest '{}': {}", path, e))
    }

    pub fn read(index_path: &str) -> Result<Self, String> {
        let path = Self::path_for(index_path);
        let bytes = fs::read(Path::new(&path))
            .map_err(|e| format!("failed to read manifest '{}': {}", path, e))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| format!("manifest '{}' is corrupted: {}", path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_path_suffix() {
        assert_eq!(EngineManifest::path_for("/tmp/a.usearch"), "/tmp/a.usearch.manifest.json");
    }

    #[test]
    fn test_manifest_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let index_path = dir.path().join("idx.usearch");
        let index_path = index_path.to_string_lossy();

        let manifest = EngineManifest {
            space: SpaceType::Cosine,
            dimension: 8,
            m: 12,
            ef_construction: 100,
            deleted: vec![3, 5],
        };
        manifest.write(&index_path).unwrap();
        assert_eq!(EngineManifest::read(&index_path).unwrap(), manifest);
    }

    #[test]
    fn test_manifest_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let index_path = dir.path().join("absent.usearch");
        let err = EngineManifest::read(&index_path.to_string_lossy()).unwrap_err();
        assert!(err.contains("failed to read manifest"));
    }
}
