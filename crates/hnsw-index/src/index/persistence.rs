//! HnswIndex persistence: engine save/load and the metadata sidecar.
//!
//! The engine and the sidecar are persisted separately. `save_index` and
//! `load_index` never touch metadata; `save_metadata` and `load_metadata`
//! never touch the engine.

use std::os::raw::c_int;
use std::path::Path;

use super::handle::HnswIndex;
use crate::config::IndexConfig;
use crate::engine::{check_engine_status, StatusContext};
use crate::error::{HnswError, HnswResult};
use crate::metadata::MetadataStore;

impl HnswIndex {
    /// Save the engine to `path`.
    ///
    /// Writes the engine file at `path` and `{path}.manifest.json` beside it.
    ///
    /// # Errors
    ///
    /// - `HnswError::NotInitialized` if the handle was released
    /// - `HnswError::OperationFailed` on write failure
    pub fn save_index<P: AsRef<Path>>(&self, path: P) -> HnswResult<()> {
        let engine = self.engine()?;
        let path_str = path.as_ref().to_string_lossy();

        let code = engine.save_index(&path_str);
        check_engine_status(code, StatusContext::new("save_index")).map_err(|e| {
            tracing::error!(path = %path_str, error = %e, "save_index failed");
            HnswError::operation_failed(format!("Failed to save index to '{}': {}", path_str, e))
        })?;

        tracing::debug!(
            path = %path_str,
            count = engine.get_current_count(),
            "index saved"
        );
        Ok(())
    }

    /// Replace the engine contents with the index saved at `path`.
    ///
    /// Space, dimension, M and efConstruction come from the saved files;
    /// the capacity is `max_elements`, raised to the saved element count
    /// when smaller. The configuration is re-synchronized from the engine.
    /// Search quality (ef) is a setting of this handle and carries over.
    /// Metadata is left as it was.
    ///
    /// # Errors
    ///
    /// - `HnswError::NotInitialized` if the handle was released
    /// - `HnswError::OperationFailed` on read failure or if `max_elements`
    ///   exceeds `i32::MAX`; the current contents are kept
    pub fn load_index<P: AsRef<Path>>(&mut self, path: P, max_elements: usize) -> HnswResult<()> {
        let engine = self.engine_mut()?;
        let path_str = path.as_ref().to_string_lossy();
        let max_raw = c_int::try_from(max_elements).map_err(|_| {
            HnswError::operation_failed(format!(
                "load_index: max_elements {} exceeds engine limit",
                max_elements
            ))
        })?;

        let code = engine.load_index(&path_str, max_raw);
        check_engine_status(code, StatusContext::new("load_index")).map_err(|e| {
            tracing::error!(path = %path_str, error = %e, "load_index failed");
            HnswError::operation_failed(format!("Failed to load index from '{}': {}", path_str, e))
        })?;

        let config = IndexConfig {
            dimension: engine.get_dim() as usize,
            max_elements: engine.get_max_elements() as usize,
            m: engine.get_M() as usize,
            ef_construction: engine.get_ef_construction() as usize,
            space: engine.get_space(),
        };
        let count = engine.get_current_count();

        tracing::debug!(
            path = %path_str,
            count,
            dimension = config.dimension,
            max_elements = config.max_elements,
            "index loaded"
        );
        self.config = config;
        Ok(())
    }

    /// Open a saved index as a new handle with an empty sidecar.
    ///
    /// # Errors
    ///
    /// Same as [`load_index`](Self::load_index).
    pub fn open<P: AsRef<Path>>(path: P, max_elements: usize) -> HnswResult<Self> {
        // Placeholder engine; load replaces every parameter.
        let mut index = Self::create(IndexConfig::new(1, 0))?;
        index.load_index(path, max_elements)?;
        Ok(index)
    }

    /// Write the metadata sidecar to `path` as JSON.
    ///
    /// Works after release.
    ///
    /// # Errors
    ///
    /// - `HnswError::OperationFailed` on serialization or write failure
    pub fn save_metadata<P: AsRef<Path>>(&self, path: P) -> HnswResult<()> {
        self.metadata.save_to(path.as_ref())?;
        tracing::debug!(
            path = %path.as_ref().display(),
            entries = self.metadata.len(),
            "metadata saved"
        );
        Ok(())
    }

    /// Replace the metadata sidecar with the JSON document at `path`.
    ///
    /// # Errors
    ///
    /// - `HnswError::OperationFailed` on read or parse failure; the current
    ///   sidecar is kept
    pub fn load_metadata<P: AsRef<Path>>(&mut self, path: P) -> HnswResult<()> {
        let store = MetadataStore::load_from(path.as_ref())?;
        tracing::debug!(
            path = %path.as_ref().display(),
            entries = store.len(),
            "metadata loaded"
        );
        self.metadata = store;
        Ok(())
    }
}
