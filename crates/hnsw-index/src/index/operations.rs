//! HnswIndex mutations: insert, delete/undelete, resize, search quality,
//! and metadata.

use std::os::raw::c_int;

use super::handle::{check_dimension, HnswIndex};
use crate::engine::{check_engine_status, StatusContext};
use crate::error::{HnswError, HnswResult};

impl HnswIndex {
    /// Insert `vector` under `id`, optionally attaching `metadata`.
    ///
    /// Metadata is written only after the engine accepts the point, so a
    /// failed insert leaves both stores unchanged.
    ///
    /// # Arguments
    ///
    /// * `vector` - Exactly `dimension` components
    /// * `id` - Caller-chosen identifier; must not hold a live point
    /// * `metadata` - Optional payload stored in the sidecar
    ///
    /// # Errors
    ///
    /// - `HnswError::NotInitialized` if the handle was released
    /// - `HnswError::VectorDimensionMismatch` if `vector.len() != dimension`
    /// - `HnswError::IdExceedsCapacity` if the index is full
    /// - `HnswError::PointAlreadyExists` if `id` is live
    /// - `HnswError::OperationFailed` for any other engine rejection,
    ///   including `id == -1`
    ///
    /// # Note
    ///
    /// Re-inserting a deleted identifier replaces its vector and makes it
    /// live again without consuming extra capacity.
    pub fn add_point(
        &mut self,
        vector: &[f32],
        id: i32,
        metadata: Option<String>,
    ) -> HnswResult<()> {
        let engine = self.engine_mut()?;
        check_dimension(engine.get_dim() as usize, vector.len())?;

        let max_elements = engine.get_max_elements() as usize;
        let code = engine.add_point(vector, id);
        if let Err(e) = check_engine_status(
            code,
            StatusContext::new("add_point")
                .with_id(id)
                .with_max_elements(max_elements),
        ) {
            tracing::warn!(id, error = %e, "add_point rejected");
            return Err(e);
        }

        if let Some(value) = metadata {
            self.metadata.set(id, value);
        }
        tracing::trace!(id, "point added");
        Ok(())
    }

    /// Hide `id` from search. The vector and metadata stay stored and the
    /// point still counts against capacity.
    ///
    /// # Errors
    ///
    /// - `HnswError::NotInitialized` if the handle was released
    /// - `HnswError::OperationFailed` if `id` is unknown or already deleted
    pub fn mark_deleted(&mut self, id: i32) -> HnswResult<()> {
        let code = self.engine_mut()?.mark_deleted(id);
        check_engine_status(code, StatusContext::new("mark_deleted").with_id(id)).map_err(|e| {
            tracing::warn!(id, error = %e, "mark_deleted rejected");
            e
        })
    }

    /// Make a deleted `id` visible to search again.
    ///
    /// # Errors
    ///
    /// - `HnswError::NotInitialized` if the handle was released
    /// - `HnswError::OperationFailed` if `id` is unknown or already live
    pub fn unmark_deleted(&mut self, id: i32) -> HnswResult<()> {
        let code = self.engine_mut()?.unmark_deleted(id);
        check_engine_status(code, StatusContext::new("unmark_deleted").with_id(id)).map_err(|e| {
            tracing::warn!(id, error = %e, "unmark_deleted rejected");
            e
        })
    }

    /// Change the capacity to `new_capacity`.
    ///
    /// After the engine call, the stored count, live count and capacity are
    /// read back and checked against the request.
    ///
    /// # Panics
    ///
    /// If `new_capacity` exceeds `i32::MAX` or is below the live element
    /// count. Both are caller bugs.
    ///
    /// # Errors
    ///
    /// - `HnswError::NotInitialized` if the handle was released
    /// - `HnswError::OperationFailed` if the engine rejects the resize (for
    ///   example a capacity below the stored count while deleted points
    ///   still occupy slots), either count changed, or the capacity is not
    ///   `new_capacity`
    pub fn resize_index(&mut self, new_capacity: usize) -> HnswResult<()> {
        let engine = self.engine_mut()?;
        let stored_before = engine.get_current_count() as usize;
        let live_before = stored_before.saturating_sub(engine.get_deleted_count() as usize);

        let requested = c_int::try_from(new_capacity).unwrap_or_else(|_| {
            panic!(
                "resize_index: capacity {} exceeds engine limit {}",
                new_capacity,
                c_int::MAX
            )
        });
        assert!(
            new_capacity >= live_before,
            "resize_index: capacity {} is below live element count {}",
            new_capacity,
            live_before
        );

        let code = engine.resize_index(requested);
        check_engine_status(code, StatusContext::new("resize_index")).map_err(|e| {
            tracing::warn!(new_capacity, stored = stored_before, error = %e, "resize_index rejected");
            e
        })?;

        let stored_after = engine.get_current_count() as usize;
        let live_after = stored_after.saturating_sub(engine.get_deleted_count() as usize);
        if stored_after != stored_before || live_after != live_before {
            tracing::error!(
                stored_before,
                stored_after,
                live_before,
                live_after,
                "resize_index changed element count"
            );
            return Err(HnswError::operation_failed(format!(
                "Resize changed element count from {} ({} live) to {} ({} live)",
                stored_before, live_before, stored_after, live_after
            )));
        }
        let capacity_after = engine.get_max_elements() as usize;
        if capacity_after != new_capacity {
            tracing::error!(new_capacity, capacity_after, "resize_index capacity mismatch");
            return Err(HnswError::operation_failed(format!(
                "Resize to {} left capacity at {}",
                new_capacity, capacity_after
            )));
        }

        self.config.max_elements = new_capacity;
        tracing::debug!(new_capacity, count = stored_after, "index resized");
        Ok(())
    }

    /// Set the search-time candidate list size (ef) for subsequent searches.
    ///
    /// Larger values trade latency for recall. Results are still capped at
    /// the requested `max_results`.
    ///
    /// # Errors
    ///
    /// - `HnswError::NotInitialized` if the handle was released
    /// - `HnswError::OperationFailed` if the engine rejects `ef` (zero or
    ///   beyond `i32::MAX`)
    pub fn set_search_quality(&mut self, ef: usize) -> HnswResult<()> {
        let engine = self.engine_mut()?;
        let ef = c_int::try_from(ef).map_err(|_| {
            HnswError::operation_failed(format!("set_search_quality: ef {} exceeds engine limit", ef))
        })?;
        let code = engine.set_ef(ef);
        check_engine_status(code, StatusContext::new("set_search_quality"))?;
        tracing::debug!(ef, "search quality updated");
        Ok(())
    }

    // ========== Metadata ==========
    // Sidecar access is independent of the engine and keeps working after
    // release.

    pub fn get_metadata(&self, id: i32) -> Option<&str> {
        self.metadata.get(id)
    }

    /// Upsert metadata for `id`, returning the previous value. `id` does not
    /// need to be a stored point.
    pub fn set_metadata(&mut self, id: i32, value: impl Into<String>) -> Option<String> {
        self.metadata.set(id, value)
    }

    pub fn remove_metadata(&mut self, id: i32) -> Option<String> {
        self.metadata.remove(id)
    }
}
