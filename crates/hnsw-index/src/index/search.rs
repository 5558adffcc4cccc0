//! k-nearest-neighbor search and metadata-filtered search.

use std::os::raw::c_int;

use super::handle::{check_dimension, HnswIndex};
use super::search_result::SearchResult;
use crate::engine::EMPTY_SLOT;
use crate::error::{HnswError, HnswResult};

impl HnswIndex {
    /// Find up to `max_results` live points nearest to `query`.
    ///
    /// Results are ordered nearest first. Fewer than `max_results` come back
    /// when fewer live points exist; empty engine slots are never returned.
    ///
    /// # Errors
    ///
    /// - `HnswError::NotInitialized` if the handle was released
    /// - `HnswError::VectorDimensionMismatch` if `query.len() != dimension`
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use hnsw_index::HnswIndex;
    /// # fn example() -> hnsw_index::HnswResult<()> {
    /// let mut index = HnswIndex::new(4, 2)?;
    /// index.add_point(&[1.0, 0.0, 0.0, 0.0], 0, None)?;
    /// index.add_point(&[0.0, 1.0, 0.0, 0.0], 1, None)?;
    ///
    /// let hits = index.search_knn(&[1.0, 0.0, 0.0, 0.0], 2)?;
    /// assert_eq!(hits[0].id, 0);
    /// assert_eq!(hits[1].distance, 2.0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn search_knn(&self, query: &[f32], max_results: usize) -> HnswResult<Vec<SearchResult>> {
        let engine = self.engine()?;
        check_dimension(engine.get_dim() as usize, query.len())?;

        if max_results == 0 {
            return Ok(Vec::new());
        }

        // The engine cannot return more than it stores; size the buffers
        // accordingly.
        let k = max_results.min(engine.get_current_count() as usize);
        if k == 0 {
            return Ok(Vec::new());
        }
        let k_raw = c_int::try_from(k).map_err(|_| {
            HnswError::operation_failed(format!("search_knn: k {} exceeds engine limit", k))
        })?;

        let mut ids: Vec<c_int> = vec![EMPTY_SLOT; k];
        let mut distances: Vec<f32> = vec![f32::MAX; k];
        engine.search_knn(query, &mut ids, &mut distances, k_raw);

        let results = trim_empty_slots(&ids, &distances);
        tracing::trace!(max_results, returned = results.len(), "search_knn");
        Ok(results)
    }

    /// Search, then keep only candidates whose metadata passes `filter`.
    ///
    /// The engine is asked for `max_results` candidates exactly as in
    /// [`search_knn`](Self::search_knn). Candidates are visited nearest
    /// first and `filter` receives each one's metadata (`None` when it has
    /// none). The result is an order-preserving subsequence of the
    /// unfiltered result; rejected candidates are not replaced, so fewer
    /// than `max_results` may come back even when more matches exist.
    ///
    /// # Errors
    ///
    /// Same as [`search_knn`](Self::search_knn).
    pub fn search_knn_filtered<F>(
        &self,
        query: &[f32],
        max_results: usize,
        mut filter: F,
    ) -> HnswResult<Vec<SearchResult>>
    where
        F: FnMut(Option<&str>) -> bool,
    {
        let candidates = self.search_knn(query, max_results)?;
        let candidate_count = candidates.len();

        let results: Vec<SearchResult> = candidates
            .into_iter()
            .filter(|hit| filter(self.metadata.get(hit.id)))
            .collect();

        tracing::trace!(
            max_results,
            candidates = candidate_count,
            kept = results.len(),
            "search_knn_filtered"
        );
        Ok(results)
    }
}

/// Pair ids with distances, dropping the trailing run of empty slots.
fn trim_empty_slots(ids: &[c_int], distances: &[f32]) -> Vec<SearchResult> {
    let filled = ids
        .iter()
        .rposition(|&id| id != EMPTY_SLOT)
        .map_or(0, |last| last + 1);

    ids[..filled]
        .iter()
        .zip(&distances[..filled])
        .map(|(&id, &distance)| SearchResult::new(id, distance))
        .collect()
}
