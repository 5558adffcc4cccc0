//! Concurrency container for a shared [`HnswIndex`].
//!
//! The index is `Send` but not `Sync`, so all access goes through one
//! FIFO-fair async mutex. Every call, reads included, is exclusive: the
//! action runs synchronously with the lock held and cannot yield or leak a
//! borrow of the index out of the call.
//!
//! Dropping a pending `perform` future abandons the queued call. An action
//! that has started always runs to completion.

use tokio::sync::Mutex;

use crate::config::IndexConfig;
use crate::error::HnswResult;
use crate::index::HnswIndex;

/// Serializes all operations on one [`HnswIndex`].
///
/// # Example
///
/// ```no_run
/// # use std::sync::Arc;
/// # use hnsw_index::{HnswContainer, IndexConfig};
/// # async fn example() -> hnsw_index::HnswResult<()> {
/// let container = Arc::new(HnswContainer::create(IndexConfig::new(4, 100))?);
///
/// container
///     .perform(|index| index.add_point(&[1.0, 0.0, 0.0, 0.0], 1, Some("a".into())))
///     .await?;
///
/// let hits = container
///     .perform(|index| index.search_knn(&[1.0, 0.0, 0.0, 0.0], 1))
///     .await?;
/// assert_eq!(hits[0].id, 1);
/// # Ok(())
/// # }
/// ```
pub struct HnswContainer {
    index: Mutex<HnswIndex>,
}

impl HnswContainer {
    /// Take ownership of `index`.
    pub fn new(index: HnswIndex) -> Self {
        Self {
            index: Mutex::new(index),
        }
    }

    /// Create the index from `config` and wrap it.
    ///
    /// # Errors
    ///
    /// Same as [`HnswIndex::create`].
    pub fn create(config: IndexConfig) -> HnswResult<Self> {
        Ok(Self::new(HnswIndex::create(config)?))
    }

    /// Run `action` with exclusive access to the index.
    ///
    /// Waiters are suspended, not parked, and are served in arrival order.
    pub async fn perform<R, F>(&self, action: F) -> R
    where
        F: FnOnce(&mut HnswIndex) -> R,
    {
        let mut index = self.index.lock().await;
        action(&mut index)
    }

    /// Blocking variant of [`perform`](Self::perform) for synchronous
    /// callers.
    ///
    /// # Panics
    ///
    /// If called from within an asynchronous execution context.
    pub fn perform_blocking<R, F>(&self, action: F) -> R
    where
        F: FnOnce(&mut HnswIndex) -> R,
    {
        let mut index = self.index.blocking_lock();
        action(&mut index)
    }

    /// Replace the index with an empty one built from its current
    /// configuration, discarding all points and metadata.
    ///
    /// The old engine is released before the call returns.
    ///
    /// # Errors
    ///
    /// - `HnswError::OperationFailed` if the new engine cannot be created;
    ///   the old index is kept
    pub async fn reset(&self) -> HnswResult<()> {
        let mut index = self.index.lock().await;
        rebuild(&mut index)
    }

    /// Blocking variant of [`reset`](Self::reset).
    ///
    /// # Panics
    ///
    /// If called from within an asynchronous execution context.
    pub fn reset_blocking(&self) -> HnswResult<()> {
        let mut index = self.index.blocking_lock();
        rebuild(&mut index)
    }

    /// Unwrap the container, returning the index.
    pub fn into_inner(self) -> HnswIndex {
        self.index.into_inner()
    }
}

fn rebuild(index: &mut HnswIndex) -> HnswResult<()> {
    let config = index.config().clone();
    let fresh = HnswIndex::create(config)?;
    let previous = std::mem::replace(index, fresh);
    drop(previous);
    tracing::debug!(
        dimension = index.config().dimension,
        max_elements = index.config().max_elements,
        "HNSW index reset"
    );
    Ok(())
}

impl std::fmt::Debug for HnswContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HnswContainer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
