//! HnswIndex structure, construction, accessors, and release.

use std::os::raw::c_int;

use crate::config::{IndexConfig, SpaceType};
use crate::engine::RawEngine;
use crate::error::{HnswError, HnswResult};
use crate::metadata::MetadataStore;

/// Checked HNSW index over one engine handle.
///
/// Identifiers are caller-chosen `i32` values. Every stored point has
/// exactly `dimension` components and at most `max_elements` points are
/// stored at once, tombstoned ones included.
///
/// # Lifecycle
///
/// The engine handle is owned exclusively. It is released on drop or by an
/// explicit [`release`](Self::release); afterwards every engine-backed
/// operation returns [`HnswError::NotInitialized`]. The metadata sidecar
/// stays usable.
///
/// # Thread Safety
///
/// `Send` but not `Sync`. Wrap it in
/// [`HnswContainer`](crate::container::HnswContainer) to share it.
pub struct HnswIndex {
    pub(crate) engine: Option<RawEngine>,
    pub(crate) metadata: MetadataStore,
    pub(crate) config: IndexConfig,
}

impl HnswIndex {
    /// Create an empty index from `config`.
    ///
    /// # Errors
    ///
    /// - `HnswError::OperationFailed` if `config` fails validation or the
    ///   engine cannot be constructed
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use hnsw_index::{HnswIndex, IndexConfig, SpaceType};
    /// # fn example() -> hnsw_index::HnswResult<()> {
    /// let config = IndexConfig::new(4, 10).with_space(SpaceType::Cosine);
    /// let index = HnswIndex::create(config)?;
    /// assert_eq!(index.element_count()?, 0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn create(config: IndexConfig) -> HnswResult<Self> {
        config.validate()?;

        // validate() bounds every field by i32::MAX.
        let engine = RawEngine::create(
            config.dimension as c_int,
            config.max_elements as c_int,
            config.m as c_int,
            config.ef_construction as c_int,
            config.space,
        )
        .ok_or_else(|| {
            HnswError::operation_failed(format!(
                "Engine creation failed: dimension={}, max_elements={}, M={}, ef_construction={}, space={}",
                config.dimension, config.max_elements, config.m, config.ef_construction, config.space
            ))
        })?;

        tracing::debug!(
            dimension = config.dimension,
            max_elements = config.max_elements,
            m = config.m,
            ef_construction = config.ef_construction,
            space = %config.space,
            "created HNSW index"
        );

        Ok(Self {
            engine: Some(engine),
            metadata: MetadataStore::new(),
            config,
        })
    }

    /// Create an L2 index with default graph parameters.
    pub fn new(dimension: usize, max_elements: usize) -> HnswResult<Self> {
        Self::create(IndexConfig::new(dimension, max_elements))
    }

    // ========== Handle ==========

    pub(crate) fn engine(&self) -> HnswResult<&RawEngine> {
        self.engine.as_ref().ok_or(HnswError::NotInitialized)
    }

    pub(crate) fn engine_mut(&mut self) -> HnswResult<&mut RawEngine> {
        self.engine.as_mut().ok_or(HnswError::NotInitialized)
    }

    /// Whether the engine handle is still held.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.engine.is_some()
    }

    /// Release the engine handle now instead of at drop.
    ///
    /// Returns `false` if it was already released. Metadata is kept.
    pub fn release(&mut self) -> bool {
        match self.engine.take() {
            Some(engine) => {
                engine.free();
                tracing::debug!("released HNSW index");
                true
            }
            None => false,
        }
    }

    // ========== Accessors ==========

    /// Configuration as last synchronized with the engine.
    ///
    /// Kept current across `resize_index` and `load_index`, and still
    /// available after release.
    #[inline]
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn space(&self) -> HnswResult<SpaceType> {
        Ok(self.engine()?.get_space())
    }

    pub fn dimension(&self) -> HnswResult<usize> {
        Ok(self.engine()?.get_dim() as usize)
    }

    /// Graph connectivity (M).
    pub fn m(&self) -> HnswResult<usize> {
        Ok(self.engine()?.get_M() as usize)
    }

    pub fn ef_construction(&self) -> HnswResult<usize> {
        Ok(self.engine()?.get_ef_construction() as usize)
    }

    /// Current capacity.
    pub fn max_elements(&self) -> HnswResult<usize> {
        Ok(self.engine()?.get_max_elements() as usize)
    }

    /// Stored points, tombstoned ones included.
    pub fn element_count(&self) -> HnswResult<usize> {
        Ok(self.engine()?.get_current_count() as usize)
    }

    pub fn deleted_count(&self) -> HnswResult<usize> {
        Ok(self.engine()?.get_deleted_count() as usize)
    }

    /// Points visible to search.
    pub fn live_count(&self) -> HnswResult<usize> {
        let engine = self.engine()?;
        Ok(engine
            .get_current_count()
            .saturating_sub(engine.get_deleted_count()) as usize)
    }

    /// Current search-time candidate list size (ef).
    pub fn search_quality(&self) -> HnswResult<usize> {
        Ok(self.engine()?.get_ef() as usize)
    }

    /// Read-only view of the metadata sidecar.
    #[inline]
    pub fn metadata(&self) -> &MetadataStore {
        &self.metadata
    }
}

/// Reject vectors whose length differs from the index dimension.
pub(crate) fn check_dimension(expected: usize, actual: usize) -> HnswResult<()> {
    if expected != actual {
        return Err(HnswError::VectorDimensionMismatch { expected, actual });
    }
    Ok(())
}

impl std::fmt::Debug for HnswIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HnswIndex")
            .field("config", &self.config)
            .field("engine", &self.engine)
            .field("metadata_entries", &self.metadata.len())
            .finish()
    }
}
