//! Owning handle to one usearch HNSW instance behind the raw contract.

use std::cell::Cell;
use std::collections::HashSet;
use std::marker::PhantomData;
use std::os::raw::c_int;

use usearch::{Index, IndexOptions, MetricKind, ScalarKind};

use super::manifest::EngineManifest;
use super::types::*;
use crate::config::SpaceType;

/// Search-time candidate list size applied to a freshly created engine.
pub const DEFAULT_EF_SEARCH: usize = 64;

/// Convert a space to the usearch metric.
///
/// `L2sq` keeps distances squared, so two orthogonal unit vectors are at
/// distance 2.0.
pub(crate) fn space_to_metric(space: SpaceType) -> MetricKind {
    match space {
        SpaceType::L2 => MetricKind::L2sq,
        SpaceType::Cosine => MetricKind::Cos,
    }
}

/// Raw HNSW engine.
///
/// Owns one usearch index plus the state usearch does not model: the
/// hnswlib-style capacity ceiling and the set of tombstoned keys. Deleted
/// points stay stored (and keep occupying capacity); searches skip them.
///
/// Every mutating call returns a status code (`STATUS_OK` on success).
/// Arguments are not checked beyond what is needed to keep the engine
/// consistent.
///
/// # Thread Safety
///
/// `Send` but not `Sync`. Callers that share an engine must serialize all
/// access, reads included.
pub struct RawEngine {
    index: Index,
    space: SpaceType,
    dimension: usize,
    m: usize,
    ef_construction: usize,
    max_elements: usize,
    deleted: HashSet<u64>,
    _not_sync: PhantomData<Cell<()>>,
}

impl RawEngine {
    /// Create an engine. Returns `None` if any parameter is out of range or
    /// usearch fails to allocate.
    pub fn create(
        dim: c_int,
        max_elements: c_int,
        m: c_int,
        ef_construction: c_int,
        space: SpaceType,
    ) -> Option<Self> {
        if dim <= 0 || max_elements < 0 || m <= 0 || ef_construction <= 0 {
            tracing::error!(
                dim,
                max_elements,
                m,
                ef_construction,
                "engine creation rejected: parameters out of range"
            );
            return None;
        }
        let (dimension, m, ef_construction) = (dim as usize, m as usize, ef_construction as usize);
        let index = match build_index(dimension, m, ef_construction, space, max_elements as usize) {
            Ok(index) => index,
            Err(e) => {
                tracing::error!(error = %e, "engine creation failed");
                return None;
            }
        };

        Some(Self {
            index,
            space,
            dimension,
            m,
            ef_construction,
            max_elements: max_elements as usize,
            deleted: HashSet::new(),
            _not_sync: PhantomData,
        })
    }

    // ========== Configuration ==========

    pub fn get_space(&self) -> SpaceType {
        self.space
    }

    pub fn get_dim(&self) -> c_int {
        self.dimension as c_int
    }

    #[allow(non_snake_case)]
    pub fn get_M(&self) -> u64 {
        self.m as u64
    }

    pub fn get_ef_construction(&self) -> u64 {
        self.ef_construction as u64
    }

    pub fn get_max_elements(&self) -> u64 {
        self.max_elements as u64
    }

    /// Stored elements, tombstoned ones included.
    pub fn get_current_count(&self) -> u64 {
        self.index.size() as u64
    }

    pub fn get_deleted_count(&self) -> u64 {
        self.deleted.len() as u64
    }

    pub fn get_ef(&self) -> c_int {
        self.index.expansion_search() as c_int
    }

    // ========== Mutation ==========

    /// Insert `vector` under `id`.
    ///
    /// - live `id` → `STATUS_POINT_EXISTS`
    /// - tombstoned `id` → vector replaced and the point revived, count unchanged
    /// - stored count at capacity → `STATUS_CAPACITY_EXCEEDED`
    pub fn add_point(&mut self, vector: &[f32], id: c_int) -> c_int {
        if vector.len() != self.dimension || id == EMPTY_SLOT {
            return STATUS_INVALID_ARGUMENT;
        }
        let key = id_to_key(id);

        if self.index.contains(key) {
            if !self.deleted.contains(&key) {
                return STATUS_POINT_EXISTS;
            }
            return self.revive(key, vector, id);
        }

        if self.index.size() >= self.max_elements {
            return STATUS_CAPACITY_EXCEEDED;
        }

        // usearch needs slots reserved ahead of insertion; removed slots are
        // not always reusable, so grow the reservation when it runs out.
        if self.index.size() >= self.index.capacity() {
            let target = (self.index.capacity() * 2).max(self.max_elements).max(1);
            if let Err(e) = self.index.reserve(target) {
                tracing::error!(target, error = %e, "usearch reserve failed");
                return STATUS_GENERAL_ERROR;
            }
        }

        match self.index.add(key, vector) {
            Ok(()) => STATUS_OK,
            Err(e) => {
                tracing::error!(id, error = %e, "usearch add failed");
                STATUS_GENERAL_ERROR
            }
        }
    }

    /// Replace a tombstoned point's vector and make it live.
    ///
    /// usearch rejects duplicate keys, so the old vector is removed first
    /// and put back if the new one cannot be inserted.
    fn revive(&mut self, key: u64, vector: &[f32], id: c_int) -> c_int {
        let mut previous = vec![0.0f32; self.dimension];
        match self.index.get(key, previous.as_mut_slice()) {
            Ok(found) if found > 0 => {}
            Ok(_) => {
                tracing::error!(id, "tombstoned vector missing from engine");
                return STATUS_GENERAL_ERROR;
            }
            Err(e) => {
                tracing::error!(id, error = %e, "failed to read tombstoned vector");
                return STATUS_GENERAL_ERROR;
            }
        }
        if let Err(e) = self.index.remove(key) {
            tracing::error!(id, error = %e, "failed to drop tombstoned vector before re-insert");
            return STATUS_GENERAL_ERROR;
        }
        if let Err(e) = self.index.add(key, vector) {
            tracing::error!(id, error = %e, "failed to re-insert tombstoned point");
            if let Err(restore) = self.index.add(key, previous.as_slice()) {
                // Key is gone from the engine; drop the tombstone so counts
                // stay consistent.
                tracing::error!(id, error = %restore, "failed to restore tombstoned vector");
                self.deleted.remove(&key);
            }
            return STATUS_GENERAL_ERROR;
        }
        self.deleted.remove(&key);
        STATUS_OK
    }

    pub fn mark_deleted(&mut self, id: c_int) -> c_int {
        let key = id_to_key(id);
        if !self.index.contains(key) {
            return STATUS_LABEL_NOT_FOUND;
        }
        if !self.deleted.insert(key) {
            return STATUS_ALREADY_IN_STATE;
        }
        STATUS_OK
    }

    pub fn unmark_deleted(&mut self, id: c_int) -> c_int {
        let key = id_to_key(id);
        if !self.index.contains(key) {
            return STATUS_LABEL_NOT_FOUND;
        }
        if !self.deleted.remove(&key) {
            return STATUS_ALREADY_IN_STATE;
        }
        STATUS_OK
    }

    /// Change the capacity ceiling. Fails if `new_size` is negative or below
    /// the stored element count.
    pub fn resize_index(&mut self, new_size: c_int) -> c_int {
        if new_size < 0 {
            return STATUS_INVALID_ARGUMENT;
        }
        let new_size = new_size as usize;
        if new_size < self.index.size() {
            return STATUS_GENERAL_ERROR;
        }
        if new_size > self.index.capacity() {
            if let Err(e) = self.index.reserve(new_size) {
                tracing::error!(new_size, error = %e, "usearch reserve failed during resize");
                return STATUS_GENERAL_ERROR;
            }
        }
        self.max_elements = new_size;
        STATUS_OK
    }

    pub fn set_ef(&mut self, ef: c_int) -> c_int {
        if ef <= 0 {
            return STATUS_INVALID_ARGUMENT;
        }
        self.index.change_expansion_search(ef as usize);
        STATUS_OK
    }

    // ========== Search ==========

    /// k-nearest-neighbor search over live points.
    ///
    /// Writes up to `k` results, nearest first, into `ids`/`distances`. Every
    /// slot in `0..k` that has no result gets `EMPTY_SLOT` and `f32::MAX`.
    /// `k` is clamped to the shorter buffer.
    pub fn search_knn(&self, query: &[f32], ids: &mut [c_int], distances: &mut [f32], k: c_int) {
        let k = (k.max(0) as usize).min(ids.len()).min(distances.len());
        ids[..k].fill(EMPTY_SLOT);
        distances[..k].fill(f32::MAX);

        if k == 0 || query.len() != self.dimension {
            return;
        }
        let live = self.index.size().saturating_sub(self.deleted.len());
        if live == 0 {
            return;
        }

        let wanted = k.min(live);
        let matches = if self.deleted.is_empty() {
            self.index.search(query, wanted)
        } else {
            let deleted = &self.deleted;
            self.index
                .filtered_search(query, wanted, |key| !deleted.contains(&key))
        };

        let matches = match matches {
            Ok(m) => m,
            Err(e) => {
                tracing::error!(k, error = %e, "usearch search failed");
                return;
            }
        };

        for (slot, (key, distance)) in matches
            .keys
            .iter()
            .zip(matches.distances.iter())
            .take(k)
            .enumerate()
        {
            ids[slot] = key_to_id(*key);
            distances[slot] = *distance;
        }
    }

    // ========== Persistence ==========

    /// Write the usearch file at `path` and the manifest next to it.
    pub fn save_index(&self, path: &str) -> c_int {
        if let Err(e) = self.index.save(path) {
            tracing::error!(path, error = %e, "usearch save failed");
            return STATUS_IO_FAILURE;
        }
        let mut deleted: Vec<u64> = self.deleted.iter().copied().collect();
        deleted.sort_unstable();
        let manifest = EngineManifest {
            space: self.space,
            dimension: self.dimension,
            m: self.m,
            ef_construction: self.ef_construction,
            deleted,
        };
        if let Err(e) = manifest.write(path) {
            tracing::error!(path, error = %e, "engine manifest write failed");
            return STATUS_IO_FAILURE;
        }
        STATUS_OK
    }

    /// Replace this engine's contents with the saved engine at `path`.
    ///
    /// Space, dimension, M and efConstruction come from the files. The
    /// capacity ceiling is `max_elements`, raised to the loaded element count
    /// when smaller. The current search ef carries over. On failure the
    /// current contents are left untouched.
    pub fn load_index(&mut self, path: &str, max_elements: c_int) -> c_int {
        if max_elements < 0 {
            return STATUS_INVALID_ARGUMENT;
        }
        let manifest = match EngineManifest::read(path) {
            Ok(m) => m,
            Err(e) => {
                tracing::error!(path, error = %e, "engine manifest read failed");
                return STATUS_IO_FAILURE;
            }
        };
        let index = match build_index(
            manifest.dimension,
            manifest.m,
            manifest.ef_construction,
            manifest.space,
            1,
        ) {
            Ok(index) => index,
            Err(e) => {
                tracing::error!(path, error = %e, "engine allocation failed during load");
                return STATUS_GENERAL_ERROR;
            }
        };
        if let Err(e) = index.load(path) {
            tracing::error!(path, error = %e, "usearch load failed");
            return STATUS_IO_FAILURE;
        }

        // ef is runtime state of this handle, not part of the saved files.
        index.change_expansion_search(self.index.expansion_search());

        let capacity = (max_elements as usize).max(index.size());
        if capacity > index.capacity() {
            if let Err(e) = index.reserve(capacity) {
                tracing::error!(capacity, error = %e, "usearch reserve failed after load");
                return STATUS_GENERAL_ERROR;
            }
        }

        self.index = index;
        self.space = manifest.space;
        self.dimension = manifest.dimension;
        self.m = manifest.m;
        self.ef_construction = manifest.ef_construction;
        self.max_elements = capacity;
        self.deleted = manifest.deleted.into_iter().collect();
        STATUS_OK
    }

    /// Release the engine. Equivalent to dropping it.
    pub fn free(self) {}
}

impl Drop for RawEngine {
    fn drop(&mut self) {
        tracing::trace!(
            dimension = self.dimension,
            count = self.index.size(),
            "releasing HNSW engine"
        );
    }
}

impl std::fmt::Debug for RawEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawEngine")
            .field("space", &self.space)
            .field("dimension", &self.dimension)
            .field("m", &self.m)
            .field("ef_construction", &self.ef_construction)
            .field("max_elements", &self.max_elements)
            .field("count", &self.index.size())
            .field("deleted", &self.deleted.len())
            .finish()
    }
}

fn build_index(
    dimension: usize,
    m: usize,
    ef_construction: usize,
    space: SpaceType,
    capacity: usize,
) -> Result<Index, String> {
    let options = IndexOptions {
        dimensions: dimension,
        metric: space_to_metric(space),
        quantization: ScalarKind::F32,
        connectivity: m,
        expansion_add: ef_construction,
        expansion_search: DEFAULT_EF_SEARCH,
        ..Default::default()
    };
    let index = Index::new(&options).map_err(|e| format!("usearch index creation failed: {}", e))?;
    index
        .reserve(capacity.max(1))
        .map_err(|e| format!("usearch reserve failed: {}", e))?;
    Ok(index)
}
