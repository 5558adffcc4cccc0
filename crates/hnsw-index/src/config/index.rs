//! HNSW index creation parameters.

use serde::{Deserialize, Serialize};

use super::space::SpaceType;
use crate::error::{HnswError, HnswResult};

/// Default vector dimension.
pub const DEFAULT_DIMENSION: usize = 128;
/// Default capacity.
pub const DEFAULT_MAX_ELEMENTS: usize = 1024;
/// Default maximum number of outgoing graph connections per node.
pub const DEFAULT_M: usize = 16;
/// Default construction-time candidate list size.
pub const DEFAULT_EF_CONSTRUCTION: usize = 200;

/// Creation-time configuration for an HNSW index.
///
/// Everything here is fixed for the lifetime of a handle except
/// `max_elements`, which changes through `resize_index` (and `load_index`).
/// The search-time `ef` is not part of the configuration; it is runtime
/// state set through `set_search_quality`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IndexConfig {
    /// Vector width. Every inserted and queried vector must match it.
    pub dimension: usize,

    /// Capacity: maximum number of stored elements, deleted ones included.
    pub max_elements: usize,

    /// Maximum outgoing connections per graph node.
    /// Default: 16
    pub m: usize,

    /// Candidate list size used while building the graph.
    /// Default: 200
    pub ef_construction: usize,

    /// Distance metric.
    /// Default: L2
    pub space: SpaceType,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
            max_elements: DEFAULT_MAX_ELEMENTS,
            m: DEFAULT_M,
            ef_construction: DEFAULT_EF_CONSTRUCTION,
            space: SpaceType::L2,
        }
    }
}

impl IndexConfig {
    /// Config with the given dimension and capacity and default graph
    /// parameters (M=16, efConstruction=200, L2).
    ///
    /// # Example
    /// ```
    /// use hnsw_index::config::{IndexConfig, SpaceType};
    /// let config = IndexConfig::new(4, 2);
    /// assert_eq!(config.m, 16);
    /// assert_eq!(config.ef_construction, 200);
    /// assert_eq!(config.space, SpaceType::L2);
    /// ```
    pub fn new(dimension: usize, max_elements: usize) -> Self {
        Self {
            dimension,
            max_elements,
            ..Self::default()
        }
    }

    pub fn with_m(mut self, m: usize) -> Self {
        self.m = m;
        self
    }

    pub fn with_ef_construction(mut self, ef_construction: usize) -> Self {
        self.ef_construction = ef_construction;
        self
    }

    pub fn with_space(mut self, space: SpaceType) -> Self {
        self.space = space;
        self
    }

    /// Check the parameters the engine cannot accept.
    ///
    /// All numeric fields cross the engine boundary as `i32`, so each must
    /// fit. `dimension`, `m` and `ef_construction` must be non-zero.
    ///
    /// # Errors
    ///
    /// `HnswError::OperationFailed` naming the offending field.
    pub fn validate(&self) -> HnswResult<()> {
        if self.dimension == 0 {
            return Err(HnswError::operation_failed(
                "Invalid configuration: dimension must be > 0".to_string(),
            ));
        }
        if self.m == 0 {
            return Err(HnswError::operation_failed(
                "Invalid configuration: m must be > 0".to_string(),
            ));
        }
        if self.ef_construction == 0 {
            return Err(HnswError::operation_failed(
                "Invalid configuration: ef_construction must be > 0".to_string(),
            ));
        }
        for (field, value) in [
            ("dimension", self.dimension),
            ("max_elements", self.max_elements),
            ("m", self.m),
            ("ef_construction", self.ef_construction),
        ] {
            if i32::try_from(value).is_err() {
                return Err(HnswError::operation_failed(format!(
                    "Invalid configuration: {} ({}) exceeds {}",
                    field,
                    value,
                    i32::MAX
                )));
            }
        }
        Ok(())
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> HnswResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> HnswResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
