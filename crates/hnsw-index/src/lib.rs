//! Thread-safe HNSW Approximate Nearest-Neighbor Index
//!
//! This crate wraps an HNSW engine (usearch) behind a checked, typed
//! interface for storing fixed-dimension `f32` vectors under caller-chosen
//! `i32` identifiers and retrieving the nearest ones to a query.
//!
//! # Architecture
//!
//! - **engine**: raw engine contract: status codes, `-1` empty slots,
//!   tombstones, save/load manifest
//! - **error**: `HnswError` and the status-code mapping target
//! - **config**: `IndexConfig` and `SpaceType`
//! - **index**: `HnswIndex` facade: validation, search trimming, filtered
//!   search, resize post-conditions, persistence
//! - **metadata**: per-identifier string sidecar
//! - **container**: `HnswContainer`, serialized shared access over
//!   `tokio::sync::Mutex`
//!
//! # Distances
//!
//! `L2` reports squared Euclidean distance; `Cosine` reports `1 - cos`.
//! Smaller is closer in both.
//!
//! # Example
//!
//! ```no_run
//! use hnsw_index::{HnswIndex, HnswResult, IndexConfig, SearchResult};
//!
//! fn example() -> HnswResult<()> {
//!     let mut index = HnswIndex::create(IndexConfig::new(4, 2))?;
//!     index.add_point(&[1.0, 0.0, 0.0, 0.0], 0, Some("x-axis".to_string()))?;
//!     index.add_point(&[0.0, 1.0, 0.0, 0.0], 1, None)?;
//!
//!     let hits = index.search_knn(&[1.0, 0.0, 0.0, 0.0], 2)?;
//!     assert_eq!(hits, vec![SearchResult::new(0, 0.0), SearchResult::new(1, 2.0)]);
//!
//!     let tagged = index.search_knn_filtered(&[1.0, 0.0, 0.0, 0.0], 2, |m| m.is_some())?;
//!     assert_eq!(tagged.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod container;
pub mod engine;
pub mod error;
pub mod index;
pub mod metadata;

// Re-exports for convenience
pub use config::{IndexConfig, SpaceType};
pub use container::HnswContainer;
pub use error::{HnswError, HnswResult};
pub use index::{HnswIndex, SearchResult};
pub use metadata::MetadataStore;
