//! Checked HNSW index facade.
//!
//! Wraps a [`RawEngine`](crate::engine::RawEngine) with:
//! - dimension validation before any engine call
//! - status-code translation into [`HnswError`](crate::error::HnswError)
//! - post-condition checks on resize
//! - the metadata sidecar and filtered search
//!
//! # Module Organization
//!
//! - `handle` - `HnswIndex` structure, creation, accessors, release
//! - `operations` - insert, delete/undelete, resize, search quality, metadata
//! - `search` - k-NN search and metadata-filtered search
//! - `persistence` - index and metadata save/load
//! - `search_result` - `SearchResult`
//!
//! `HnswIndex` is `Send` but not `Sync`; share it through
//! [`HnswContainer`](crate::container::HnswContainer).

mod handle;
mod operations;
mod persistence;
mod search;
mod search_result;

#[cfg(test)]
mod tests;

pub use handle::HnswIndex;
pub use search_result::SearchResult;
