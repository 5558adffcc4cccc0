//! Tests for the HNSW index facade.
//!
//! Test modules are organized by functionality:
//! - `index_tests` - creation, accessors, insertion, release
//! - `search_tests` - k-NN search, filtered search, deletion visibility
//! - `workflow_tests` - resize, search quality, end-to-end scenarios
//! - `persistence_tests` - index and metadata save/load


use crate::config::{IndexConfig, SpaceType};
use crate::index::HnswIndex;

/// L2 index with default graph parameters.
pub(super) fn l2_index(dimension: usize, max_elements: usize) -> HnswIndex {
    HnswIndex::new(dimension, max_elements).expect("index creation")
}

pub(super) fn cosine_index(dimension: usize, max_elements: usize) -> HnswIndex {
    HnswIndex::create(IndexConfig::new(dimension, max_elements).with_space(SpaceType::Cosine))
        .expect("index creation")
}

/// Unit vector along `axis`.
pub(super) fn axis(dimension: usize, axis: usize) -> Vec<f32> {
    let mut v = vec![0.0; dimension];
    v[axis] = 1.0;
    v
}
