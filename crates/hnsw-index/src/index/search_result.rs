//! Search result type.

use serde::{Deserialize, Serialize};

/// One nearest-neighbor hit: a live point and its distance to the query.
///
/// Distances are reported exactly as the engine computes them for the
/// index's space (squared Euclidean for L2, `1 - cos` for cosine).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: i32,
    pub distance: f32,
}

impl SearchResult {
    #[inline]
    pub fn new(id: i32, distance: f32) -> Self {
        Self { id, distance }
    }
}

impl From<SearchResult> for (i32, f32) {
    fn from(result: SearchResult) -> Self {
        (result.id, result.distance)
    }
}

impl From<(i32, f32)> for SearchResult {
    fn from((id, distance): (i32, f32)) -> Self {
        Self { id, distance }
    }
}
