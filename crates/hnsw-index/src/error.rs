//! Error types for HNSW index operations.
//!
//! Every failure that crosses the facade boundary is one of the five kinds
//! below. Raw engine status codes never reach callers; they are translated
//! by [`crate::engine::check_engine_status`] first.
//!
//! Precondition violations (shrinking capacity below the live element
//! count, capacities the engine cannot represent) are caller bugs and panic
//! instead of producing an `HnswError`.

use thiserror::Error;

/// Result type alias for index operations.
pub type HnswResult<T> = Result<T, HnswError>;

/// Failure conditions surfaced by the index facade and container.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HnswError {
    // ========== Handle Errors ==========
    /// The handle failed to construct or has already been released.
    #[error("Index is not initialized")]
    NotInitialized,

    // ========== Insertion Errors ==========
    /// Inserting would exceed the configured capacity.
    #[error("ID {attempted_id} exceeds maximum elements ({max_elements})")]
    IdExceedsCapacity {
        max_elements: usize,
        attempted_id: i32,
    },

    /// The identifier currently holds a live point.
    #[error("Point with ID {id} already exists")]
    PointAlreadyExists { id: i32 },

    // ========== Validation Errors ==========
    /// A vector argument does not have `dimension` components.
    #[error("Vector dimension mismatch: expected {expected}, got {actual}")]
    VectorDimensionMismatch { expected: usize, actual: usize },

    // ========== Catch-all ==========
    /// Any engine failure not classified above, including failed
    /// post-condition checks and persistence I/O.
    #[error("{0}")]
    OperationFailed(String),
}

impl HnswError {
    /// Shorthand for building an [`HnswError::OperationFailed`].
    pub fn operation_failed(message: impl Into<String>) -> Self {
        HnswError::OperationFailed(message.into())
    }
}

// ========== Error Conversions ==========
// Metadata persistence uses `?` on these; both collapse into the catch-all.

impl From<std::io::Error> for HnswError {
    fn from(err: std::io::Error) -> Self {
        HnswError::operation_failed(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for HnswError {
    fn from(err: serde_json::Error) -> Self {
        HnswError::operation_failed(format!("JSON error: {}", err))
    }
}
