//! Raw engine surface over the usearch HNSW library.
//!
//! This module reproduces the narrow, C-style contract the rest of the crate
//! is written against: `i32` identifiers, integer status codes, caller-owned
//! output buffers for search, and the `-1` empty-slot sentinel. It performs
//! no caller-facing validation and is not meant to be used directly; the
//! [`crate::index::HnswIndex`] facade is the checked interface.
//!
//! # Module Structure
//!
//! - `types`: status codes, the empty-slot sentinel, identifier/key mapping
//! - `raw`: [`RawEngine`], the owning engine handle
//! - `manifest`: the side file that lets a saved engine be reloaded
//! - `helpers`: the status-code to [`crate::error::HnswError`] mapping table
//!
//! # Thread Safety
//!
//! [`RawEngine`] is `Send` but deliberately not `Sync`. Sharing it across
//! threads requires [`crate::container::HnswContainer`].

pub mod helpers;
mod manifest;
pub mod raw;
pub mod types;

pub use helpers::{check_engine_status, StatusContext};
pub use raw::{RawEngine, DEFAULT_EF_SEARCH};
pub use types::{
    EngineStatus, EMPTY_SLOT, STATUS_ALREADY_IN_STATE, STATUS_CAPACITY_EXCEEDED,
    STATUS_GENERAL_ERROR, STATUS_INVALID_ARGUMENT, STATUS_IO_FAILURE, STATUS_LABEL_NOT_FOUND,
    STATUS_NOT_INITIALIZED, STATUS_OK, STATUS_POINT_EXISTS,
};
