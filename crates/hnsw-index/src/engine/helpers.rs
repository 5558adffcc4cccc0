//! Translation of raw engine status codes into [`HnswError`].
//!
//! This is the only place engine codes are interpreted. Every code maps to
//! exactly one error kind; codes outside the table fall through to
//! `OperationFailed`.

use std::os::raw::c_int;

use super::types::{EngineStatus, EMPTY_SLOT};
use crate::error::{HnswError, HnswResult};

/// What the facade was doing when the engine returned a status.
///
/// `id` and `max_elements` are only needed for the insertion kinds, which
/// carry them in the error.
#[derive(Debug, Clone, Copy)]
pub struct StatusContext<'a> {
    pub operation: &'a str,
    pub id: Option<i32>,
    pub max_elements: usize,
}

impl<'a> StatusContext<'a> {
    pub fn new(operation: &'a str) -> Self {
        Self {
            operation,
            id: None,
            max_elements: 0,
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_max_elements(mut self, max_elements: usize) -> Self {
        self.max_elements = max_elements;
        self
    }
}

/// Check an engine status code and convert it to an `HnswResult`.
///
/// | status | error |
/// |---|---|
/// | `Ok` | none |
/// | `NotInitialized` | `NotInitialized` |
/// | `CapacityExceeded` | `IdExceedsCapacity { max_elements, attempted_id }` |
/// | `PointExists` | `PointAlreadyExists { id }` |
/// | everything else | `OperationFailed` |
///
/// # Example
///
/// ```ignore
/// let code = engine.mark_deleted(id);
/// check_engine_status(code, StatusContext::new("mark_deleted").with_id(id))?;
/// ```
pub fn check_engine_status(code: c_int, ctx: StatusContext<'_>) -> HnswResult<()> {
    let status = EngineStatus::from_code(code);
    let id = ctx.id.unwrap_or(EMPTY_SLOT);
    match status {
        EngineStatus::Ok => Ok(()),
        EngineStatus::NotInitialized => Err(HnswError::NotInitialized),
        EngineStatus::CapacityExceeded => Err(HnswError::IdExceedsCapacity {
            max_elements: ctx.max_elements,
            attempted_id: id,
        }),
        EngineStatus::PointExists => Err(HnswError::PointAlreadyExists { id }),
        EngineStatus::GeneralError
        | EngineStatus::LabelNotFound
        | EngineStatus::AlreadyInState
        | EngineStatus::InvalidArgument
        | EngineStatus::IoFailure
        | EngineStatus::Unknown(_) => Err(HnswError::OperationFailed(match ctx.id {
            Some(id) => format!(
                "{} failed for ID {}: {} (code {})",
                ctx.operation, id, status, code
            ),
            None => format!("{} failed: {} (code {})", ctx.operation, status, code),
        })),
    }
}
