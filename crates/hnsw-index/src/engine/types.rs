//! Status codes and identifier conventions of the raw engine surface.

use std::fmt;
use std::os::raw::c_int;

// ========== Sentinel ==========

/// Identifier written into unused search result slots.
///
/// Also rejected as an insertion identifier so a real point can never be
/// mistaken for an empty slot.
pub const EMPTY_SLOT: i32 = -1;

// ========== Status Codes ==========

pub const STATUS_OK: c_int = 0;
pub const STATUS_NOT_INITIALIZED: c_int = -1;
pub const STATUS_CAPACITY_EXCEEDED: c_int = -2;
pub const STATUS_POINT_EXISTS: c_int = -3;
pub const STATUS_GENERAL_ERROR: c_int = -4;
pub const STATUS_LABEL_NOT_FOUND: c_int = -5;
pub const STATUS_ALREADY_IN_STATE: c_int = -6;
pub const STATUS_INVALID_ARGUMENT: c_int = -7;
pub const STATUS_IO_FAILURE: c_int = -8;

/// Decoded engine status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineStatus {
    Ok,
    NotInitialized,
    CapacityExceeded,
    PointExists,
    GeneralError,
    LabelNotFound,
    AlreadyInState,
    InvalidArgument,
    IoFailure,
    /// Any code outside the documented table.
    Unknown(c_int),
}

impl EngineStatus {
    pub fn from_code(code: c_int) -> Self {
        match code {
            STATUS_OK => EngineStatus::Ok,
            STATUS_NOT_INITIALIZED => EngineStatus::NotInitialized,
            STATUS_CAPACITY_EXCEEDED => EngineStatus::CapacityExceeded,
            STATUS_POINT_EXISTS => EngineStatus::PointExists,
            STATUS_GENERAL_ERROR => EngineStatus::GeneralError,
            STATUS_LABEL_NOT_FOUND => EngineStatus::LabelNotFound,
            STATUS_ALREADY_IN_STATE => EngineStatus::AlreadyInState,
            STATUS_INVALID_ARGUMENT => EngineStatus::InvalidArgument,
            STATUS_IO_FAILURE => EngineStatus::IoFailure,
            other => EngineStatus::Unknown(other),
        }
    }

    pub fn code(&self) -> c_int {
        match self {
            EngineStatus::Ok => STATUS_OK,
            EngineStatus::NotInitialized => STATUS_NOT_INITIALIZED,
            EngineStatus::CapacityExceeded => STATUS_CAPACITY_EXCEEDED,
            EngineStatus::PointExists => STATUS_POINT_EXISTS,
            EngineStatus::GeneralError => STATUS_GENERAL_ERROR,
            EngineStatus::LabelNotFound => STATUS_LABEL_NOT_FOUND,
            EngineStatus::AlreadyInState => STATUS_ALREADY_IN_STATE,
            EngineStatus::InvalidArgument => STATUS_INVALID_ARGUMENT,
            EngineStatus::IoFailure => STATUS_IO_FAILURE,
            EngineStatus::Unknown(code) => *code,
        }
    }
}

impl fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineStatus::Ok => write!(f, "ok"),
            EngineStatus::NotInitialized => write!(f, "index not initialized"),
            EngineStatus::CapacityExceeded => write!(f, "capacity exceeded"),
            EngineStatus::PointExists => write!(f, "point already exists"),
            EngineStatus::GeneralError => write!(f, "general error"),
            EngineStatus::LabelNotFound => write!(f, "label not found"),
            EngineStatus::AlreadyInState => write!(f, "element already in requested state"),
            EngineStatus::InvalidArgument => write!(f, "invalid argument"),
            EngineStatus::IoFailure => write!(f, "I/O failure"),
            EngineStatus::Unknown(code) => write!(f, "unknown status {}", code),
        }
    }
}

// ========== Identifier Mapping ==========

/// Map a signed identifier onto the engine's unsigned key space.
///
/// The mapping is a bijection over all `i32` values.
#[inline]
pub(crate) fn id_to_key(id: i32) -> u64 {
    id as u32 as u64
}

#[inline]
pub(crate) fn key_to_id(key: u64) -> i32 {
    key as u32 as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_values() {
        assert_eq!(STATUS_OK, 0);
        assert_eq!(STATUS_NOT_INITIALIZED, -1);
        assert_eq!(STATUS_CAPACITY_EXCEEDED, -2);
        assert_eq!(STATUS_POINT_EXISTS, -3);
        assert_eq!(STATUS_GENERAL_ERROR, -4);
    }

    #[test]
    fn test_from_code_covers_table() {
        for code in -8..=0 {
            let status = EngineStatus::from_code(code);
            assert!(!matches!(status, EngineStatus::Unknown(_)), "code {} unmapped", code);
            assert_eq!(status.code(), code);
        }
    }

    #[test]
    fn test_unknown_codes_preserved() {
        for code in [1, 42, -9, -100, c_int::MIN] {
            let status = EngineStatus::from_code(code);
            assert_eq!(status, EngineStatus::Unknown(code));
            assert_eq!(status.code(), code);
            assert!(status.to_string().contains(&code.to_string()));
        }
    }

    #[test]
    fn test_key_mapping_is_bijective_on_edges() {
        for id in [0, 1, 42, i32::MAX, -2, i32::MIN] {
            assert_eq!(key_to_id(id_to_key(id)), id);
        }
        assert_ne!(id_to_key(-2), id_to_key(2));
    }
}
