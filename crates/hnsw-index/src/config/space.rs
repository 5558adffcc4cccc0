//! Distance space selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HnswError;

/// Distance metric used by the engine.
///
/// Distances are reported exactly as the engine computes them:
/// - `L2`: squared Euclidean distance, lower = closer
/// - `Cosine`: `1 - cos(a, b)`, lower = closer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceType {
    #[default]
    L2,
    Cosine,
}

impl SpaceType {
    /// Engine-facing space name (`"l2"` or `"cosine"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            SpaceType::L2 => "l2",
            SpaceType::Cosine => "cosine",
        }
    }
}

impl fmt::Display for SpaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpaceType::L2 => write!(f, "L2"),
            SpaceType::Cosine => write!(f, "Cosine"),
        }
    }
}

impl FromStr for SpaceType {
    type Err = HnswError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "l2" => Ok(SpaceType::L2),
            "cosine" => Ok(SpaceType::Cosine),
            other => Err(HnswError::operation_failed(format!(
                "Unknown space type '{}': expected 'l2' or 'cosine'",
                other
            ))),
        }
    }
}
