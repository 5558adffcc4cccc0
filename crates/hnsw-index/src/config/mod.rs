//! Configuration types for the HNSW index.
//!
//! - [`IndexConfig`]: creation-time parameters (dimension, capacity, M,
//!   efConstruction, space)
//! - [`SpaceType`]: distance metric selection, fixed at creation

mod index;
mod space;

pub use self::index::{
    IndexConfig, DEFAULT_DIMENSION, DEFAULT_EF_CONSTRUCTION, DEFAULT_M, DEFAULT_MAX_ELEMENTS,
};
pub use self::space::SpaceType;

#[cfg(test)]
mod tests;
