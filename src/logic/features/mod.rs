//! Features Module - per-stage feature layouts and assembly

pub mod layout;
pub mod vector;

pub use layout::{Stage, DAMAGE_INDEX_PRIOR, validate_layout, LayoutMismatchError};
pub use vector::{StageVector, disaster_vector, damage_vector, response_vector, parameter_vector};
