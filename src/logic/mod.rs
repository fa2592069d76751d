//! Logic Module - cascaded inference and decision pipeline
//!
//! ## Structure
//! - `encoding`: category labels → integer codes (with fallback)
//! - `features`: per-stage feature layouts and vector assembly
//! - `model`: scalers, predictors, model bundle loading
//! - `cascade`: the three dependent prediction stages
//! - `estimator`: optional inference of missing scenario parameters
//! - `decision`: threshold tables → priority, resources, evacuation
//! - `response`: final result assembly
//! - `pipeline`: wires everything together per request

pub mod encoding;
pub mod features;
pub mod model;
pub mod cascade;
pub mod estimator;
pub mod decision;
pub mod response;
pub mod pipeline;
