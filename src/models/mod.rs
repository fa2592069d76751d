//! Data models

pub mod scenario;
pub mod assessment;
