//! Decision Module
//!
//! Turns numeric cascade outputs into an emergency response plan.
//!
//! ## Structure
//! - `types`: Priority, plans, DecisionOutput
//! - `rules`: ordered threshold tables
//! - `engine`: table evaluation

pub mod types;
pub mod rules;
pub mod engine;

pub use types::{DecisionOutput, EvacuationPlan, Priority, ResourcePlan, ShelterPlan};
pub use engine::decide;
