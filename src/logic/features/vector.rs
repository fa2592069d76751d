//! Feature Assembly
//!
//! Builds the stage vectors in the exact column order of `layout.rs`.

use ndarray::{array, Array1};

use super::layout::{Stage, DAMAGE_INDEX_PRIOR};
use crate::logic::encoding::CategoryCodes;
use crate::models::scenario::{Calendar, ScenarioRequest};

/// Feature values tagged with the stage whose layout they follow
#[derive(Debug, Clone, PartialEq)]
pub struct StageVector {
    pub stage: Stage,
    pub values: Array1<f64>,
}

impl StageVector {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Stage A input. Uses [`DAMAGE_INDEX_PRIOR`] in the damage slot.
pub fn disaster_vector(request: &ScenarioRequest, codes: CategoryCodes) -> StageVector {
    let cal = &request.calendar;
    StageVector {
        stage: Stage::Disaster,
        values: array![
            codes.disaster as f64,
            codes.location as f64,
            request.latitude,
            request.longitude,
            request.severity_level as f64,
            request.affected_population as f64,
            DAMAGE_INDEX_PRIOR,
            cal.month as f64,
            cal.quarter as f64,
            cal.day_of_year as f64,
        ],
    }
}

/// Stage B input
pub fn damage_vector(request: &ScenarioRequest, codes: CategoryCodes) -> StageVector {
    let cal = &request.calendar;
    StageVector {
        stage: Stage::Damage,
        values: array![
            codes.disaster as f64,
            codes.location as f64,
            request.latitude,
            request.longitude,
            request.severity_level as f64,
            request.affected_population as f64,
            request.economic_loss,
            cal.month as f64,
            cal.quarter as f64,
        ],
    }
}

/// Stage C input, embedding the damage index predicted by stage B
pub fn response_vector(
    request: &ScenarioRequest,
    codes: CategoryCodes,
    predicted_damage_index: f64,
) -> StageVector {
    StageVector {
        stage: Stage::Response,
        values: array![
            codes.disaster as f64,
            codes.location as f64,
            request.latitude,
            request.longitude,
            request.severity_level as f64,
            request.affected_population as f64,
            predicted_damage_index,
            request.economic_loss,
        ],
    }
}

/// Parameter estimation input
pub fn parameter_vector(
    codes: CategoryCodes,
    latitude: f64,
    longitude: f64,
    calendar: &Calendar,
) -> StageVector {
    StageVector {
        stage: Stage::Parameters,
        values: array![
            codes.disaster as f64,
            codes.location as f64,
            latitude,
            longitude,
            calendar.month as f64,
            calendar.week as f64,
            calendar.quarter as f64,
            if calendar.is_summer() { 1.0 } else { 0.0 },
            if calendar.is_winter() { 1.0 } else { 0.0 },
        ],
    }
}
