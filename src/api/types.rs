//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::model::PlantParams;
use crate::plan::ScenarioReport;

/// Response for `GET /plans`.
#[derive(Debug, Serialize)]
pub struct PlansResponse {
    pub params: PlantParams,
    pub plans: Vec<ScenarioReport>,
}

/// Optional inclusive day range for the calendar endpoint.
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    /// First day (inclusive).
    pub from: Option<usize>,
    /// Last day (inclusive).
    pub to: Option<usize>,
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
