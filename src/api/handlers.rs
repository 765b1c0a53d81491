//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use super::AppState;
use super::types::{CalendarQuery, ErrorResponse, PlansResponse};
use crate::plan::{CalendarRow, ScenarioReport};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn not_found(name: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("unknown scenario \"{name}\""),
        }),
    )
}

/// Returns plant parameters and every scenario report.
///
/// `GET /plans` → 200 + `PlansResponse` JSON
pub async fn list_plans(State(state): State<Arc<AppState>>) -> Json<PlansResponse> {
    Json(PlansResponse {
        params: state.params,
        plans: state.reports.clone(),
    })
}

/// Returns one scenario report.
///
/// `GET /plans/{name}` → 200 + `ScenarioReport` JSON, or 404
pub async fn get_plan(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ScenarioReport>, ApiError> {
    state
        .report(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found(&name))
}

/// Returns calendar rows, optionally filtered by day range.
///
/// `GET /plans/{name}/calendar?from=N&to=M` → inclusive range
/// `from > to` → 400, unknown scenario → 404
pub async fn get_calendar(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Vec<CalendarRow>>, ApiError> {
    let from = query.from.unwrap_or(1);
    let to = query.to.unwrap_or(usize::MAX);

    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from` ({from}) must be <= `to` ({to})"),
            }),
        ));
    }

    let report = state.report(&name).ok_or_else(|| not_found(&name))?;
    let rows = report
        .calendar
        .iter()
        .filter(|r| r.day >= from && r.day <= to)
        .cloned()
        .collect();

    Ok(Json(rows))
}
