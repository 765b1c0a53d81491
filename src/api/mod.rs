//! REST API for planned scenarios.
//!
//! Provides three GET endpoints:
//! - `/plans`: every scenario report
//! - `/plans/{name}`: one scenario report
//! - `/plans/{name}/calendar`: per-day calendar with optional range filtering

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::model::PlantParams;
use crate::plan::ScenarioReport;

/// Immutable application state shared across all request handlers.
///
/// Built once after planning completes; all data is read-only.
pub struct AppState {
    /// Plant parameters used for every scenario.
    pub params: PlantParams,
    /// Reports in configuration order.
    pub reports: Vec<ScenarioReport>,
}

impl AppState {
    fn report(&self, name: &str) -> Option<&ScenarioReport> {
        self.reports.iter().find(|r| r.name == name)
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/plans", get(handlers::list_plans))
        .route("/plans/{name}", get(handlers::get_plan))
        .route("/plans/{name}/calendar", get(handlers::get_calendar))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
