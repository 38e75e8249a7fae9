//! REST API over the computed schedule.
//!
//! Provides:
//! - `GET /schedule`: the schedule report computed at startup
//! - `GET /schedule/hours`: hourly rows with optional range filtering
//! - `GET /tariff`: the hourly tariff in use
//! - `POST /schedule`: schedule a submitted appliance list

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::sched::report::ScheduleReport;
use crate::tariff::TariffCurve;

pub use types::{ErrorResponse, FieldError, HoursQuery, PlanRequest, TariffResponse};

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the startup run and wrapped in `Arc`. Requests
/// that compute a new schedule build their own and never touch this state.
pub struct AppState {
    /// Tariff used for the startup run and as the default for submissions.
    pub tariff: TariffCurve,
    /// Power ceiling used for the startup run and as the default for submissions.
    pub max_power_kw: f64,
    /// Report of the startup run.
    pub report: ScheduleReport,
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/schedule",
            get(handlers::get_schedule).post(handlers::post_schedule),
        )
        .route("/schedule/hours", get(handlers::get_hours))
        .route("/tariff", get(handlers::get_tariff))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `addr` - Socket address to bind to
///
/// # Errors
///
/// Returns the I/O error if the listener cannot bind to `addr` or the
/// server stops abnormally.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
