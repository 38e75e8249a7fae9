//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use super::AppState;
use super::types::{ErrorResponse, FieldError, HoursQuery, PlanRequest, TariffResponse};
use crate::config::{CUSTOM_PROVIDER, ScenarioConfig, SchedulerConfig, TariffConfig};
use crate::sched::plan;
use crate::sched::report::{HourRow, ScheduleReport};

/// Error half of a handler result.
type ApiError = (StatusCode, Json<ErrorResponse>);

/// Returns the report computed at startup.
///
/// `GET /schedule` → 200 + `ScheduleReport` JSON
pub async fn get_schedule(State(state): State<Arc<AppState>>) -> Json<ScheduleReport> {
    Json(state.report.clone())
}

/// Returns hourly rows, optionally filtered by hour range.
///
/// `GET /schedule/hours` → 200 + `Vec<HourRow>` JSON
/// `GET /schedule/hours?from=N&to=M` → filtered range (inclusive)
/// `GET /schedule/hours?from=10&to=5` → 400 + `ErrorResponse`
pub async fn get_hours(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HoursQuery>,
) -> Result<Json<Vec<HourRow>>, ApiError> {
    let (from, to) = query
        .range()
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e))))?;

    let rows: Vec<HourRow> = state
        .report
        .rows
        .iter()
        .filter(|r| r.hour >= from && r.hour <= to)
        .cloned()
        .collect();

    Ok(Json(rows))
}

/// Returns the tariff in use.
///
/// `GET /tariff` → 200 + `TariffResponse` JSON
pub async fn get_tariff(State(state): State<Arc<AppState>>) -> Json<TariffResponse> {
    Json(TariffResponse::from(&state.tariff))
}

/// Schedules a submitted appliance list on a fresh schedule.
///
/// `POST /schedule` → 200 + `ScheduleReport` JSON
/// invalid appliances, ceiling, or tariff → 422 + `ErrorResponse`
pub async fn post_schedule(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<ScheduleReport>, ApiError> {
    let tariff = request.tariff.unwrap_or_else(|| TariffConfig {
        provider: CUSTOM_PROVIDER.to_string(),
        prices: Some(state.tariff.prices().to_vec()),
    });
    let cfg = ScenarioConfig {
        scheduler: SchedulerConfig {
            max_power_kw: request.max_power_kw.unwrap_or(state.max_power_kw),
        },
        tariff,
        appliances: request.appliances,
    };

    let scenario = cfg.build().map_err(|errors| {
        let body = ErrorResponse {
            error: format!("{} invalid field(s)", errors.len()),
            fields: errors.into_iter().map(FieldError::from).collect(),
        };
        (StatusCode::UNPROCESSABLE_ENTITY, Json(body))
    })?;

    let report = plan(&scenario.appliances, &scenario.tariff, scenario.max_power_kw);
    tracing::debug!(
        appliances = scenario.appliances.len(),
        total_cost = report.total_cost,
        "scheduled submitted appliances"
    );
    Ok(Json(report))
}
