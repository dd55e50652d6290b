use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::{
    Country, PlannerError, RawHoliday, ScheduleResult, TaPlanner, export_file_name,
    schedule_to_csv_bytes,
};

#[derive(Clone)]
pub struct AppState {
    planner: Arc<TaPlanner>,
}

impl AppState {
    pub fn new(planner: TaPlanner) -> Self {
        Self {
            planner: Arc::new(planner),
        }
    }

    fn planner(&self) -> Arc<TaPlanner> {
        self.planner.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    Invalid(String),
    Internal(String),
}

impl From<PlannerError> for ApiError {
    fn from(value: PlannerError) -> Self {
        match value {
            PlannerError::InvalidCountry(_)
            | PlannerError::InvalidDate { .. }
            | PlannerError::InStoreDateTooEarly { .. } => ApiError::Invalid(value.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::Internal(message) => {
                let body = Json(ErrorBody {
                    error: "internal_error",
                    message,
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    pub in_store_date: String,
    pub fabric_country: String,
    pub sewing_country: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub schedule: ScheduleResult,
    pub booking_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HolidaysResponse {
    pub country: Country,
    pub year: i32,
    /// Non-working dates in `year`, buffers included.
    pub dates: Vec<NaiveDate>,
    /// Official holidays in `year` before buffering.
    pub holidays: Vec<RawHoliday>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/countries", get(countries))
        .route("/schedule", post(create_schedule))
        .route("/schedule.csv", get(schedule_csv))
        .route("/holidays/:country/:year", get(holidays))
        .route("/compare/:in_store_date", get(compare))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, planner: TaPlanner) -> std::io::Result<()> {
    let state = AppState::new(planner);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "http api listening");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn countries() -> impl IntoResponse {
    Json(json!({
        "fabric_origins": Country::FABRIC_ORIGINS,
        "sewing_origins": Country::SEWING_ORIGINS,
        "default_in_store_date": TaPlanner::default_in_store_date(),
    }))
}

async fn create_schedule(
    State(state): State<AppState>,
    Json(request): Json<ScheduleRequest>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    let planner = state.planner();
    let schedule = planner.plan_from_strs(
        &request.in_store_date,
        &request.fabric_country,
        &request.sewing_country,
    )?;
    let warning = planner.holiday_warning(&schedule);
    Ok(Json(ScheduleResponse {
        booking_date: schedule.booking_date(),
        schedule,
        warning,
    }))
}

#[derive(Debug, Deserialize)]
struct ScheduleQuery {
    in_store_date: String,
    fabric: String,
    sewing: String,
}

async fn schedule_csv(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Response, ApiError> {
    let planner = state.planner();
    let schedule = planner.plan_from_strs(&query.in_store_date, &query.fabric, &query.sewing)?;
    let bytes = schedule_to_csv_bytes(&schedule)?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_file_name(schedule.in_store_date)
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

async fn holidays(
    State(state): State<AppState>,
    Path((country, year)): Path<(String, i32)>,
) -> Result<Json<HolidaysResponse>, ApiError> {
    let country = country.parse::<Country>()?;
    let planner = state.planner();
    let set = planner.holidays(year, country);
    let holidays = planner
        .provider()
        .raw_holidays(year, country)
        .into_iter()
        .filter(|h| h.date.year() == year)
        .collect();
    Ok(Json(HolidaysResponse {
        country,
        year,
        dates: set.dates_in_year(year),
        holidays,
    }))
}

async fn compare(
    State(state): State<AppState>,
    Path(in_store_date): Path<String>,
) -> Result<Json<Vec<ScheduleResult>>, ApiError> {
    let date = TaPlanner::parse_date(&in_store_date)?;
    let planner = state.planner();
    // Nine back-schedules on the rayon pool; keep them off the async workers.
    let results = tokio::task::spawn_blocking(move || planner.compare(date))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;
    Ok(Json(results))
}
