use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::DailyUsageReport;
use crate::services::UsageService;

#[derive(Deserialize)]
pub struct DailyUsageParams {
    device_serial: String,
    date: String,
}

/// GET /api/v1/usage/daily
/// Returns the fixed 24-hour usage summary for one device and day. Upstream
/// failures still answer 200 with the error carried inside the report.
pub async fn get_daily_usage(
    State(service): State<UsageService>,
    Query(params): Query<DailyUsageParams>,
) -> Result<Json<DailyUsageReport>> {
    if params.device_serial.trim().is_empty() {
        return Err(AppError::Validation(
            "device_serial must not be empty".to_string(),
        ));
    }

    let date = NaiveDate::parse_from_str(&params.date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date format: {}", params.date)))?;

    let report = service.daily_summary(&params.device_serial, date).await;
    Ok(Json(report))
}

pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "ok" })),
    )
}
