use crate::routes::common::{PeriodResponse, service_error};
use crate::{response::ApiResponse, state::AppState};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use services::period_service::PeriodService;

/// GET /api/periods
///
/// Lists all periods ordered by start time, then name. Any authenticated caller.
pub async fn list_periods(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<Vec<PeriodResponse>>>) {
    match PeriodService::list(state.db()).await {
        Ok(periods) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                periods.into_iter().map(PeriodResponse::from).collect(),
                "Periods retrieved successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}

/// GET /api/periods/{period_id}
///
/// - `200 OK` with the period
/// - `404 Not Found` if it does not exist
pub async fn get_period(
    State(state): State<AppState>,
    Path(period_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<Option<PeriodResponse>>>) {
    match PeriodService::get(state.db(), period_id).await {
        Ok(period) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(PeriodResponse::from(period)),
                "Period retrieved successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}
