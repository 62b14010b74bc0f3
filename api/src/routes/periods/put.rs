use super::common::{UpdatePeriodRequest, actor};
use crate::auth::AuthUser;
use crate::routes::common::{PeriodResponse, format_validation_errors, service_error};
use crate::{response::ApiResponse, state::AppState};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use services::period_service::{PeriodService, UpdatePeriod};
use validator::Validate;

/// PUT /api/periods/{period_id}
///
/// Partially updates a period. Only the owner, or a caller who administers
/// periods, may do so. Times are re-validated against the stored values.
///
/// ### Responses
/// - `200 OK` with the updated period
/// - `400 Bad Request` for invalid input or an empty body
/// - `403 Forbidden` if the caller neither owns nor administers the period
/// - `404 Not Found`
pub async fn update_period(
    State(state): State<AppState>,
    Path(period_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<UpdatePeriodRequest>,
) -> (StatusCode, Json<ApiResponse<Option<PeriodResponse>>>) {
    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(&e))),
        );
    }

    if req.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("At least one field must be provided")),
        );
    }

    let changes = UpdatePeriod {
        name: req.name,
        strand: req.strand,
        section: req.section,
        subject: req.subject,
        start_time: req.start_time,
        end_time: req.end_time,
        late_threshold: req.late_threshold,
    };

    match PeriodService::update(state.db(), actor(&user), period_id, changes).await {
        Ok(period) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(PeriodResponse::from(period)),
                "Period updated successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}
