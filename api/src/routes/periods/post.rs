use super::common::CreatePeriodRequest;
use crate::auth::AuthUser;
use crate::routes::common::{PeriodResponse, format_validation_errors, service_error};
use crate::{response::ApiResponse, state::AppState};
use axum::{Extension, Json, extract::State, http::StatusCode};
use services::period_service::{CreatePeriod, PeriodService};
use validator::Validate;

/// POST /api/periods
///
/// Creates a period owned by the caller.
///
/// ### Request Body
/// ```json
/// {
///   "name": "Period 1",
///   "strand": "STEM",
///   "section": "201",
///   "subject": "General Chemistry",
///   "start_time": "08:00",
///   "end_time": "09:00",
///   "late_threshold": 15
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the new period
/// - `400 Bad Request` for invalid names, times or thresholds
/// - `403 Forbidden` without `ManagePeriods`
pub async fn create_period(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreatePeriodRequest>,
) -> (StatusCode, Json<ApiResponse<Option<PeriodResponse>>>) {
    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(&e))),
        );
    }

    let params = CreatePeriod {
        name: req.name,
        strand: req.strand,
        section: req.section,
        subject: req.subject,
        start_time: req.start_time,
        end_time: req.end_time,
        late_threshold: req.late_threshold,
    };

    match PeriodService::create(state.db(), user.0.sub, params).await {
        Ok(period) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                Some(PeriodResponse::from(period)),
                "Period created successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}
