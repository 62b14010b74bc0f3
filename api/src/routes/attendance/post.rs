use super::common::{ScanRequest, ScanResponse};
use crate::auth::AuthUser;
use crate::routes::common::{
    AttendanceRecordResponse, PeriodResponse, format_validation_errors, service_error,
};
use crate::{response::ApiResponse, state::AppState};
use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use services::ServiceError;
use services::attendance_service::{AttendanceService, ScanSubmission};
use validator::Validate;

/// POST /api/attendance/scan
///
/// Records the calling student's attendance from a scanned QR code.
///
/// ### Request Body
/// ```json
/// { "code": "5f0c...", "latitude": 14.5731, "longitude": 121.1323, "accuracy": 12.0 }
/// ```
/// Location fields are optional. A scan without a complete, precise,
/// in-fence location is recorded as `pending_review`.
///
/// ### Responses
/// - `201 Created` with `{ status, location_status, record, period }`
/// - `400 Bad Request` missing code, invalid coordinates, or expired code
/// - `404 Not Found` unknown code or missing period
/// - `409 Conflict` already scanned for this period today; `data` is the existing record
pub async fn scan_attendance(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<ScanRequest>,
) -> Response {
    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Option<ScanResponse>>::error(format_validation_errors(&e))),
        )
            .into_response();
    }

    let submission = ScanSubmission {
        reading: req.reading(),
        code: req.code,
    };

    let result = AttendanceService::scan(
        state.db(),
        state.geofence(),
        state.clock(),
        claims.sub,
        submission,
        Utc::now(),
    )
    .await;

    match result {
        Ok(outcome) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                ScanResponse {
                    status: outcome.decision.status,
                    location_status: outcome.decision.location_status,
                    record: AttendanceRecordResponse::from(outcome.record),
                    period: PeriodResponse::from(outcome.period),
                },
                "Attendance recorded",
            )),
        )
            .into_response(),
        Err(ServiceError::AlreadyExists(existing)) => (
            StatusCode::CONFLICT,
            Json(ApiResponse::failure(
                AttendanceRecordResponse::from(*existing),
                "Already scanned for this period today",
            )),
        )
            .into_response(),
        Err(e) => service_error::<Option<ScanResponse>>(e).into_response(),
    }
}
