use super::common::VerifyRequest;
use crate::auth::AuthUser;
use crate::routes::common::{AttendanceRecordResponse, service_error};
use crate::{response::ApiResponse, state::AppState};
use axum::{Extension, Json, extract::State, http::StatusCode};
use db::models::attendance_record::AttendanceStatus;
use services::attendance_service::AttendanceService;

/// PATCH /api/attendance/verify
///
/// Manually sets the status of a record. Any status may be set on any
/// record; `location_status` becomes `pending_review` only when the new
/// status is `pending_review`, otherwise `verified`.
///
/// ### Request Body
/// ```json
/// { "record_id": 12, "status": "late" }
/// ```
///
/// ### Responses
/// - `200 OK` with the updated record
/// - `400 Bad Request` missing fields or unknown status
/// - `404 Not Found` unknown record
pub async fn verify_attendance(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<VerifyRequest>,
) -> (StatusCode, Json<ApiResponse<Option<AttendanceRecordResponse>>>) {
    let (Some(record_id), Some(status)) = (req.record_id, req.status) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Record ID and status are required")),
        );
    };

    let Ok(status) = status.parse::<AttendanceStatus>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Invalid status")),
        );
    };

    match AttendanceService::review(state.db(), record_id, status, claims.sub).await {
        Ok(record) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(AttendanceRecordResponse::from(record)),
                "Attendance updated successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}
