use super::common::{AttendanceListItem, AttendanceListResponse, ListAttendanceQuery};
use crate::routes::common::service_error;
use crate::{response::ApiResponse, state::AppState};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use db::models::attendance_record::{AttendanceStatus, RecordFilter};
use services::attendance_service::AttendanceService;

/// GET /api/attendance
///
/// Lists attendance records for review, newest scan first.
///
/// ### Query Parameters
/// - `date` (optional): `YYYY-MM-DD`
/// - `period_id` (optional)
/// - `status` (optional): `on_time`, `late`, `absent` or `pending_review`
///
/// ### Responses
/// - `200 OK` with `{ records, count }`; each record carries its student
/// - `400 Bad Request` for an unknown status
pub async fn list_attendance(
    State(state): State<AppState>,
    Query(query): Query<ListAttendanceQuery>,
) -> (StatusCode, Json<ApiResponse<AttendanceListResponse>>) {
    let status = match query.status.as_deref().map(str::parse::<AttendanceStatus>) {
        None => None,
        Some(Ok(status)) => Some(status),
        Some(Err(_)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("Invalid status")),
            );
        }
    };

    let filter = RecordFilter {
        date: query.date,
        period_id: query.period_id,
        status,
    };

    match AttendanceService::list(state.db(), &filter).await {
        Ok(rows) => {
            let records: Vec<AttendanceListItem> = rows.into_iter().map(Into::into).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    AttendanceListResponse {
                        count: records.len(),
                        records,
                    },
                    "Attendance retrieved successfully",
                )),
            )
        }
        Err(e) => service_error(e),
    }
}
