use crate::response::ApiResponse;
use axum::{Json, http::StatusCode};
use db::models::attendance_record::{AttendanceStatus, LocationStatus, Model as AttendanceRecord};
use db::models::period::Model as Period;
use serde::{Deserialize, Serialize};
use services::ServiceError;
use services::decision::from_microdegrees;
use validator::ValidationErrors;

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Maps a service failure onto a status code and an error envelope.
///
/// `AlreadyExists` is handled by the scan route itself since it carries a
/// record; anywhere else it is reported as a plain conflict.
pub fn service_error<T>(err: ServiceError) -> (StatusCode, Json<ApiResponse<T>>)
where
    T: Serialize + Default,
{
    let status = match &err {
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Expired | ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        ServiceError::AlreadyExists(_) | ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
        ServiceError::Database(e) => {
            tracing::error!(error = %e, "Database error");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Internal server error")),
            );
        }
    };
    (status, Json(ApiResponse::error(err.to_string())))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PeriodResponse {
    pub id: i64,
    pub name: String,
    pub strand: Option<String>,
    pub section: Option<String>,
    pub subject: Option<String>,
    pub teacher_id: Option<i64>,
    pub start_time: String,
    pub end_time: String,
    pub late_threshold: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Period> for PeriodResponse {
    fn from(p: Period) -> Self {
        Self {
            id: p.id,
            name: p.name,
            strand: p.strand,
            section: p.section,
            subject: p.subject,
            teacher_id: p.teacher_id,
            start_time: p.start_time,
            end_time: p.end_time,
            late_threshold: p.late_threshold,
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.to_rfc3339(),
        }
    }
}

/// Attendance record as clients see it: coordinates back in degrees.
#[derive(Debug, Serialize, Deserialize)]
pub struct AttendanceRecordResponse {
    pub id: i64,
    pub student_id: i64,
    pub period_id: i64,
    pub scan_token_id: Option<i64>,
    pub date: String,
    pub scanned_at: String,
    pub status: AttendanceStatus,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accuracy: Option<i32>,
    pub location_status: Option<LocationStatus>,
}

impl From<AttendanceRecord> for AttendanceRecordResponse {
    fn from(r: AttendanceRecord) -> Self {
        Self {
            id: r.id,
            student_id: r.student_id,
            period_id: r.period_id,
            scan_token_id: r.scan_token_id,
            date: r.date.to_string(),
            scanned_at: r.scanned_at.to_rfc3339(),
            status: r.status,
            latitude: r.latitude.map(from_microdegrees),
            longitude: r.longitude.map(from_microdegrees),
            accuracy: r.accuracy,
            location_status: r.location_status,
        }
    }
}
