use crate::routes::common::{AttendanceRecordResponse, PeriodResponse};
use chrono::NaiveDate;
use db::models::attendance_record::{AttendanceStatus, LocationStatus, Model as AttendanceRecord};
use db::models::user::Model as UserModel;
use serde::{Deserialize, Serialize};
use services::decision::LocationReading;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ScanRequest {
    #[serde(default, alias = "qrCode")]
    #[validate(length(min = 1, message = "QR code is required"))]
    pub code: String,
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub longitude: Option<f64>,
    /// Reported GPS accuracy in metres.
    #[validate(range(min = 0.0, message = "Accuracy cannot be negative"))]
    pub accuracy: Option<f64>,
}

impl ScanRequest {
    pub fn reading(&self) -> LocationReading {
        LocationReading {
            latitude: self.latitude,
            longitude: self.longitude,
            accuracy_meters: self.accuracy,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScanResponse {
    pub status: AttendanceStatus,
    pub location_status: LocationStatus,
    pub record: AttendanceRecordResponse,
    pub period: PeriodResponse,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    #[serde(alias = "attendanceId")]
    pub record_id: Option<i64>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListAttendanceQuery {
    pub date: Option<NaiveDate>,
    #[serde(alias = "periodId")]
    pub period_id: Option<i64>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StudentSummary {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AttendanceListItem {
    #[serde(flatten)]
    pub record: AttendanceRecordResponse,
    pub student: Option<StudentSummary>,
}

impl From<(AttendanceRecord, Option<UserModel>)> for AttendanceListItem {
    fn from((record, student): (AttendanceRecord, Option<UserModel>)) -> Self {
        Self {
            record: record.into(),
            student: student.map(|u| StudentSummary {
                id: u.id,
                username: u.username,
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct AttendanceListResponse {
    pub records: Vec<AttendanceListItem>,
    pub count: usize,
}
