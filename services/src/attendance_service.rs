use crate::clock::InstitutionClock;
use crate::decision::{Decision, DecisionEngine, LocationReading};
use crate::error::ServiceError;
use crate::geofence::Geofence;
use crate::scan_token_service::ScanTokenService;
use crate::time_window::Schedule;
use chrono::{DateTime, Utc};
use db::models::attendance_record::{self, AttendanceStatus, NewAttendanceRecord, RecordFilter};
use db::models::{period, user};
use sea_orm::DatabaseConnection;

pub use db::models::attendance_record::Model as AttendanceRecord;

/// A student's scan as submitted by the client.
#[derive(Debug, Clone, Default)]
pub struct ScanSubmission {
    pub code: String,
    pub reading: LocationReading,
}

#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub record: AttendanceRecord,
    pub period: period::Model,
    pub decision: Decision,
}

pub struct AttendanceService;

impl AttendanceService {
    /// Records a student's scan.
    ///
    /// The attendance date is the institution's date at `now`, not the
    /// date the token was issued for.
    pub async fn scan(
        db: &DatabaseConnection,
        geofence: &Geofence,
        clock: &InstitutionClock,
        student_id: i64,
        submission: ScanSubmission,
        now: DateTime<Utc>,
    ) -> Result<ScanOutcome, ServiceError> {
        let code = submission.code.trim();
        if code.is_empty() {
            return Err(ServiceError::InvalidInput("QR code is required".into()));
        }

        let token = ScanTokenService::resolve(db, code).await?;
        if token.is_expired(now) {
            return Err(ServiceError::Expired);
        }

        let period = period::Model::find_by_id(db, token.period_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Period not found".into()))?;

        let date = clock.date_at(now);
        if let Some(existing) =
            attendance_record::Model::find_for_key(db, student_id, period.id, date).await?
        {
            return Err(ServiceError::AlreadyExists(Box::new(existing)));
        }

        let schedule = Schedule::from_period(&period)?;
        let decision = DecisionEngine::new(geofence).decide(
            &schedule,
            submission.reading.fix(),
            clock.time_at(now),
        );
        let stored = submission.reading.to_micro();

        let record = attendance_record::Model::try_create(
            db,
            NewAttendanceRecord {
                student_id,
                period_id: period.id,
                scan_token_id: Some(token.id),
                date,
                scanned_at: now,
                status: decision.status,
                latitude: stored.latitude,
                longitude: stored.longitude,
                accuracy: stored.accuracy,
                location_status: decision.location_status,
            },
        )
        .await?;

        tracing::info!(
            record_id = record.id,
            student_id,
            period_id = period.id,
            status = %decision.status,
            location_status = %decision.location_status,
            "Attendance recorded"
        );

        Ok(ScanOutcome {
            record,
            period,
            decision,
        })
    }

    /// Records for the staff review screen, newest first.
    pub async fn list(
        db: &DatabaseConnection,
        filter: &RecordFilter,
    ) -> Result<Vec<(AttendanceRecord, Option<user::Model>)>, ServiceError> {
        Ok(attendance_record::Model::list(db, filter).await?)
    }

    /// Manual review. Any status may be set on any record.
    pub async fn review(
        db: &DatabaseConnection,
        record_id: i64,
        status: AttendanceStatus,
        reviewer_id: i64,
    ) -> Result<AttendanceRecord, ServiceError> {
        let record = attendance_record::Model::resolve(db, record_id, status).await?;
        tracing::info!(record_id, reviewer_id, status = %status, "Attendance reviewed");
        Ok(record)
    }
}
