use db::models::attendance_record::{Model as AttendanceRecord, StoreError};
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("QR code has expired, ask your teacher to generate a new one")]
    Expired,

    /// Benign: the caller already has a record for this period today.
    #[error("Attendance already recorded for this period today")]
    AlreadyExists(Box<AttendanceRecord>),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists(existing) => ServiceError::AlreadyExists(existing),
            StoreError::NotFound(id) => ServiceError::NotFound(format!("Attendance record {id} not found")),
            StoreError::Db(e) => ServiceError::Database(e),
        }
    }
}
