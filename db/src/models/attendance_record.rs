use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, SqlErr};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// One student's attendance for one period on one calendar date.
///
/// The `(student_id, period_id, date)` triple is unique. Location columns
/// are `None` when the scan carried no GPS reading.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attendance_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub period_id: i64,
    pub scan_token_id: Option<i64>,
    /// Institution-local date of the scan.
    pub date: NaiveDate,
    pub scanned_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub status: AttendanceStatus,
    /// Latitude in microdegrees.
    pub latitude: Option<i64>,
    /// Longitude in microdegrees.
    pub longitude: Option<i64>,
    /// Reported GPS accuracy in whole metres.
    pub accuracy: Option<i32>,
    pub location_status: Option<LocationStatus>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Deserialize,
    Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "attendance_status_type")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AttendanceStatus {
    #[sea_orm(string_value = "on_time")]
    OnTime,

    #[sea_orm(string_value = "late")]
    Late,

    #[sea_orm(string_value = "absent")]
    Absent,

    #[sea_orm(string_value = "pending_review")]
    PendingReview,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Deserialize,
    Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "location_status_type")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LocationStatus {
    #[sea_orm(string_value = "verified")]
    Verified,

    #[sea_orm(string_value = "pending_review")]
    PendingReview,
}

impl AttendanceStatus {
    /// Location status implied by a reviewer setting this status.
    pub fn implied_location_status(self) -> LocationStatus {
        match self {
            AttendanceStatus::PendingReview => LocationStatus::PendingReview,
            _ => LocationStatus::Verified,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::period::Entity",
        from = "Column::PeriodId",
        to = "super::period::Column::Id"
    )]
    Period,
    #[sea_orm(
        belongs_to = "super::scan_token::Entity",
        from = "Column::ScanTokenId",
        to = "super::scan_token::Column::Id",
        on_delete = "SetNull"
    )]
    ScanToken,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::period::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Period.def()
    }
}

impl Related<super::scan_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScanToken.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Field values for a new record. Coordinates are already in storage units.
#[derive(Debug, Clone)]
pub struct NewAttendanceRecord {
    pub student_id: i64,
    pub period_id: i64,
    pub scan_token_id: Option<i64>,
    pub date: NaiveDate,
    pub scanned_at: DateTime<Utc>,
    pub status: AttendanceStatus,
    pub latitude: Option<i64>,
    pub longitude: Option<i64>,
    pub accuracy: Option<i32>,
    pub location_status: LocationStatus,
}

/// Narrows a listing. Unset fields match every record.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub date: Option<NaiveDate>,
    pub period_id: Option<i64>,
    pub status: Option<AttendanceStatus>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// A record for the same student, period and date already exists.
    #[error("attendance already recorded (record {})", .0.id)]
    AlreadyExists(Box<Model>),

    #[error("attendance record {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Db(#[from] DbErr),
}

impl Model {
    pub async fn find_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn find_for_key(
        db: &DatabaseConnection,
        student_id: i64,
        period_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::PeriodId.eq(period_id))
            .filter(Column::Date.eq(date))
            .one(db)
            .await
    }

    /// Inserts a record unless one already exists for the same key.
    ///
    /// A concurrent insert that wins the unique index is reported as
    /// [`StoreError::AlreadyExists`] carrying the winning row.
    pub async fn try_create(
        db: &DatabaseConnection,
        new: NewAttendanceRecord,
    ) -> Result<Model, StoreError> {
        if let Some(existing) = Self::find_for_key(db, new.student_id, new.period_id, new.date).await? {
            return Err(StoreError::AlreadyExists(Box::new(existing)));
        }

        Self::insert_or_winner(db, new).await
    }

    /// Inserts without the pre-check. When the unique index rejects the
    /// row, the record already holding the key is returned as the error.
    async fn insert_or_winner(
        db: &DatabaseConnection,
        new: NewAttendanceRecord,
    ) -> Result<Model, StoreError> {
        let (student_id, period_id, date) = (new.student_id, new.period_id, new.date);
        let record = ActiveModel {
            student_id: Set(new.student_id),
            period_id: Set(new.period_id),
            scan_token_id: Set(new.scan_token_id),
            date: Set(new.date),
            scanned_at: Set(new.scanned_at),
            created_at: Set(Utc::now()),
            status: Set(new.status),
            latitude: Set(new.latitude),
            longitude: Set(new.longitude),
            accuracy: Set(new.accuracy),
            location_status: Set(Some(new.location_status)),
            ..Default::default()
        };

        match record.insert(db).await {
            Ok(model) => Ok(model),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                match Self::find_for_key(db, student_id, period_id, date).await? {
                    Some(winner) => Err(StoreError::AlreadyExists(Box::new(winner))),
                    None => Err(StoreError::Db(err)),
                }
            }
            Err(err) => Err(StoreError::Db(err)),
        }
    }

    /// Lists matching records, newest scan first, each with its student.
    pub async fn list(
        db: &DatabaseConnection,
        filter: &RecordFilter,
    ) -> Result<Vec<(Model, Option<super::user::Model>)>, DbErr> {
        let mut query = Entity::find();
        if let Some(date) = filter.date {
            query = query.filter(Column::Date.eq(date));
        }
        if let Some(period_id) = filter.period_id {
            query = query.filter(Column::PeriodId.eq(period_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(Column::Status.eq(status));
        }

        query
            .find_also_related(super::user::Entity)
            .order_by_desc(Column::ScannedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    /// Overwrites the status of a record and derives its location status.
    ///
    /// Applies regardless of the current status, so repeating the same
    /// call leaves the row unchanged.
    pub async fn resolve(
        db: &DatabaseConnection,
        id: i64,
        status: AttendanceStatus,
    ) -> Result<Model, StoreError> {
        let record = Self::find_by_id(db, id)
            .await?
            .ok_or(StoreError::NotFound(id))?;

        let mut active: ActiveModel = record.into();
        active.status = Set(status);
        active.location_status = Set(Some(status.implied_location_status()));

        Ok(active.update(db).await?)
    }
}
