use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{PaginatorTrait, QueryOrder, TransactionTrait};
use serde::{Deserialize, Serialize};

/// A scheduled class slot that attendance is tracked against.
///
/// `start_time` and `end_time` are civil `HH:MM` strings in the
/// institution's timezone. They carry no date.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "periods")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub strand: Option<String>,
    pub section: Option<String>,
    pub subject: Option<String>,
    /// Owning teacher. `None` for shared periods created before ownership existed.
    pub teacher_id: Option<i64>,
    pub start_time: String,
    pub end_time: String,
    /// Minutes past `start_time` after which a scan counts as late.
    pub late_threshold: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TeacherId",
        to = "super::user::Column::Id"
    )]
    Teacher,
    #[sea_orm(has_many = "super::scan_token::Entity")]
    ScanTokens,
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    AttendanceRecords,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::scan_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScanTokens.def()
    }
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Field values for a new period. Times must already be validated `HH:MM`.
#[derive(Debug, Clone)]
pub struct NewPeriod {
    pub name: String,
    pub strand: Option<String>,
    pub section: Option<String>,
    pub subject: Option<String>,
    pub teacher_id: Option<i64>,
    pub start_time: String,
    pub end_time: String,
    pub late_threshold: i32,
}

/// Partial update; `None` leaves the stored value untouched. For the
/// optional tags, `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default)]
pub struct PeriodChanges {
    pub name: Option<String>,
    pub strand: Option<Option<String>>,
    pub section: Option<Option<String>>,
    pub subject: Option<Option<String>>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub late_threshold: Option<i32>,
}

impl Model {
    pub async fn create(db: &DatabaseConnection, new: NewPeriod) -> Result<Model, DbErr> {
        let now = Utc::now();
        let period = ActiveModel {
            name: Set(new.name),
            strand: Set(new.strand),
            section: Set(new.section),
            subject: Set(new.subject),
            teacher_id: Set(new.teacher_id),
            start_time: Set(new.start_time),
            end_time: Set(new.end_time),
            late_threshold: Set(new.late_threshold),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        period.insert(db).await
    }

    pub async fn find_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_asc(Column::StartTime)
            .order_by_asc(Column::Name)
            .all(db)
            .await
    }

    pub async fn update(&self, db: &DatabaseConnection, changes: PeriodChanges) -> Result<Model, DbErr> {
        let mut period: ActiveModel = self.clone().into();

        if let Some(name) = changes.name {
            period.name = Set(name);
        }
        if let Some(strand) = changes.strand {
            period.strand = Set(strand);
        }
        if let Some(section) = changes.section {
            period.section = Set(section);
        }
        if let Some(subject) = changes.subject {
            period.subject = Set(subject);
        }
        if let Some(start) = changes.start_time {
            period.start_time = Set(start);
        }
        if let Some(end) = changes.end_time {
            period.end_time = Set(end);
        }
        if let Some(threshold) = changes.late_threshold {
            period.late_threshold = Set(threshold);
        }
        period.updated_at = Set(Utc::now());

        period.update(db).await
    }

    /// Counts scan tokens and attendance records that reference this period.
    pub async fn dependent_counts(&self, db: &DatabaseConnection) -> Result<(u64, u64), DbErr> {
        let tokens = super::scan_token::Entity::find()
            .filter(super::scan_token::Column::PeriodId.eq(self.id))
            .count(db)
            .await?;
        let records = super::attendance_record::Entity::find()
            .filter(super::attendance_record::Column::PeriodId.eq(self.id))
            .count(db)
            .await?;
        Ok((tokens, records))
    }

    /// Deletes the period only. Fails at the storage layer if anything still references it.
    pub async fn delete(self, db: &DatabaseConnection) -> Result<(), DbErr> {
        Entity::delete_by_id(self.id).exec(db).await?;
        Ok(())
    }

    /// Deletes attendance records and scan tokens for the period, then the
    /// period itself, in one transaction.
    pub async fn delete_cascade(self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let txn = db.begin().await?;

        super::attendance_record::Entity::delete_many()
            .filter(super::attendance_record::Column::PeriodId.eq(self.id))
            .exec(&txn)
            .await?;
        super::scan_token::Entity::delete_many()
            .filter(super::scan_token::Column::PeriodId.eq(self.id))
            .exec(&txn)
            .await?;
        Entity::delete_by_id(self.id).exec(&txn).await?;

        txn.commit().await
    }
}
