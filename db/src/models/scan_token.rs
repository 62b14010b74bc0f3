use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A QR scan credential bound to one period and one calendar date.
///
/// Tokens are never mutated after issue. Expiry is checked when the token
/// is read; stale rows are not cleaned up.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "scan_tokens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Opaque code embedded in the QR image.
    #[sea_orm(unique)]
    pub code: String,
    pub period_id: i64,
    pub date: NaiveDate,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::period::Entity",
        from = "Column::PeriodId",
        to = "super::period::Column::Id"
    )]
    Period,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    Creator,
}

impl Related<super::period::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Period.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Generates a fresh unguessable code. Codes are looked up, never verified,
/// so a v4 UUID carries enough entropy.
pub fn generate_code() -> String {
    Uuid::new_v4().simple().to_string()
}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        period_id: i64,
        date: NaiveDate,
        expires_at: DateTime<Utc>,
        created_by: Option<i64>,
    ) -> Result<Model, DbErr> {
        let token = ActiveModel {
            code: Set(generate_code()),
            period_id: Set(period_id),
            date: Set(date),
            expires_at: Set(expires_at),
            created_at: Set(Utc::now()),
            created_by: Set(created_by),
            ..Default::default()
        };

        token.insert(db).await
    }

    pub async fn find_by_code(db: &DatabaseConnection, code: &str) -> Result<Option<Model>, DbErr> {
        Entity::find().filter(Column::Code.eq(code)).one(db).await
    }

    /// A token is expired strictly after its expiry instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
