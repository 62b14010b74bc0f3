// migration: attendance location columns, added after the first rollout
use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510080001_add_attendance_location"
    }
}

const TABLE: &str = "attendance_records";

fn location_columns() -> Vec<ColumnDef> {
    vec![
        // microdegrees, round(deg * 1e6)
        ColumnDef::new(Alias::new("latitude")).big_integer().null().to_owned(),
        ColumnDef::new(Alias::new("longitude")).big_integer().null().to_owned(),
        // metres
        ColumnDef::new(Alias::new("accuracy")).integer().null().to_owned(),
        ColumnDef::new(Alias::new("location_status"))
            .enumeration(
                Alias::new("location_status_type"),
                vec![Alias::new("verified"), Alias::new("pending_review")],
            )
            .null()
            .to_owned(),
    ]
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // SQLite only accepts one ADD COLUMN per ALTER TABLE.
        for mut column in location_columns() {
            let name = column.get_column_name();
            if manager.has_column(TABLE, &name).await? {
                continue;
            }
            manager
                .alter_table(
                    Table::alter()
                        .table(Alias::new(TABLE))
                        .add_column(&mut column)
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for column in location_columns() {
            let name = column.get_column_name();
            if !manager.has_column(TABLE, &name).await? {
                continue;
            }
            manager
                .alter_table(
                    Table::alter()
                        .table(Alias::new(TABLE))
                        .drop_column(Alias::new(name))
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }
}
