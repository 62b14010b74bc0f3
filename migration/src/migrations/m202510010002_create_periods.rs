use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010002_create_periods"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("periods"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("name")).string().not_null())
                    .col(ColumnDef::new(Alias::new("strand")).string().null())
                    .col(ColumnDef::new(Alias::new("section")).string().null())
                    .col(ColumnDef::new(Alias::new("subject")).string().null())
                    // "HH:MM" in the institution's civil time
                    .col(ColumnDef::new(Alias::new("start_time")).string_len(5).not_null())
                    .col(ColumnDef::new(Alias::new("end_time")).string_len(5).not_null())
                    .col(
                        ColumnDef::new(Alias::new("late_threshold"))
                            .integer()
                            .not_null()
                            .default(15),
                    )
                    .col(ColumnDef::new(Alias::new("created_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(Alias::new("updated_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("periods")).to_owned())
            .await
    }
}
