use sea_orm_migration::prelude::*;

use crate::migrations;

/// Ordered list of schema steps. Each step is idempotent, so re-running the
/// list against a partially migrated database only applies what is missing.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202510010001_create_users::Migration),
            Box::new(migrations::m202510010002_create_periods::Migration),
            Box::new(migrations::m202510010003_create_scan_tokens::Migration),
            Box::new(migrations::m202510010004_create_attendance_records::Migration),
            Box::new(migrations::m202510080001_add_attendance_location::Migration),
            Box::new(migrations::m202510080002_add_period_teacher::Migration),
        ]
    }
}
