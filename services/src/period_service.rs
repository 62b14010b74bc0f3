use crate::error::ServiceError;
use crate::time_window::{ClockTime, DEFAULT_LATE_THRESHOLD};
use db::models::period::{self, NewPeriod, PeriodChanges};
use sea_orm::DatabaseConnection;

pub use db::models::period::Model as Period;

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_LATE_THRESHOLD: i32 = 240;

/// Who is acting on a period, as far as ownership rules care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i64,
    /// May edit and delete periods owned by anyone.
    pub administers_periods: bool,
}

#[derive(Debug, Clone)]
pub struct CreatePeriod {
    pub name: String,
    pub strand: Option<String>,
    pub section: Option<String>,
    pub subject: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub late_threshold: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePeriod {
    pub name: Option<String>,
    pub strand: Option<String>,
    pub section: Option<String>,
    pub subject: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub late_threshold: Option<i32>,
}

fn validate_name(name: &str) -> Result<String, ServiceError> {
    let name = name.trim();
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_LENGTH {
        return Err(ServiceError::InvalidInput(format!(
            "Name must be between 1 and {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(name.to_owned())
}

fn validate_threshold(threshold: i32) -> Result<i32, ServiceError> {
    if !(0..=MAX_LATE_THRESHOLD).contains(&threshold) {
        return Err(ServiceError::InvalidInput(format!(
            "Late threshold must be between 0 and {MAX_LATE_THRESHOLD} minutes"
        )));
    }
    Ok(threshold)
}

/// Parses both bounds and returns them normalised to `HH:MM`.
fn validate_times(start: &str, end: &str) -> Result<(String, String), ServiceError> {
    let start: ClockTime = start.parse()?;
    let end: ClockTime = end.parse()?;
    if end <= start {
        return Err(ServiceError::InvalidInput("End time must be after start time".into()));
    }
    Ok((start.to_string(), end.to_string()))
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

pub struct PeriodService;

impl PeriodService {
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<Period>, ServiceError> {
        Ok(period::Model::find_all(db).await?)
    }

    pub async fn get(db: &DatabaseConnection, id: i64) -> Result<Period, ServiceError> {
        period::Model::find_by_id(db, id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Period not found".into()))
    }

    pub async fn create(
        db: &DatabaseConnection,
        owner_id: i64,
        params: CreatePeriod,
    ) -> Result<Period, ServiceError> {
        let name = validate_name(&params.name)?;
        let (start_time, end_time) = validate_times(&params.start_time, &params.end_time)?;
        let late_threshold = validate_threshold(params.late_threshold.unwrap_or(DEFAULT_LATE_THRESHOLD))?;

        let period = period::Model::create(
            db,
            NewPeriod {
                name,
                strand: blank_to_none(params.strand),
                section: blank_to_none(params.section),
                subject: blank_to_none(params.subject),
                teacher_id: Some(owner_id),
                start_time,
                end_time,
                late_threshold,
            },
        )
        .await?;

        tracing::info!(period_id = period.id, owner_id, "Period created");
        Ok(period)
    }

    pub async fn update(
        db: &DatabaseConnection,
        actor: Actor,
        id: i64,
        params: UpdatePeriod,
    ) -> Result<Period, ServiceError> {
        let existing = Self::get(db, id).await?;
        ensure_can_modify(&existing, actor)?;

        let name = params.name.as_deref().map(validate_name).transpose()?;
        let late_threshold = params.late_threshold.map(validate_threshold).transpose()?;

        let (start_time, end_time) = if params.start_time.is_some() || params.end_time.is_some() {
            let start = params.start_time.as_deref().unwrap_or(&existing.start_time);
            let end = params.end_time.as_deref().unwrap_or(&existing.end_time);
            let (start, end) = validate_times(start, end)?;
            (Some(start), Some(end))
        } else {
            (None, None)
        };

        let updated = existing
            .update(
                db,
                PeriodChanges {
                    name,
                    strand: params.strand.map(|v| blank_to_none(Some(v))),
                    section: params.section.map(|v| blank_to_none(Some(v))),
                    subject: params.subject.map(|v| blank_to_none(Some(v))),
                    start_time,
                    end_time,
                    late_threshold,
                },
            )
            .await?;

        tracing::info!(period_id = id, actor_id = actor.user_id, "Period updated");
        Ok(updated)
    }

    /// Owners delete with everything that references the period. Admins
    /// acting on someone else's period may only delete an unreferenced one.
    pub async fn delete(db: &DatabaseConnection, actor: Actor, id: i64) -> Result<(), ServiceError> {
        let existing = Self::get(db, id).await?;
        ensure_can_modify(&existing, actor)?;

        if is_owner(&existing, actor) {
            existing.delete_cascade(db).await?;
            tracing::info!(period_id = id, actor_id = actor.user_id, "Period deleted with dependents");
            return Ok(());
        }

        let (tokens, records) = existing.dependent_counts(db).await?;
        if tokens > 0 || records > 0 {
            return Err(ServiceError::Conflict(format!(
                "Period is referenced by {records} attendance record(s) and {tokens} QR code(s)"
            )));
        }

        existing.delete(db).await?;
        tracing::info!(period_id = id, actor_id = actor.user_id, "Period deleted");
        Ok(())
    }
}

fn is_owner(period: &Period, actor: Actor) -> bool {
    period.teacher_id == Some(actor.user_id)
}

fn ensure_can_modify(period: &Period, actor: Actor) -> Result<(), ServiceError> {
    if is_owner(period, actor) || actor.administers_periods {
        Ok(())
    } else {
        Err(ServiceError::Forbidden("Only the owner of this period can change it".into()))
    }
}
