use crate::clock::InstitutionClock;
use crate::error::ServiceError;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use db::models::{period, scan_token};
use sea_orm::DatabaseConnection;
use util::config::AppConfig;

pub use db::models::scan_token::Model as ScanToken;

/// Longest lifetime a token may be issued with (one day).
pub const MAX_TTL_MINUTES: i64 = 24 * 60;

#[derive(Debug, Clone)]
pub struct IssueScanToken {
    pub period_id: i64,
    pub issued_by: Option<i64>,
    /// Calendar date the token is for. Defaults to the institution's date at issue time.
    pub date: Option<NaiveDate>,
    /// Defaults to `DEFAULT_QR_TTL_MINUTES`.
    pub ttl_minutes: Option<i64>,
}

pub struct ScanTokenService;

impl ScanTokenService {
    pub async fn issue(
        db: &DatabaseConnection,
        clock: &InstitutionClock,
        params: IssueScanToken,
        now: DateTime<Utc>,
    ) -> Result<(ScanToken, period::Model), ServiceError> {
        let ttl = params
            .ttl_minutes
            .unwrap_or_else(|| AppConfig::global().default_qr_ttl_minutes);
        if !(1..=MAX_TTL_MINUTES).contains(&ttl) {
            return Err(ServiceError::InvalidInput(format!(
                "Expiry must be between 1 and {MAX_TTL_MINUTES} minutes"
            )));
        }

        let period = period::Model::find_by_id(db, params.period_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Period not found".into()))?;

        let date = params.date.unwrap_or_else(|| clock.date_at(now));
        let token = scan_token::Model::create(
            db,
            period.id,
            date,
            now + Duration::minutes(ttl),
            params.issued_by,
        )
        .await?;

        tracing::info!(
            token_id = token.id,
            period_id = period.id,
            %date,
            ttl_minutes = ttl,
            "Issued scan token"
        );
        Ok((token, period))
    }

    pub async fn resolve(db: &DatabaseConnection, code: &str) -> Result<ScanToken, ServiceError> {
        scan_token::Model::find_by_code(db, code)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Invalid QR code".into()))
    }
}
