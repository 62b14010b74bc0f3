use crate::routes::common::PeriodResponse;
use chrono::{DateTime, NaiveDate, Utc};
use db::models::scan_token::Model as ScanToken;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateQrRequest {
    #[serde(alias = "periodId")]
    pub period_id: i64,
    /// `YYYY-MM-DD`. Defaults to today at the institution.
    pub date: Option<NaiveDate>,
    #[serde(alias = "expiresInMinutes")]
    #[validate(range(min = 1, max = 1440, message = "Expiry must be between 1 and 1440 minutes"))]
    pub expires_in_minutes: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct QrCodeResponse {
    pub id: i64,
    pub code: String,
    pub period_id: i64,
    pub date: String,
    pub expires_at: String,
    pub created_at: String,
    pub created_by: Option<i64>,
    pub expired: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<PeriodResponse>,
}

impl QrCodeResponse {
    pub fn new(token: ScanToken, now: DateTime<Utc>) -> Self {
        Self {
            expired: token.is_expired(now),
            id: token.id,
            code: token.code,
            period_id: token.period_id,
            date: token.date.to_string(),
            expires_at: token.expires_at.to_rfc3339(),
            created_at: token.created_at.to_rfc3339(),
            created_by: token.created_by,
            period: None,
        }
    }

    pub fn with_period(mut self, period: PeriodResponse) -> Self {
        self.period = Some(period);
        self
    }
}
