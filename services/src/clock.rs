use crate::error::ServiceError;
use crate::time_window::ClockTime;
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

/// The institution's civil clock.
///
/// Period times and attendance dates are read off this clock, never off the
/// server's local zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstitutionClock {
    offset: FixedOffset,
}

impl InstitutionClock {
    pub fn from_offset_minutes(minutes: i32) -> Result<Self, ServiceError> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(|offset| Self { offset })
            .ok_or_else(|| ServiceError::InvalidInput(format!("UTC offset {minutes} minutes is out of range")))
    }

    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn local(&self, now: DateTime<Utc>) -> DateTime<FixedOffset> {
        now.with_timezone(&self.offset)
    }

    pub fn date_at(&self, now: DateTime<Utc>) -> NaiveDate {
        self.local(now).date_naive()
    }

    /// Wall-clock time at `now`, seconds truncated.
    pub fn time_at(&self, now: DateTime<Utc>) -> ClockTime {
        ClockTime::from(self.local(now).time())
    }
}
