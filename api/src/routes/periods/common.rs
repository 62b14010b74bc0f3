use crate::auth::{AuthUser, guards::Capability};
use serde::Deserialize;
use services::period_service::Actor;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePeriodRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    pub strand: Option<String>,
    pub section: Option<String>,
    pub subject: Option<String>,
    #[serde(alias = "startTime")]
    pub start_time: String,
    #[serde(alias = "endTime")]
    pub end_time: String,
    #[serde(alias = "lateThreshold")]
    #[validate(range(min = 0, max = 240, message = "Late threshold must be between 0 and 240 minutes"))]
    pub late_threshold: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePeriodRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    pub strand: Option<String>,
    pub section: Option<String>,
    pub subject: Option<String>,
    #[serde(alias = "startTime")]
    pub start_time: Option<String>,
    #[serde(alias = "endTime")]
    pub end_time: Option<String>,
    #[serde(alias = "lateThreshold")]
    #[validate(range(min = 0, max = 240, message = "Late threshold must be between 0 and 240 minutes"))]
    pub late_threshold: Option<i32>,
}

impl UpdatePeriodRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.strand.is_none()
            && self.section.is_none()
            && self.subject.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.late_threshold.is_none()
    }
}

pub fn actor(user: &AuthUser) -> Actor {
    Actor {
        user_id: user.0.sub,
        administers_periods: user.can(Capability::AdministerPeriods),
    }
}
