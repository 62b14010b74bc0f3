//! Classification of a scan time against a period's schedule.

use crate::error::ServiceError;
use chrono::{NaiveTime, Timelike};
use db::models::period;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minutes before `start` during which a scan still counts.
pub const GRACE_BEFORE_MINUTES: i32 = 5;
/// Minutes after `end` during which a scan still counts (as late).
pub const GRACE_AFTER_MINUTES: i32 = 10;

/// Default minutes past start before a scan is late.
pub const DEFAULT_LATE_THRESHOLD: i32 = 15;

/// A civil wall-clock time with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    pub fn new(hours: u32, minutes: u32) -> Option<Self> {
        if hours < 24 && minutes < 60 {
            Some(Self((hours * 60 + minutes) as u16))
        } else {
            None
        }
    }

    pub fn minute_of_day(self) -> i32 {
        i32::from(self.0)
    }

    pub fn hours(self) -> u32 {
        u32::from(self.0 / 60)
    }

    pub fn minutes(self) -> u32 {
        u32::from(self.0 % 60)
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(time: NaiveTime) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours(), self.minutes())
    }
}

impl FromStr for ClockTime {
    type Err = ServiceError;

    /// Accepts `H:MM` or `HH:MM`, 00:00 through 23:59.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ServiceError::InvalidInput(format!("Invalid time '{s}', expected HH:MM"));

        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(h) || h.len() > 2 || !digits(m) || m.len() != 2 {
            return Err(invalid());
        }

        let hours: u32 = h.parse().map_err(|_| invalid())?;
        let minutes: u32 = m.parse().map_err(|_| invalid())?;
        ClockTime::new(hours, minutes).ok_or_else(invalid)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The timing facts of a period that classification needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub start: ClockTime,
    pub end: ClockTime,
    pub late_threshold: i32,
}

impl Schedule {
    pub fn from_period(period: &period::Model) -> Result<Self, ServiceError> {
        Ok(Self {
            start: period.start_time.parse()?,
            end: period.end_time.parse()?,
            late_threshold: period.late_threshold,
        })
    }

    pub fn grace_before(&self) -> i32 {
        self.start.minute_of_day() - GRACE_BEFORE_MINUTES
    }

    pub fn grace_after(&self) -> i32 {
        self.end.minute_of_day() + GRACE_AFTER_MINUTES
    }

    pub fn late_after(&self) -> i32 {
        self.start.minute_of_day() + self.late_threshold
    }

    /// Comparisons are strict exactly as listed; order matters.
    pub fn classify(&self, now: ClockTime) -> WindowOutcome {
        let now = now.minute_of_day();
        let start = self.start.minute_of_day();
        let end = self.end.minute_of_day();

        if now < self.grace_before() || now > self.grace_after() {
            WindowOutcome::OutOfWindow
        } else if now < start {
            WindowOutcome::OnTime
        } else if now > end || now > self.late_after() {
            WindowOutcome::Late
        } else {
            WindowOutcome::OnTime
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowOutcome {
    OnTime,
    Late,
    OutOfWindow,
}
