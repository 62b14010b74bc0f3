//! Turns a scan (schedule, reported location, time) into a status.
//!
//! Location quality is judged before fence membership, and a failed fence
//! check always wins over the time window: a scan from outside the fence is
//! never marked late or absent, only sent for review.

use crate::geofence::Geofence;
use crate::time_window::{ClockTime, Schedule, WindowOutcome};
use db::models::attendance_record::{AttendanceStatus, LocationStatus};
use serde::{Deserialize, Serialize};

/// Readings less precise than this are sent for review.
pub const ACCURACY_THRESHOLD_METERS: f64 = 100.0;

/// What the client reported. Any field may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationReading {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accuracy_meters: Option<f64>,
}

/// A complete reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsFix {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_meters: f64,
}

/// Storage form: microdegrees and whole metres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoredLocation {
    pub latitude: Option<i64>,
    pub longitude: Option<i64>,
    pub accuracy: Option<i32>,
}

impl LocationReading {
    /// `None` unless latitude, longitude and accuracy are all present.
    pub fn fix(&self) -> Option<GpsFix> {
        Some(GpsFix {
            latitude: self.latitude?,
            longitude: self.longitude?,
            accuracy_meters: self.accuracy_meters?,
        })
    }

    /// Partial readings are kept as-is for the reviewer.
    pub fn to_micro(&self) -> StoredLocation {
        StoredLocation {
            latitude: self.latitude.map(to_microdegrees),
            longitude: self.longitude.map(to_microdegrees),
            accuracy: self.accuracy_meters.map(|m| m.round() as i32),
        }
    }
}

pub fn to_microdegrees(degrees: f64) -> i64 {
    (degrees * 1e6).round() as i64
}

pub fn from_microdegrees(micro: i64) -> f64 {
    micro as f64 / 1e6
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub status: AttendanceStatus,
    pub location_status: LocationStatus,
}

impl Decision {
    const fn review() -> Self {
        Self {
            status: AttendanceStatus::PendingReview,
            location_status: LocationStatus::PendingReview,
        }
    }
}

pub struct DecisionEngine<'a> {
    geofence: &'a Geofence,
}

impl<'a> DecisionEngine<'a> {
    pub fn new(geofence: &'a Geofence) -> Self {
        Self { geofence }
    }

    pub fn decide(&self, schedule: &Schedule, fix: Option<GpsFix>, now: ClockTime) -> Decision {
        let Some(fix) = fix else {
            return Decision::review();
        };
        // NaN accuracy counts as imprecise
        if !(fix.accuracy_meters <= ACCURACY_THRESHOLD_METERS) {
            return Decision::review();
        }
        if self.geofence.is_enabled() && !self.geofence.is_within(fix.latitude, fix.longitude) {
            return Decision::review();
        }

        let status = match schedule.classify(now) {
            WindowOutcome::OnTime => AttendanceStatus::OnTime,
            WindowOutcome::Late => AttendanceStatus::Late,
            WindowOutcome::OutOfWindow => AttendanceStatus::Absent,
        };
        Decision {
            status,
            location_status: LocationStatus::Verified,
        }
    }
}
