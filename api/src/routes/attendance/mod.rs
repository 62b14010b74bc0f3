//! # Attendance Routes Module
//!
//! - `GET /attendance` → `list_attendance` (ReviewAttendance)
//! - `POST /attendance/scan` → `scan_attendance` (ScanAttendance)
//! - `PATCH /attendance/verify` → `verify_attendance` (ReviewAttendance)

use crate::auth::guards::{require_review_attendance, require_scan_attendance};
use crate::state::AppState;
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, patch, post},
};
use get::list_attendance;
use patch::verify_attendance;
use post::scan_attendance;

pub mod common;
pub mod get;
pub mod patch;
pub mod post;

pub fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_attendance).route_layer(from_fn(require_review_attendance)))
        .route("/scan", post(scan_attendance).route_layer(from_fn(require_scan_attendance)))
        .route("/verify", patch(verify_attendance).route_layer(from_fn(require_review_attendance)))
}
