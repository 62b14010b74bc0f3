//! # QR Routes Module
//!
//! Issuing and re-reading scan tokens under `/api/qr`. Both routes require
//! the `IssueScanTokens` capability.

use crate::auth::guards::require_issue_scan_tokens;
use crate::state::AppState;
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use get::get_qr_code;
use post::generate_qr_code;

pub mod common;
pub mod get;
pub mod post;

pub fn qr_routes() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate_qr_code))
        .route("/{code}", get(get_qr_code))
        .route_layer(from_fn(require_issue_scan_tokens))
}
