//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → health check (public)
//! - `/periods` → period listing and management (authenticated)
//! - `/qr` → QR code issue and lookup (staff)
//! - `/attendance` → scanning (students) and manual review (staff)

use crate::auth::guards::allow_authenticated;
use crate::routes::{
    attendance::attendance_routes, health::health_routes, periods::periods_routes, qr::qr_routes,
};
use crate::state::AppState;
use axum::{Router, middleware::from_fn};

pub mod attendance;
pub mod common;
pub mod health;
pub mod periods;
pub mod qr;

/// Builds the router for everything under `/api`, with state applied.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/periods", periods_routes().route_layer(from_fn(allow_authenticated)))
        .nest("/qr", qr_routes())
        .nest("/attendance", attendance_routes())
        .with_state(app_state)
}
