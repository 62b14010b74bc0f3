//! # Periods Routes Module
//!
//! Routes for `/api/periods`. Every route requires authentication; writes
//! additionally require `ManagePeriods`, and ownership is checked by the
//! period service.

use crate::auth::guards::require_manage_periods;
use crate::state::AppState;
use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post, put},
};
use delete::delete_period;
use get::{get_period, list_periods};
use post::create_period;
use put::update_period;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

/// - `GET /periods` → `list_periods`
/// - `POST /periods` → `create_period` (ManagePeriods)
/// - `GET /periods/{period_id}` → `get_period`
/// - `PUT /periods/{period_id}` → `update_period` (ManagePeriods, owner or AdministerPeriods)
/// - `DELETE /periods/{period_id}` → `delete_period` (ManagePeriods, owner or AdministerPeriods)
pub fn periods_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_periods))
        .route("/", post(create_period).route_layer(from_fn(require_manage_periods)))
        .route("/{period_id}", get(get_period))
        .route("/{period_id}", put(update_period).route_layer(from_fn(require_manage_periods)))
        .route("/{period_id}", delete(delete_period).route_layer(from_fn(require_manage_periods)))
}
