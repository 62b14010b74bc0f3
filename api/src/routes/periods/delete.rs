use super::common::actor;
use crate::auth::AuthUser;
use crate::routes::common::service_error;
use crate::{response::ApiResponse, state::AppState};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use services::period_service::PeriodService;

/// DELETE /api/periods/{period_id}
///
/// The owner deletes the period together with its QR codes and attendance
/// records. An administrator deleting someone else's period is refused while
/// anything still references it.
///
/// ### Responses
/// - `200 OK`
/// - `403 Forbidden` if the caller neither owns nor administers the period
/// - `404 Not Found`
/// - `409 Conflict` if an administrator targets a referenced period
pub async fn delete_period(
    State(state): State<AppState>,
    Path(period_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
) -> (StatusCode, Json<ApiResponse<()>>) {
    match PeriodService::delete(state.db(), actor(&user), period_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Period deleted successfully")),
        ),
        Err(e) => service_error(e),
    }
}
