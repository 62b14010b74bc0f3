use super::common::QrCodeResponse;
use crate::routes::common::service_error;
use crate::{response::ApiResponse, state::AppState};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use services::scan_token_service::ScanTokenService;

/// GET /api/qr/{code}
///
/// Looks a code up so staff can display it again. Expired codes are still
/// returned, flagged with `"expired": true`.
pub async fn get_qr_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> (StatusCode, Json<ApiResponse<QrCodeResponse>>) {
    match ScanTokenService::resolve(state.db(), &code).await {
        Ok(token) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                QrCodeResponse::new(token, Utc::now()),
                "QR code retrieved successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}
