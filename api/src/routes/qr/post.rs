use super::common::{GenerateQrRequest, QrCodeResponse};
use crate::auth::AuthUser;
use crate::routes::common::{PeriodResponse, format_validation_errors, service_error};
use crate::{response::ApiResponse, state::AppState};
use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::Utc;
use services::scan_token_service::{IssueScanToken, ScanTokenService};
use validator::Validate;

/// POST /api/qr/generate
///
/// Issues a fresh QR code for a period. Rendering the image is left to the client.
///
/// ### Request Body
/// ```json
/// { "period_id": 1, "date": "2025-10-06", "expires_in_minutes": 60 }
/// ```
/// `date` and `expires_in_minutes` are optional.
///
/// ### Responses
/// - `201 Created` with the code, its expiry and the period
/// - `400 Bad Request` for an out-of-range expiry
/// - `404 Not Found` if the period does not exist
pub async fn generate_qr_code(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<GenerateQrRequest>,
) -> (StatusCode, Json<ApiResponse<QrCodeResponse>>) {
    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(&e))),
        );
    }

    let now = Utc::now();
    let params = IssueScanToken {
        period_id: req.period_id,
        issued_by: Some(claims.sub),
        date: req.date,
        ttl_minutes: req.expires_in_minutes,
    };

    match ScanTokenService::issue(state.db(), state.clock(), params, now).await {
        Ok((token, period)) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                QrCodeResponse::new(token, now).with_period(PeriodResponse::from(period)),
                "QR code generated successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}
