use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use axum::{
    Json,
    body::Body,
    extract::FromRequestParts,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use db::models::user::Role;

/// Something a caller is allowed to do. Roles map to capabilities here and
/// nowhere else; handlers and guards only ever ask about capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ScanAttendance,
    IssueScanTokens,
    ReviewAttendance,
    ManagePeriods,
    /// Edit or delete periods owned by someone else.
    AdministerPeriods,
}

pub fn capabilities_for(role: Role) -> &'static [Capability] {
    use Capability::*;
    match role {
        Role::Student => &[ScanAttendance],
        Role::Teacher | Role::Secretary => &[IssueScanTokens, ReviewAttendance, ManagePeriods],
        Role::SuperAdmin => &[IssueScanTokens, ReviewAttendance, ManagePeriods, AdministerPeriods],
    }
}

impl AuthUser {
    pub fn can(&self, capability: Capability) -> bool {
        capabilities_for(self.0.role).contains(&capability)
    }
}

#[derive(serde::Serialize, Default)]
pub struct Empty;

type GuardResult = Result<Response, (StatusCode, Json<ApiResponse<Empty>>)>;

/// Helper to extract, validate user from request extensions and insert the back into the request
async fn extract_and_insert_authuser(
    req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), (StatusCode, Json<ApiResponse<Empty>>)> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authentication required")),
            )
        })?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

async fn require_capability(
    req: Request<Body>,
    next: Next,
    capability: Capability,
    failure_msg: &str,
) -> GuardResult {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if !user.can(capability) {
        tracing::debug!(user = user.0.sub, role = %user.0.role, ?capability, "Capability check failed");
        return Err((StatusCode::FORBIDDEN, Json(ApiResponse::error(failure_msg))));
    }

    Ok(next.run(req).await)
}

/// Basic guard to ensure the request is authenticated.
pub async fn allow_authenticated(req: Request<Body>, next: Next) -> GuardResult {
    let (req, _user) = extract_and_insert_authuser(req).await?;

    Ok(next.run(req).await)
}

pub async fn require_scan_attendance(req: Request<Body>, next: Next) -> GuardResult {
    require_capability(req, next, Capability::ScanAttendance, "Only students can scan attendance").await
}

pub async fn require_issue_scan_tokens(req: Request<Body>, next: Next) -> GuardResult {
    require_capability(req, next, Capability::IssueScanTokens, "Not allowed to issue QR codes").await
}

pub async fn require_review_attendance(req: Request<Body>, next: Next) -> GuardResult {
    require_capability(req, next, Capability::ReviewAttendance, "Not allowed to review attendance").await
}

pub async fn require_manage_periods(req: Request<Body>, next: Next) -> GuardResult {
    require_capability(req, next, Capability::ManagePeriods, "Not allowed to manage periods").await
}
