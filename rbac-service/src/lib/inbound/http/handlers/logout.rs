use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;

/// Stateless acknowledgment: tokens are not tracked server-side, so
/// there is nothing to invalidate. The previously issued tokens stay
/// valid until their expiry; this is a documented limitation of the
/// stateless token design, not a bug.
pub async fn logout(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<ApiSuccess<LogoutResponseData>, ApiError> {
    tracing::info!(user_id = %user.id, "Logout acknowledged");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LogoutResponseData {
            message: "Logged out".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub message: String,
}
