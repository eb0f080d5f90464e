use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

/// Soft-delete of the caller's own account. The record is retained;
/// only the active flag flips, after which identity resolution refuses
/// the account even for still-valid tokens.
pub async fn deactivate_account(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<ApiSuccess<DeactivateResponseData>, ApiError> {
    state
        .user_service
        .deactivate(&user.id)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        DeactivateResponseData {
            message: "Account deactivated".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeactivateResponseData {
    pub message: String,
}
