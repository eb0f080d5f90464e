use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::access::models::Permission;
use crate::access::models::PermissionId;
use crate::access::models::RoleId;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn list_permissions(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<ApiSuccess<Vec<PermissionData>>, ApiError> {
    state.auth_service.require_role(&user, "admin")?;

    let permissions = state
        .access_service
        .list_permissions()
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        permissions.iter().map(PermissionData::from).collect(),
    ))
}

pub async fn create_permission(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(body): Json<CreatePermissionRequest>,
) -> Result<ApiSuccess<PermissionData>, ApiError> {
    state.auth_service.require_role(&user, "admin")?;

    state
        .access_service
        .create_permission(body.resource, body.action)
        .await
        .map_err(ApiError::from)
        .map(|ref permission| ApiSuccess::new(StatusCode::CREATED, permission.into()))
}

/// Grant an existing permission to an existing role.
pub async fn grant_permission(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path((role_id, permission_id)): Path<(String, String)>,
) -> Result<ApiSuccess<GrantResponseData>, ApiError> {
    state.auth_service.require_role(&user, "admin")?;

    let role_id =
        RoleId::from_string(&role_id).map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;
    let permission_id = PermissionId::from_string(&permission_id)
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    state
        .access_service
        .grant_permission(&role_id, &permission_id)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        GrantResponseData {
            message: "Permission assigned".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePermissionRequest {
    resource: String,
    action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionData {
    pub id: String,
    pub resource: String,
    pub action: String,
}

impl From<&Permission> for PermissionData {
    fn from(permission: &Permission) -> Self {
        Self {
            id: permission.id.to_string(),
            resource: permission.resource.clone(),
            action: permission.action.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrantResponseData {
    pub message: String,
}
