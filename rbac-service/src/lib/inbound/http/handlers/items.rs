use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;
use crate::user::models::User;

/// Demo business object protected by the permission gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
}

impl Item {
    pub fn demo_inventory() -> Vec<Item> {
        vec![
            Item {
                id: 1,
                name: "Item A".to_string(),
            },
            Item {
                id: 2,
                name: "Item B".to_string(),
            },
            Item {
                id: 3,
                name: "Item C".to_string(),
            },
        ]
    }
}

/// Run the permission gate before the wrapped operation.
///
/// The denial names the (resource, action) pair for diagnosability but
/// does not reveal whether the pair exists at all or is merely
/// unassigned to the caller's role.
async fn ensure_permission(
    state: &AppState,
    user: &User,
    resource: &str,
    action: &str,
) -> Result<(), ApiError> {
    let allowed = state
        .auth_service
        .check_permission(user, resource, action)
        .await
        .map_err(ApiError::from)?;

    if !allowed {
        return Err(ApiError::Forbidden(format!(
            "Access denied to {}:{}",
            resource, action
        )));
    }

    Ok(())
}

pub async fn list_items(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<ApiSuccess<Vec<Item>>, ApiError> {
    ensure_permission(&state, &user, "items", "read").await?;

    let items = state.items.lock().await.clone();
    Ok(ApiSuccess::new(StatusCode::OK, items))
}

pub async fn create_item(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(body): Json<ItemRequest>,
) -> Result<ApiSuccess<Item>, ApiError> {
    ensure_permission(&state, &user, "items", "create").await?;

    let mut items = state.items.lock().await;
    let next_id = items.iter().map(|item| item.id).max().unwrap_or(0) + 1;
    let item = Item {
        id: next_id,
        name: body.name,
    };
    items.push(item.clone());

    Ok(ApiSuccess::new(StatusCode::CREATED, item))
}

pub async fn update_item(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(item_id): Path<u64>,
    Json(body): Json<ItemRequest>,
) -> Result<ApiSuccess<Item>, ApiError> {
    ensure_permission(&state, &user, "items", "update").await?;

    let mut items = state.items.lock().await;
    let item = items
        .iter_mut()
        .find(|item| item.id == item_id)
        .ok_or_else(|| ApiError::NotFound(format!("Item not found: {}", item_id)))?;
    item.name = body.name;

    Ok(ApiSuccess::new(StatusCode::OK, item.clone()))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(item_id): Path<u64>,
) -> Result<ApiSuccess<DeleteItemResponseData>, ApiError> {
    ensure_permission(&state, &user, "items", "delete").await?;

    let mut items = state.items.lock().await;
    let position = items
        .iter()
        .position(|item| item.id == item_id)
        .ok_or_else(|| ApiError::NotFound(format!("Item not found: {}", item_id)))?;
    items.remove(position);

    Ok(ApiSuccess::new(
        StatusCode::OK,
        DeleteItemResponseData {
            message: "Item deleted".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemRequest {
    name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteItemResponseData {
    pub message: String,
}
