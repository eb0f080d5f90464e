use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::deactivate::deactivate_account;
use super::handlers::items::create_item;
use super::handlers::items::delete_item;
use super::handlers::items::list_items;
use super::handlers::items::update_item;
use super::handlers::items::Item;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::permissions::create_permission;
use super::handlers::permissions::grant_permission;
use super::handlers::permissions::list_permissions;
use super::handlers::refresh::refresh_token;
use super::handlers::register::register;
use super::handlers::roles::create_role;
use super::handlers::roles::list_roles;
use super::handlers::update_profile::update_profile;
use super::middleware::authenticate as auth_middleware;
use crate::access::ports::AccessServicePort;
use crate::domain::auth::ports::AuthServicePort;
use crate::user::ports::UserServicePort;

/// Shared application state.
///
/// Services are held as trait objects so tests can wire in doubles
/// without a database. The item list is demo transport-layer state for
/// the permission-gated resource, not part of the auth core.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub access_service: Arc<dyn AccessServicePort>,
    pub auth_service: Arc<dyn AuthServicePort>,
    pub items: Arc<Mutex<Vec<Item>>>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    access_service: Arc<dyn AccessServicePort>,
    auth_service: Arc<dyn AuthServicePort>,
) -> Router {
    let state = AppState {
        user_service,
        access_service,
        auth_service,
        items: Arc::new(Mutex::new(Item::demo_inventory())),
    };

    let public_routes = Router::new()
        .route("/api/users", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh_token));

    let protected_routes = Router::new()
        .route("/api/auth/logout", post(logout))
        .route("/api/users/me", patch(update_profile))
        .route("/api/users/me", delete(deactivate_account))
        .route("/api/admin/roles", get(list_roles))
        .route("/api/admin/roles", post(create_role))
        .route("/api/admin/permissions", get(list_permissions))
        .route("/api/admin/permissions", post(create_permission))
        .route(
            "/api/admin/roles/:role_id/permissions/:permission_id",
            post(grant_permission),
        )
        .route("/api/items", get(list_items))
        .route("/api/items", post(create_item))
        .route("/api/items/:item_id", put(update_item))
        .route("/api/items/:item_id", delete(delete_item))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
