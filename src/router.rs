use crate::handlers::{
    assets::{add_asset, delete_asset, edit_asset, list_assets, show_add_asset, show_edit_asset},
    auth::{login, logout, register, show_login, show_register},
    health::health_check,
    home::{dashboard, homepage, not_found, server_error},
};
use crate::schemas::AppState;
use crate::session::session_layer;
use crate::templates::render_error_pages;
use axum::{middleware, routing::get, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(show_register).post(register))
        .route("/login", get(show_login).post(login))
        .route("/logout", get(logout).post(logout))
}

fn asset_routes() -> Router<AppState> {
    Router::new()
        .route("/assets", get(list_assets))
        .route("/assets/add", get(show_add_asset).post(add_asset))
        .route("/assets/edit/:asset_id", get(show_edit_asset).post(edit_asset))
        .route("/assets/delete/:asset_id", get(delete_asset).post(delete_asset))
}

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    create_router_with(state, Router::new())
}

/// Same as [`create_router`], with `extra` routes mounted behind the same
/// session and error-page middleware.
pub fn create_router_with(state: AppState, extra: Router<AppState>) -> Router {
    Router::new()
        .route("/", get(homepage))
        .route("/dashboard", get(dashboard))
        .route("/health", get(health_check))
        .route("/500", get(server_error))
        .nest("/auth", auth_routes())
        .nest("/assets", asset_routes())
        .merge(extra)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(middleware::from_fn_with_state(state.clone(), session_layer))
                .layer(middleware::from_fn_with_state(state.clone(), render_error_pages)),
        )
        .with_state(state)
}
