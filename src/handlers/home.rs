use axum::{extract::State, response::Html, Extension};
use model::entities::asset;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use tracing::{debug, instrument};

use crate::auth::{session_user, CurrentUser};
use crate::error::AppError;
use crate::schemas::AppState;
use crate::session::Session;
use crate::templates::page_context;

/// Public landing page.
#[instrument(skip_all)]
pub async fn homepage(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Html<String>, AppError> {
    let user = session_user(&state, &session).await?;
    let context = page_context(&session, "Home", user.as_ref()).await;
    state.templates.render("home/index.html", &context)
}

#[instrument(skip_all, fields(user_id = user.id))]
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    CurrentUser(user): CurrentUser,
) -> Result<Html<String>, AppError> {
    let asset_count = asset::Entity::find()
        .filter(asset::Column::ManagedBy.eq(user.id))
        .count(&state.db)
        .await?;
    debug!("User {} manages {} assets", user.id, asset_count);

    let mut context = page_context(&session, "Dashboard", Some(&user)).await;
    context.insert("asset_count", &asset_count);
    state.templates.render("home/dashboard.html", &context)
}

/// Diagnostic route that always fails with a server error.
pub async fn server_error() -> AppError {
    AppError::Internal("diagnostic error route".to_string())
}

/// Fallback for unmatched paths.
pub async fn not_found() -> AppError {
    AppError::NotFound
}
