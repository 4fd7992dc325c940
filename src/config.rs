use anyhow::{Context, Result};
use sea_orm::Database;
use std::time::Duration;

use crate::schemas::AppState;
use crate::session::SessionStore;
use crate::templates::Templates;

/// Connect to the database and build the shared application state.
pub async fn initialize_app_state_with_url(
    database_url: &str,
    session_ttl: Duration,
) -> Result<AppState> {
    tracing::info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url)
        .await
        .with_context(|| format!("Failed to connect to database '{}'", database_url))?;

    let templates = Templates::new().context("Failed to load templates")?;
    let sessions = SessionStore::new(session_ttl);
    tracing::debug!(ttl_secs = session_ttl.as_secs(), "Session store initialized");

    Ok(AppState {
        db,
        sessions,
        templates,
    })
}
