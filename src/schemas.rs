use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::session::SessionStore;
use crate::templates::Templates;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Server-side login sessions and flash messages
    pub sessions: SessionStore,
    /// Compiled page templates
    pub templates: Templates,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// One row of the asset list page.
#[derive(Debug, Serialize)]
pub struct AssetRow {
    pub id: i32,
    pub comments: String,
    pub location: String,
    pub inventory: String,
    pub assigned_at: String,
}

/// An entry in a `<select>` control. The id is kept as the string the form
/// submits back.
#[derive(Debug, Serialize)]
pub struct SelectOption {
    pub id: String,
    pub label: String,
}
