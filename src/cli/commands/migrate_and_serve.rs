use anyhow::{Context, Result};
use sea_orm::Database;
use tracing::{debug, info, trace};

use super::initdb::run_migrations;
use super::serve::{serve, ServeOptions};

pub async fn migrate_and_serve(options: &ServeOptions) -> Result<()> {
    trace!("Entering migrate_and_serve function");
    info!("Applying database migrations and starting server");
    debug!("Database URL: {}", options.database_url);

    let db = Database::connect(&options.database_url)
        .await
        .with_context(|| format!("Failed to connect to database '{}'", options.database_url))?;
    run_migrations(&db).await?;
    db.close().await.context("Failed to close migration connection")?;

    serve(options).await
}
