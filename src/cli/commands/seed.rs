use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Args;
use model::entities::{inventory, location, ticket_type, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use tracing::{debug, info, trace};

use crate::auth::hash_password;

#[derive(Args, Debug, Clone)]
pub struct SeedOptions {
    /// Database URL
    #[arg(short, long, env = "DATABASE_URL", default_value = "sqlite://asset_tracker.db?mode=rwc")]
    pub database_url: String,

    /// Login name of the user to create
    #[arg(long)]
    pub name: String,

    /// Password of the user to create
    #[arg(long, env = "SEED_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[arg(long, default_value = "IT")]
    pub department: String,

    #[arg(long, default_value = "Administrator")]
    pub position: String,

    /// Description of the default location
    #[arg(long, default_value = "Main Office")]
    pub location: String,
}

pub async fn seed(options: &SeedOptions) -> Result<()> {
    trace!("Entering seed function");
    info!("Seeding database");
    debug!("Database URL: {}", options.database_url);

    let db = Database::connect(&options.database_url)
        .await
        .context("Failed to connect to database")?;

    let owner = seed_records(&db, options).await?;
    info!(user_id = owner.id, "Seed data created for user '{}'", owner.name);

    Ok(())
}

/// Insert the user and the reference rows in one transaction.
pub async fn seed_records(db: &DatabaseConnection, options: &SeedOptions) -> Result<user::Model> {
    let exists = user::Entity::find()
        .filter(user::Column::Name.eq(options.name.as_str()))
        .one(db)
        .await?
        .is_some();
    if exists {
        bail!("User '{}' already exists", options.name);
    }

    let password_hash = hash_password(options.password.clone())
        .await
        .context("Failed to hash seed password")?;
    let now = Utc::now().naive_utc();

    let txn = db.begin().await?;

    let owner = user::ActiveModel {
        name: Set(options.name.clone()),
        password_hash: Set(password_hash),
        department: Set(options.department.clone()),
        position: Set(options.position.clone()),
        active: Set(true),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    debug!("Created user {}", owner.id);

    let place = location::ActiveModel {
        description: Set(Some(options.location.clone())),
        active: Set(true),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    debug!("Created location {}", place.id);

    let stock = inventory::ActiveModel {
        inventory_type: Set(Some("General equipment".to_string())),
        count: Set(Some(0)),
        date_purchased: Set(now),
        purchased_by: Set(owner.id),
        location: Set(place.id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    debug!("Created inventory {}", stock.id);

    let kind = ticket_type::ActiveModel {
        description: Set(Some("General".to_string())),
        active: Set(true),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    debug!("Created ticket type {}", kind.id);

    txn.commit().await?;
    Ok(owner)
}
