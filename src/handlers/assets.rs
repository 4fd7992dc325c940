use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use chrono::Utc;
use model::entities::{asset, inventory, location, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, error, info, instrument, trace, warn};
use validator::Validate;

use crate::error::AppError;
use crate::auth::{require_csrf, CurrentUser};
use crate::helpers::forms::{
    field_errors, not_blank, optional_id, parse_optional_id, CsrfParams, FieldErrors,
};
use crate::schemas::{AppState, AssetRow, SelectOption};
use crate::session::Session;
use crate::templates::page_context;

pub const ASSET_LIST_PATH: &str = "/assets/assets";

/// Form for a user to add or edit an asset
///
/// Inventory and location are only offered when adding. Leaving either
/// unselected falls back to the first record in the store.
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct AssetForm {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub comments: String,
    #[serde(default)]
    #[validate(custom(function = "optional_id"))]
    pub inventory_id: String,
    #[serde(default)]
    #[validate(custom(function = "optional_id"))]
    pub location_id: String,
    #[serde(default, skip_serializing)]
    pub csrf_token: String,
}

impl AssetForm {
    fn selected_inventory(&self) -> Option<i32> {
        parse_optional_id(&self.inventory_id).ok().flatten()
    }

    fn selected_location(&self) -> Option<i32> {
        parse_optional_id(&self.location_id).ok().flatten()
    }
}

enum FormMode {
    Add,
    Edit(i32),
}

fn location_label(place: &location::Model) -> String {
    place
        .description
        .clone()
        .unwrap_or_else(|| format!("Location #{}", place.id))
}

fn inventory_label(stock: &inventory::Model) -> String {
    let parts: Vec<&str> = [
        stock.inventory_type.as_deref(),
        stock.manufacturer.as_deref(),
        stock.model_name.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect();

    if parts.is_empty() {
        format!("Inventory #{}", stock.id)
    } else {
        parts.join(" ")
    }
}

async fn find_asset(db: &DatabaseConnection, asset_id: i32) -> Result<asset::Model, AppError> {
    match asset::Entity::find_by_id(asset_id).one(db).await? {
        Some(asset) => Ok(asset),
        None => {
            warn!("Asset with ID {} not found", asset_id);
            Err(AppError::NotFound)
        }
    }
}

async fn render_asset_form(
    state: &AppState,
    session: &Session,
    user: &user::Model,
    form: &AssetForm,
    errors: &FieldErrors,
    mode: FormMode,
) -> Result<Response, AppError> {
    let (action, title) = match mode {
        FormMode::Add => ("Add", "Add Asset"),
        FormMode::Edit(_) => ("Edit", "Edit Asset"),
    };
    let mut context = page_context(session, title, Some(user)).await;
    context.insert("action", action);
    context.insert("form", form);
    context.insert("errors", errors);

    match mode {
        FormMode::Add => {
            let inventories: Vec<SelectOption> = inventory::Entity::find()
                .order_by_asc(inventory::Column::Id)
                .all(&state.db)
                .await?
                .iter()
                .map(|stock| SelectOption {
                    id: stock.id.to_string(),
                    label: inventory_label(stock),
                })
                .collect();
            let locations: Vec<SelectOption> = location::Entity::find()
                .order_by_asc(location::Column::Id)
                .all(&state.db)
                .await?
                .iter()
                .map(|place| SelectOption {
                    id: place.id.to_string(),
                    label: location_label(place),
                })
                .collect();

            context.insert("add_asset", &true);
            context.insert("form_action", "/assets/assets/add");
            context.insert("inventories", &inventories);
            context.insert("locations", &locations);
        }
        FormMode::Edit(asset_id) => {
            context.insert("add_asset", &false);
            context.insert("form_action", &format!("/assets/assets/edit/{}", asset_id));
        }
    }

    Ok(state.templates.render("assets/asset.html", &context)?.into_response())
}

/// Insert a new asset managed, assigned and certified by `owner`.
async fn create_asset(
    db: &DatabaseConnection,
    owner: &user::Model,
    form: &AssetForm,
) -> Result<asset::Model, DbErr> {
    let inventory_id = match form.selected_inventory() {
        Some(id) => id,
        None => inventory::Entity::find()
            .order_by_asc(inventory::Column::Id)
            .one(db)
            .await?
            .map(|stock| stock.id)
            .ok_or_else(|| DbErr::RecordNotFound("no inventory available".to_string()))?,
    };
    let location_id = match form.selected_location() {
        Some(id) => id,
        None => location::Entity::find()
            .order_by_asc(location::Column::Id)
            .one(db)
            .await?
            .map(|place| place.id)
            .ok_or_else(|| DbErr::RecordNotFound("no location available".to_string()))?,
    };
    trace!(inventory_id, location_id, "Resolved asset references");

    asset::ActiveModel {
        inventory_id: Set(inventory_id),
        location: Set(location_id),
        managed_by: Set(owner.id),
        assigned_to: Set(Some(owner.id)),
        assigned_at: Set(Utc::now().naive_utc()),
        certified_by: Set(Some(owner.id)),
        comments: Set(Some(form.comments.trim().to_string())),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// List the assets managed by the current user
#[instrument(skip_all, fields(user_id = user.id))]
pub async fn list_assets(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    CurrentUser(user): CurrentUser,
) -> Result<Html<String>, AppError> {
    let assets = asset::Entity::find()
        .filter(asset::Column::ManagedBy.eq(user.id))
        .order_by_asc(asset::Column::Id)
        .all(&state.db)
        .await?;
    debug!("Retrieved {} assets for user {}", assets.len(), user.id);

    let locations: HashMap<i32, String> = location::Entity::find()
        .filter(location::Column::Id.is_in(assets.iter().map(|a| a.location)))
        .all(&state.db)
        .await?
        .iter()
        .map(|place| (place.id, location_label(place)))
        .collect();
    let inventories: HashMap<i32, String> = inventory::Entity::find()
        .filter(inventory::Column::Id.is_in(assets.iter().map(|a| a.inventory_id)))
        .all(&state.db)
        .await?
        .iter()
        .map(|stock| (stock.id, inventory_label(stock)))
        .collect();

    let rows: Vec<AssetRow> = assets
        .into_iter()
        .map(|asset| AssetRow {
            id: asset.id,
            location: locations.get(&asset.location).cloned().unwrap_or_default(),
            inventory: inventories
                .get(&asset.inventory_id)
                .cloned()
                .unwrap_or_default(),
            assigned_at: asset.assigned_at.format("%Y-%m-%d %H:%M").to_string(),
            comments: asset.comments.unwrap_or_default(),
        })
        .collect();

    let mut context = page_context(&session, "Assets", Some(&user)).await;
    context.insert("assets", &rows);
    state.templates.render("assets/assets.html", &context)
}

#[instrument(skip_all, fields(user_id = user.id))]
pub async fn show_add_asset(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, AppError> {
    render_asset_form(
        &state,
        &session,
        &user,
        &AssetForm::default(),
        &FieldErrors::new(),
        FormMode::Add,
    )
    .await
}

/// Add an asset to the database
///
/// Persistence failures are reported as a flash message; the response is a
/// redirect to the list either way.
#[instrument(skip_all, fields(user_id = user.id))]
pub async fn add_asset(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<AssetForm>,
) -> Result<Response, AppError> {
    require_csrf(&session, &form.csrf_token).await?;

    if let Err(validation) = form.validate() {
        debug!("Asset form rejected: {}", validation);
        return render_asset_form(
            &state,
            &session,
            &user,
            &form,
            &field_errors(&validation),
            FormMode::Add,
        )
        .await;
    }

    match create_asset(&state.db, &user, &form).await {
        Ok(asset) => {
            info!("Asset created with ID: {}", asset.id);
            session.flash("You have successfully added a new Asset.").await;
        }
        Err(db_error) => {
            error!("Failed to create asset: {}", db_error);
            session.flash("Error: Asset cannot be created.").await;
        }
    }

    Ok(Redirect::to(ASSET_LIST_PATH).into_response())
}

#[instrument(skip_all, fields(user_id = user.id, asset_id = asset_id))]
pub async fn show_edit_asset(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    CurrentUser(user): CurrentUser,
    Path(asset_id): Path<i32>,
) -> Result<Response, AppError> {
    let asset = find_asset(&state.db, asset_id).await?;
    let form = AssetForm {
        comments: asset.comments.unwrap_or_default(),
        inventory_id: asset.inventory_id.to_string(),
        location_id: asset.location.to_string(),
        csrf_token: String::new(),
    };

    render_asset_form(
        &state,
        &session,
        &user,
        &form,
        &FieldErrors::new(),
        FormMode::Edit(asset_id),
    )
    .await
}

/// Update the comments of an asset. Other columns are left untouched.
#[instrument(skip_all, fields(user_id = user.id, asset_id = asset_id))]
pub async fn edit_asset(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    CurrentUser(user): CurrentUser,
    Path(asset_id): Path<i32>,
    Form(form): Form<AssetForm>,
) -> Result<Response, AppError> {
    require_csrf(&session, &form.csrf_token).await?;
    let asset = find_asset(&state.db, asset_id).await?;

    // Only comments are editable; stray selections are ignored.
    let errors: FieldErrors = match form.validate() {
        Ok(()) => FieldErrors::new(),
        Err(validation) => field_errors(&validation),
    }
    .into_iter()
    .filter(|(field, _)| field == "comments")
    .collect();
    if !errors.is_empty() {
        return render_asset_form(&state, &session, &user, &form, &errors, FormMode::Edit(asset_id))
            .await;
    }

    let mut active: asset::ActiveModel = asset.into();
    active.comments = Set(Some(form.comments.trim().to_string()));
    let updated = active.update(&state.db).await?;

    info!("Asset with ID {} updated by user {}", updated.id, user.id);
    session.flash("You have successfully edited the asset.").await;
    Ok(Redirect::to(ASSET_LIST_PATH).into_response())
}

/// Delete an asset. Any logged-in user may delete any asset.
///
/// The CSRF token comes from the query string on GET and from the body on POST.
#[instrument(skip_all, fields(user_id = user.id, asset_id = asset_id))]
pub async fn delete_asset(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    CurrentUser(user): CurrentUser,
    Path(asset_id): Path<i32>,
    Form(params): Form<CsrfParams>,
) -> Result<Response, AppError> {
    require_csrf(&session, &params.csrf_token).await?;
    let asset = find_asset(&state.db, asset_id).await?;

    let result = asset.delete(&state.db).await?;
    debug!("Delete operation completed. Rows affected: {}", result.rows_affected);

    info!("Asset with ID {} deleted by user {}", asset_id, user.id);
    session.flash("You have successfully deleted the asset.").await;
    Ok(Redirect::to(ASSET_LIST_PATH).into_response())
}
