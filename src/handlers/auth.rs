use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use model::entities::user;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::auth::{
    authenticate, hash_password, login_url, require_csrf, safe_next, session_user, CurrentUser,
    LOGIN_PATH,
};
use crate::error::AppError;
use crate::helpers::forms::{field_errors, not_blank, CsrfParams, FieldErrors};
use crate::schemas::AppState;
use crate::session::Session;
use crate::templates::page_context;

pub const INVALID_LOGIN_MESSAGE: &str = "Invalid name or password.";
pub const NAME_TAKEN_MESSAGE: &str = "Username is already in use.";

/// Form for users to create a new account
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct RegistrationForm {
    #[serde(default)]
    #[validate(custom(function = "not_blank"), length(max = 60, message = "Name is too long."))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"), length(max = 256))]
    pub department: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"), length(max = 256))]
    pub position: String,
    #[serde(default, skip_serializing)]
    #[validate(
        custom(function = "not_blank"),
        must_match(other = "confirm_password", message = "Passwords must match.")
    )]
    pub password: String,
    #[serde(default, skip_serializing)]
    pub confirm_password: String,
    #[serde(default, skip_serializing)]
    pub csrf_token: String,
}

/// Form for users to log in
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[serde(default, skip_serializing)]
    #[validate(custom(function = "not_blank"))]
    pub password: String,
    #[serde(default, skip_serializing)]
    pub csrf_token: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

async fn render_register(
    state: &AppState,
    session: &Session,
    form: &RegistrationForm,
    errors: &FieldErrors,
) -> Result<Response, AppError> {
    let mut context = page_context(session, "Register", None).await;
    context.insert("csrf_token", &session.csrf_token().await);
    context.insert("form", form);
    context.insert("errors", errors);
    Ok(state.templates.render("auth/register.html", &context)?.into_response())
}

async fn render_login(
    state: &AppState,
    session: &Session,
    form: &LoginForm,
    errors: &FieldErrors,
    next: Option<&str>,
) -> Result<Response, AppError> {
    let user = session_user(state, session).await?;
    let mut context = page_context(session, "Login", user.as_ref()).await;
    context.insert("csrf_token", &session.csrf_token().await);
    context.insert("form", form);
    context.insert("errors", errors);
    context.insert("action", &login_url(next));
    Ok(state.templates.render("auth/login.html", &context)?.into_response())
}

#[instrument(skip_all)]
pub async fn show_register(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Response, AppError> {
    render_register(&state, &session, &RegistrationForm::default(), &FieldErrors::new()).await
}

/// Create an account. The password is stored only as a salted hash.
#[instrument(skip_all, fields(name = %form.name))]
pub async fn register(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Form(form): Form<RegistrationForm>,
) -> Result<Response, AppError> {
    require_csrf(&session, &form.csrf_token).await?;

    let mut errors = match form.validate() {
        Ok(()) => FieldErrors::new(),
        Err(validation) => field_errors(&validation),
    };

    let name = form.name.trim().to_string();
    if !name.is_empty() {
        let existing = user::Entity::find()
            .filter(user::Column::Name.eq(name.as_str()))
            .one(&state.db)
            .await?;
        if existing.is_some() {
            debug!("Registration rejected, name '{}' is taken", name);
            errors
                .entry("name".to_string())
                .or_default()
                .push(NAME_TAKEN_MESSAGE.to_string());
        }
    }

    if !errors.is_empty() {
        return render_register(&state, &session, &form, &errors).await;
    }

    let password_hash = hash_password(form.password.clone()).await?;
    let new_user = user::ActiveModel {
        name: Set(name),
        password_hash: Set(password_hash),
        department: Set(form.department.trim().to_string()),
        position: Set(form.position.trim().to_string()),
        active: Set(true),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!("User registered with ID: {}, name: {}", new_user.id, new_user.name);
    session
        .flash("You have successfully registered! You may now login.")
        .await;
    Ok(Redirect::to(LOGIN_PATH).into_response())
}

#[instrument(skip_all)]
pub async fn show_login(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<LoginQuery>,
) -> Result<Response, AppError> {
    render_login(
        &state,
        &session,
        &LoginForm::default(),
        &FieldErrors::new(),
        query.next.as_deref(),
    )
    .await
}

/// Authenticate and bind the session to the user. Unknown names and wrong
/// passwords are reported identically.
#[instrument(skip_all, fields(name = %form.name))]
pub async fn login(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<LoginQuery>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    require_csrf(&session, &form.csrf_token).await?;
    let next = query.next.as_deref();

    if let Err(validation) = form.validate() {
        return render_login(&state, &session, &form, &field_errors(&validation), next).await;
    }

    let authenticated = authenticate(&state.db, &form.name, &form.password).await?;

    match authenticated {
        Some(user) => {
            session.login(user.id).await;
            let target = safe_next(next);
            info!("User {} logged in, redirecting to {}", user.id, target);
            Ok(Redirect::to(target).into_response())
        }
        None => {
            warn!("Failed login attempt");
            session.flash(INVALID_LOGIN_MESSAGE).await;
            render_login(&state, &session, &form, &FieldErrors::new(), next).await
        }
    }
}

#[instrument(skip_all, fields(user_id = user.id))]
pub async fn logout(
    Extension(session): Extension<Session>,
    CurrentUser(user): CurrentUser,
    Form(params): Form<CsrfParams>,
) -> Result<Redirect, AppError> {
    require_csrf(&session, &params.csrf_token).await?;
    session.logout().await;
    info!("User {} logged out", user.id);
    session.flash("You have successfully been logged out.").await;
    Ok(Redirect::to(LOGIN_PATH))
}
