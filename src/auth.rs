//! Password hashing, the login route guard and post-login redirects.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    async_trait,
    extract::{FromRequestParts, OriginalUri},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use model::entities::user;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::schemas::AppState;
use crate::session::Session;

pub const LOGIN_PATH: &str = "/auth/login";
pub const DEFAULT_LANDING_PATH: &str = "/dashboard";
pub const LOGIN_REQUIRED_MESSAGE: &str = "You must be logged in to access this page.";

/// Hash checked when the name is unknown, so both failure paths pay for an
/// Argon2 verification.
static DUMMY_HASH: OnceCell<String> = OnceCell::const_new();

async fn dummy_hash() -> Result<&'static String, AppError> {
    DUMMY_HASH
        .get_or_try_init(|| hash_password("asset-tracker-dummy-password".to_string()))
        .await
}

/// Hash a password with Argon2id and a random salt.
pub async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::PasswordHash(e.to_string()))
    })
    .await
    .map_err(|e| AppError::Internal(format!("password hashing task failed: {}", e)))?
}

/// Check a password against a stored hash. Malformed hashes never verify.
pub async fn verify_password(password: String, stored_hash: String) -> bool {
    tokio::task::spawn_blocking(move || match PasswordHash::new(&stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!("Stored password hash could not be parsed: {}", e);
            false
        }
    })
    .await
    .unwrap_or(false)
}

/// Find the user called `name` and check `password` against their hash.
/// Unknown names still run a verification against a dummy hash.
pub async fn authenticate(
    db: &DatabaseConnection,
    name: &str,
    password: &str,
) -> Result<Option<user::Model>, AppError> {
    let candidate = user::Entity::find()
        .filter(user::Column::Name.eq(name.trim()))
        .one(db)
        .await?;

    match candidate {
        Some(user) => {
            if verify_password(password.to_string(), user.password_hash.clone()).await {
                Ok(Some(user))
            } else {
                Ok(None)
            }
        }
        None => {
            let hash = dummy_hash().await?;
            verify_password(password.to_string(), hash.clone()).await;
            Ok(None)
        }
    }
}

/// Reject a state-changing request whose form does not echo the session's
/// CSRF token.
pub async fn require_csrf(session: &Session, submitted: &str) -> Result<(), AppError> {
    if session.verify_csrf(submitted).await {
        Ok(())
    } else {
        warn!("CSRF token missing or incorrect");
        Err(AppError::Forbidden)
    }
}

/// Only local absolute paths are honoured as `next` targets.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => DEFAULT_LANDING_PATH,
    }
}

/// The login URL, carrying `next` when given.
pub fn login_url(next: Option<&str>) -> String {
    match next {
        Some(next) => match serde_urlencoded::to_string([("next", next)]) {
            Ok(query) => format!("{}?{}", LOGIN_PATH, query),
            Err(_) => LOGIN_PATH.to_string(),
        },
        None => LOGIN_PATH.to_string(),
    }
}

/// Look up the user bound to the session, dropping the binding when the
/// user no longer exists.
pub async fn session_user(
    state: &AppState,
    session: &Session,
) -> Result<Option<user::Model>, AppError> {
    let Some(user_id) = session.user_id().await else {
        return Ok(None);
    };

    match user::Entity::find_by_id(user_id).one(&state.db).await? {
        Some(user) => Ok(Some(user)),
        None => {
            warn!(user_id, "Session refers to a missing user, logging out");
            session.logout().await;
            Ok(None)
        }
    }
}

/// The logged-in user. Extracting it guards a route: anonymous requests are
/// redirected to the login page with the requested path in `next`.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub user::Model);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer is not installed".into()).into_response())?;

        if let Some(user) = session_user(state, &session)
            .await
            .map_err(IntoResponse::into_response)?
        {
            return Ok(CurrentUser(user));
        }

        // Nested routers see a stripped path; redirect back to the full one.
        let uri = parts
            .extensions
            .get::<OriginalUri>()
            .map(|original| original.0.clone())
            .unwrap_or_else(|| parts.uri.clone());
        let requested = uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| uri.path().to_string());

        debug!("Anonymous request to {}, redirecting to login", requested);
        session.flash(LOGIN_REQUIRED_MESSAGE).await;
        Err(Redirect::to(&login_url(Some(&requested))).into_response())
    }
}
