//! Server-side sessions.
//!
//! The browser only holds an opaque random id in the `asset_tracker_session`
//! cookie. The logged-in user id, pending flash messages and the CSRF token
//! live in an in-process `moka` cache keyed by that id; entries expire after
//! the configured idle time.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use cookie::{Cookie, SameSite};
use moka::future::Cache;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use subtle::ConstantTimeEq;
use tracing::{debug, trace, warn};
use uuid::Uuid;

use crate::schemas::AppState;

pub const SESSION_COOKIE: &str = "asset_tracker_session";

const MAX_SESSIONS: u64 = 10_000;

/// What the server remembers about one browser.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionData {
    pub user_id: Option<i32>,
    pub flashes: Vec<String>,
    pub csrf_token: Option<String>,
}

/// Shared storage for all sessions.
#[derive(Clone, Debug)]
pub struct SessionStore {
    cache: Cache<String, SessionData>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(MAX_SESSIONS)
            .time_to_idle(ttl)
            .build();
        Self { cache }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.cache.contains_key(id)
    }

    pub async fn load(&self, id: &str) -> SessionData {
        self.cache.get(id).await.unwrap_or_default()
    }

    pub async fn save(&self, id: &str, data: SessionData) {
        self.cache.insert(id.to_string(), data).await;
    }

    pub async fn remove(&self, id: &str) {
        self.cache.invalidate(id).await;
    }
}

/// Handle to the current request's session, inserted into request
/// extensions by [`session_layer`].
///
/// Anonymous requests start without an id. Nothing is stored until the
/// first write (a flash, a login or a CSRF token).
#[derive(Clone, Debug)]
pub struct Session {
    id: Arc<Mutex<Option<String>>>,
    store: SessionStore,
}

impl Session {
    pub fn new(id: Option<String>, store: SessionStore) -> Self {
        Self {
            id: Arc::new(Mutex::new(id)),
            store,
        }
    }

    pub fn id(&self) -> Option<String> {
        match self.id.lock() {
            Ok(id) => id.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    async fn data(&self) -> SessionData {
        match self.id() {
            Some(id) => self.store.load(&id).await,
            None => SessionData::default(),
        }
    }

    /// Store `data`, allocating an id on the first write.
    async fn write(&self, data: SessionData) {
        let id = match self.id() {
            Some(id) => id,
            None => {
                let id = new_session_id();
                trace!("Starting a new session");
                self.set_id(id.clone());
                id
            }
        };
        self.store.save(&id, data).await;
    }

    pub async fn user_id(&self) -> Option<i32> {
        self.data().await.user_id
    }

    /// Bind the session to a user. The id is rotated so a session id handed
    /// out before login cannot be reused afterwards.
    pub async fn login(&self, user_id: i32) {
        let mut data = self.data().await;
        data.user_id = Some(user_id);

        if let Some(old_id) = self.id() {
            self.store.remove(&old_id).await;
        }
        let new_id = new_session_id();
        self.store.save(&new_id, data).await;
        self.set_id(new_id);
        debug!(user_id, "Session bound to user");
    }

    pub async fn logout(&self) {
        if self.id().is_none() {
            return;
        }
        let mut data = self.data().await;
        data.user_id = None;
        self.write(data).await;
    }

    pub async fn flash(&self, message: impl Into<String>) {
        let mut data = self.data().await;
        data.flashes.push(message.into());
        self.write(data).await;
    }

    /// Return and clear the pending flash messages.
    pub async fn take_flashes(&self) -> Vec<String> {
        let mut data = self.data().await;
        let flashes = std::mem::take(&mut data.flashes);
        if !flashes.is_empty() {
            self.write(data).await;
        }
        flashes
    }

    /// The token forms must echo back, created on first use.
    pub async fn csrf_token(&self) -> String {
        let mut data = self.data().await;
        if let Some(token) = &data.csrf_token {
            return token.clone();
        }
        let token = Uuid::new_v4().simple().to_string();
        data.csrf_token = Some(token.clone());
        self.write(data).await;
        token
    }

    /// Compare a submitted token with the session's in constant time.
    pub async fn verify_csrf(&self, submitted: &str) -> bool {
        match self.data().await.csrf_token {
            Some(expected) => expected.as_bytes().ct_eq(submitted.as_bytes()).into(),
            None => false,
        }
    }

    fn set_id(&self, new_id: String) {
        match self.id.lock() {
            Ok(mut id) => *id = Some(new_id),
            Err(poisoned) => *poisoned.into_inner() = Some(new_id),
        }
    }
}

fn new_session_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

fn session_cookie(id: &str) -> String {
    Cookie::build((SESSION_COOKIE, id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
        .to_string()
}

/// Attach a [`Session`] to every request and emit the cookie once the
/// session has been stored or its id rotated.
pub async fn session_layer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let id = match session_id_from_headers(request.headers()) {
        Some(id) if state.sessions.contains(&id) => Some(id),
        Some(_) => {
            trace!("Ignoring unknown or expired session id");
            None
        }
        None => None,
    };

    let session = Session::new(id.clone(), state.sessions.clone());
    request.extensions_mut().insert(session.clone());

    let mut response = next.run(request).await;

    if let Some(current_id) = session.id().filter(|current| Some(current) != id.as_ref()) {
        match HeaderValue::from_str(&session_cookie(&current_id)) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => warn!("Failed to encode session cookie: {}", e),
        }
    }

    response
}
