use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Response},
};
use model::entities::user;
use std::sync::Arc;
use tera::{Context, Tera};
use tracing::error;

use crate::error::{AppError, ErrorPage};
use crate::schemas::AppState;
use crate::session::Session;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("home/index.html", include_str!("../templates/home/index.html")),
    ("home/dashboard.html", include_str!("../templates/home/dashboard.html")),
    ("auth/login.html", include_str!("../templates/auth/login.html")),
    ("auth/register.html", include_str!("../templates/auth/register.html")),
    ("assets/assets.html", include_str!("../templates/assets/assets.html")),
    ("assets/asset.html", include_str!("../templates/assets/asset.html")),
    ("errors/403.html", include_str!("../templates/errors/403.html")),
    ("errors/404.html", include_str!("../templates/errors/404.html")),
    ("errors/500.html", include_str!("../templates/errors/500.html")),
];

/// The compiled page templates, embedded in the binary.
#[derive(Clone, Debug)]
pub struct Templates {
    tera: Arc<Tera>,
}

impl Templates {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())?;
        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    pub fn render(&self, name: &str, context: &Context) -> Result<Html<String>, AppError> {
        Ok(Html(self.tera.render(name, context)?))
    }

    /// Render the dedicated page for an error status. Falls back to a plain
    /// body if the template itself fails.
    pub fn error_page(&self, status: StatusCode) -> Response {
        let (template, title) = match status {
            StatusCode::FORBIDDEN => ("errors/403.html", "Forbidden"),
            StatusCode::NOT_FOUND => ("errors/404.html", "Page Not Found"),
            _ => ("errors/500.html", "Server Error"),
        };

        let mut context = Context::new();
        context.insert("title", title);

        match self.tera.render(template, &context) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                error!("Failed to render {}: {}", template, e);
                (status, format!("{} Error", status.as_u16())).into_response()
            }
        }
    }
}

/// Context shared by every page: title, logged-in user name and the
/// pending flash messages (which are consumed). Pages for a logged-in user
/// also get the CSRF token used by the logout and delete links.
pub async fn page_context(session: &Session, title: &str, user: Option<&user::Model>) -> Context {
    let mut context = Context::new();
    context.insert("title", title);
    context.insert("current_user", &user.map(|u| u.name.as_str()));
    context.insert("flashes", &session.take_flashes().await);
    if user.is_some() {
        context.insert("csrf_token", &session.csrf_token().await);
    }
    context
}

/// Replace responses marked with [`ErrorPage`] by the rendered error
/// template for their status.
pub async fn render_error_pages(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    match response.extensions().get::<ErrorPage>().copied() {
        Some(ErrorPage(status)) => state.templates.error_page(status),
        None => response,
    }
}
