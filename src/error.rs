use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

/// Error types surfaced by request handlers
#[derive(Error, Debug)]
pub enum AppError {
    /// The requested record or page does not exist
    #[error("Resource not found")]
    NotFound,

    /// The caller may not perform this action
    #[error("Forbidden")]
    Forbidden,

    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Error while rendering a page
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    /// Error from password hashing
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// Runtime error for unexpected situations
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Marks a response whose body should be replaced by the rendered error page
/// for its status. Set by [`AppError`], consumed by `render_error_pages`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ErrorPage(pub StatusCode);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Database(_)
            | AppError::Template(_)
            | AppError::PasswordHash(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            warn!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let mut response = status.into_response();
        response.extensions_mut().insert(ErrorPage(status));
        response
    }
}
