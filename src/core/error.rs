use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A delete was refused because other rows still depend on the target
    #[error("Integrity violation: {0}")]
    Integrity(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                    None,
                )
            }
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
            ),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Auth(ref msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
            AppError::Unauthorized(ref msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
            AppError::Forbidden(ref msg) => (StatusCode::FORBIDDEN, msg.clone(), None),
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, msg.clone(), None),
            AppError::Integrity(ref msg) => (
                StatusCode::CONFLICT,
                msg.clone(),
                Some(vec![msg.clone()]),
            ),
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// PostgreSQL unique_violation
pub const PG_UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL foreign_key_violation
pub const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// Translate the store's native constraint codes into domain errors.
///
/// `conflict_message` is used for unique violations, `missing_reference_message`
/// for foreign key violations. Anything else stays a database error.
pub fn translate_db_error(
    e: sqlx::Error,
    conflict_message: &str,
    missing_reference_message: &str,
) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        match db_err.code().as_deref() {
            Some(PG_UNIQUE_VIOLATION) => {
                return AppError::Conflict(conflict_message.to_string());
            }
            Some(PG_FOREIGN_KEY_VIOLATION) => {
                return AppError::BadRequest(missing_reference_message.to_string());
            }
            _ => {}
        }
    }

    AppError::Database(e)
}
