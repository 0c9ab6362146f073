//! Request failure taxonomy and its Mason rendering.
//!
//! Handlers and validators return [`ApiError`]; the `IntoResponse` impl is
//! the single place where a failure becomes a status code and an `@error`
//! body, so every error on the wire has the same shape.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::builder::MasonDocument;
use crate::constants::{ERROR_PROFILE, MASON};

#[derive(Debug, Error)]
pub enum ApiError {
    /// A well-formed body that breaks a field-level rule.
    #[error("{0}")]
    Validation(String),
    /// A field that cannot be decoded at all, e.g. a date that is not
    /// in ISO format.
    #[error("{0}")]
    Format(String),
    /// A write that loses against committed state: duplicate key or a
    /// reference to a row that is not there.
    #[error("{0}")]
    Conflict(String),
    #[error("the requested resource does not exist")]
    NotFound,
    #[error("a valid api key is required for this operation")]
    Forbidden,
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Format(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            ApiError::Validation(_) | ApiError::Format(_) => "Bad Request",
            ApiError::Conflict(_) => "Conflict",
            ApiError::NotFound => "Not Found",
            ApiError::Forbidden => "Forbidden",
            ApiError::Database(_) => "Internal Server Error",
        }
    }

    /// Turns a constraint violation reported by the storage engine into a
    /// conflict carrying `message`. Any other database error stays a
    /// server fault.
    pub fn conflict_on_constraint(err: DbErr, message: impl Into<String>) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_))
            | Some(SqlErr::ForeignKeyConstraintViolation(_)) => ApiError::Conflict(message.into()),
            _ => ApiError::Database(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let details = match &self {
            // Storage faults are logged server side, never surfaced.
            ApiError::Database(err) => {
                tracing::error!("database error: {err}");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        let mut body = MasonDocument::new();
        body.add_error(self.title(), &details);
        body.add_control("profile", ERROR_PROFILE);
        (
            self.status(),
            [(header::CONTENT_TYPE, MASON)],
            body.render(),
        )
            .into_response()
    }
}
