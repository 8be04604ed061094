use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::validation::{Field, FieldErrors};

#[derive(Debug, Error)]
pub enum AppError {
    // request shape and content
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error("{0} has already been taken")]
    UniqueConflict(Field),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("not found")]
    NotFound,
    #[error("invalid token: {0}")]
    InvalidToken(String),

    // infra things
    #[error(transparent)]
    Db(DbErr),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DbErr> for AppError {
    fn from(e: DbErr) -> Self {
        AppError::from_db(e)
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Validation(errors)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    errors: ErrorMessages<'a>,
}

#[derive(Serialize)]
struct ErrorMessages<'a> {
    body: &'a [String],
}

impl AppError {
    fn from_db(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(constraint)) => {
                // Postgres names the constraint (users_email_key), SQLite the column (users.email).
                if constraint.contains("email") {
                    AppError::UniqueConflict(Field::Email)
                } else {
                    AppError::UniqueConflict(Field::Username)
                }
            }
            _ => match err {
                DbErr::RecordNotFound(_) => AppError::NotFound,
                other => AppError::Db(other),
            },
        }
    }

    /// Messages reported to the client under `errors.body`.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::BadRequest(msg) | Self::InvalidArgument(msg) => vec![msg.clone()],
            Self::Validation(errors) => errors.flatten(),
            Self::UniqueConflict(_) => vec![self.to_string()],
            Self::NotFound => vec!["not found".to_string()],
            Self::InvalidToken(_) => vec!["invalid token".to_string()],
            Self::Db(_) | Self::Internal(_) => vec!["internal server error".to_string()],
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) | Self::UniqueConflict(_) | Self::InvalidArgument(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            Self::Db(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        let messages = self.messages();
        HttpResponse::build(status).json(ErrorBody {
            errors: ErrorMessages { body: &messages },
        })
    }
}
