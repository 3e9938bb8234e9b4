use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    models::ValidationError,
    repository::RepositoryError,
    response::ErrorBody,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Product not found")]
    NotFound,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Unprocessable(String),

    #[error("Storage error")]
    Storage(#[source] RepositoryError),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { .. } => AppError::NotFound,
            other => AppError::Storage(other),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Unprocessable(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Unprocessable(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, ErrorBody::new(self.to_string())),
            AppError::Validation(err) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorBody::validation(err))
            }
            AppError::Unprocessable(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody::new(self.to_string()),
            ),
            AppError::Storage(err) => {
                tracing::error!(error = ?err, "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("Internal Server Error"),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
