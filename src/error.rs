use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::{
    response::{BadRequestBody, ErrorResponse},
    schema::FieldErrors,
};

pub const PRODUCT_NOT_FOUND: &str = "Produto não encontrado.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Código de barras já foi cadastrado em outro produto")]
    DuplicateBarcode,

    #[error("{0}")]
    BadRequest(String),

    #[error("Database error")]
    OrmError(#[from] DbErr),
}

impl AppError {
    pub fn product_not_found() -> Self {
        AppError::NotFound(PRODUCT_NOT_FOUND.to_string())
    }

    /// Classify a failed write. The only unique index besides the primary key
    /// is the barcode, so a unique violation is a barcode conflict.
    pub fn from_write(err: DbErr, fallback: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                tracing::warn!(%detail, "barcode already in use");
                AppError::DuplicateBarcode
            }
            Some(other) => {
                tracing::warn!(error = ?other, "constraint violation");
                AppError::BadRequest(fallback.to_string())
            }
            None => AppError::OrmError(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateBarcode => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::OrmError(err) => {
                tracing::error!(error = %err, "database operation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        match self {
            AppError::Validation(errors) => {
                (status, Json(BadRequestBody::Fields(errors))).into_response()
            }
            other => (status, Json(ErrorResponse::new(other.to_string()))).into_response(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
