use std::{error::Error, fmt::Display};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub enum AppError {
    DbError(String),
    ReqwestError(String),
    SheetError(String),
    Validation(String),
    NotFound(String),
    Custom(String),
}

pub type Result<T> = core::result::Result<T, AppError>;

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
    pub fn message(&self) -> &str {
        match self {
            AppError::DbError(m)
            | AppError::ReqwestError(m)
            | AppError::SheetError(m)
            | AppError::Validation(m)
            | AppError::NotFound(m)
            | AppError::Custom(m) => m,
        }
    }
    /// Ответ с кодом ошибки конкретного обработчика. Код подменяется
    /// только для внутренних ошибок, у 400 и 404 свои коды.
    pub fn into_response_with(self, code: &'static str) -> Response {
        let status = self.status();
        let code = match status {
            StatusCode::BAD_REQUEST => "VALIDATION_FAILED",
            StatusCode::NOT_FOUND => "NOT_FOUND",
            _ => code,
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code,
                message: self.message().to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}
impl Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_response_with("INTERNAL_ERROR")
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
}

impl From<sqlx::Error> for AppError {
    fn from(value: sqlx::Error) -> Self {
        Self::DbError(value.to_string())
    }
}
impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(value: sqlx::migrate::MigrateError) -> Self {
        Self::DbError(value.to_string())
    }
}
impl From<reqwest::Error> for AppError {
    fn from(value: reqwest::Error) -> Self {
        Self::ReqwestError(value.to_string())
    }
}
impl From<regex::Error> for AppError {
    fn from(value: regex::Error) -> Self {
        Self::Custom(value.to_string())
    }
}
impl From<AppError> for shuttle_runtime::Error {
    fn from(value: AppError) -> Self {
        match value {
            AppError::DbError(e) => shuttle_runtime::Error::Database(e),
            _ => shuttle_runtime::Error::Custom(value.into()),
        }
    }
}
