//! Экстракторы, которые отвечают на ошибки разбора запроса в общем
//! формате `{"error": {...}}` вместо текста axum.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};

use crate::AppError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        Self::Validation(value.body_text())
    }
}
impl From<QueryRejection> for AppError {
    fn from(value: QueryRejection) -> Self {
        Self::Validation(value.body_text())
    }
}
impl From<PathRejection> for AppError {
    fn from(value: PathRejection) -> Self {
        Self::Validation(value.body_text())
    }
}
