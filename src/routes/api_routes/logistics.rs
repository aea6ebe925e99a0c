use crate::analytics;
use crate::models::{AppState, MoveRequest, NewLogisticsEntry};
use crate::routes::extract::{ApiJson, ApiQuery};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use http::StatusCode;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> impl IntoResponse {
    match state.logistics_storage.get_all().await {
        Ok(entries) => {
            let entries = analytics::search_logistics(entries, query.search.as_deref());
            (StatusCode::OK, Json(entries)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<MoveRequest>,
) -> impl IntoResponse {
    let entry = match NewLogisticsEntry::try_from(request) {
        Ok(entry) => entry,
        Err(e) => return e.into_response(),
    };
    match state.logistics_storage.insert(entry).await {
        Ok(entry) => {
            tracing::info!(
                "Заказ {} перемещен на участок {} ({})",
                entry.order_number,
                entry.moved_to,
                entry.moved_by
            );
            (StatusCode::CREATED, Json(entry)).into_response()
        }
        Err(e) => e.into_response(),
    }
}
