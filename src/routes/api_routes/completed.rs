use crate::analytics::{self, Period, PeriodQuery};
use crate::models::{AppState, CompletedOrder};
use crate::Result;
use crate::routes::extract::ApiQuery;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use http::StatusCode;
use serde_json::json;

async fn load(state: &AppState, query: &PeriodQuery) -> Result<Vec<CompletedOrder>> {
    let period = Period::from_query(query)?;
    let orders = state.completed_storage.get_all().await?;
    Ok(analytics::filter_completed(
        orders,
        period,
        Utc::now(),
        state.config.timezone(),
    ))
}

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PeriodQuery>,
) -> impl IntoResponse {
    match load(&state, &query).await {
        Ok(orders) => (StatusCode::OK, Json(orders)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn report(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PeriodQuery>,
) -> impl IntoResponse {
    match load(&state, &query).await {
        Ok(orders) => {
            let report = analytics::completed_report(&orders, state.config.timezone());
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

pub async fn clear(State(state): State<AppState>) -> impl IntoResponse {
    match state.completed_storage.clear().await {
        Ok(deleted) => {
            tracing::info!("Архив готовых заказов очищен, удалено записей: {deleted}");
            (StatusCode::OK, Json(json!({ "deleted": deleted }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}
