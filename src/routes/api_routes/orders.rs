use crate::analytics::{self, StatusFilter};
use crate::models::{AppState, Order};
use crate::sheet_service::{SheetRequest, SheetSource};
use crate::routes::extract::ApiQuery;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use bytes::Bytes;
use http::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrdersQuery {
    spreadsheet_id: Option<String>,
    sheet_gid: Option<String>,
    status: Option<StatusFilter>,
    search: Option<String>,
}
impl OrdersQuery {
    fn sheet(&self) -> SheetRequest {
        SheetRequest {
            spreadsheet_id: self.spreadsheet_id.clone(),
            sheet_gid: self.sheet_gid.clone(),
        }
    }
}

#[derive(Serialize)]
struct OrdersResponse {
    data: Vec<Order>,
    count: usize,
}
impl From<Vec<Order>> for OrdersResponse {
    fn from(data: Vec<Order>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Тело запроса необязательное, неразборчивое тело равносильно пустому
fn sheet_from_body(state: &AppState, body: &Bytes) -> SheetSource {
    let request = if body.is_empty() {
        SheetRequest::default()
    } else {
        serde_json::from_slice::<SheetRequest>(body).unwrap_or_else(|e| {
            tracing::warn!("Не удалось разобрать тело запроса, беру лист по умолчанию: {e}");
            SheetRequest::default()
        })
    };
    state.config.sheet.with_overrides(&request)
}

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<OrdersQuery>,
) -> impl IntoResponse {
    let source = state.config.sheet.with_overrides(&query.sheet());
    match state.orders_service.get_orders(&source).await {
        Ok(orders) => {
            let orders = analytics::filter_orders(
                orders,
                query.status.unwrap_or_default(),
                query.search.as_deref(),
            );
            (StatusCode::OK, Json(OrdersResponse::from(orders))).into_response()
        }
        Err(e) => {
            tracing::error!("Ошибка получения заказов: {e:?}");
            e.into_response_with("FETCH_ORDERS_FAILED")
        }
    }
}

pub async fn fetch(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let source = sheet_from_body(&state, &body);
    match state.orders_service.get_orders(&source).await {
        Ok(orders) => (StatusCode::OK, Json(OrdersResponse::from(orders))).into_response(),
        Err(e) => {
            tracing::error!("Ошибка получения заказов: {e:?}");
            e.into_response_with("FETCH_ORDERS_FAILED")
        }
    }
}

pub async fn sync_completed(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let source = sheet_from_body(&state, &body);
    match state.orders_service.sync_completed(&source).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            tracing::error!("Ошибка синхронизации готовых заказов: {e:?}");
            e.into_response_with("SYNC_ERROR")
        }
    }
}

pub async fn workload(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SheetRequest>,
) -> impl IntoResponse {
    let source = state.config.sheet.with_overrides(&query);
    match state.orders_service.get_orders(&source).await {
        Ok(orders) => (StatusCode::OK, Json(analytics::workload(&orders))).into_response(),
        Err(e) => {
            tracing::error!("Ошибка расчета загрузки участков: {e:?}");
            e.into_response_with("FETCH_ORDERS_FAILED")
        }
    }
}

#[derive(Deserialize)]
pub struct SheetLinkQuery {
    url: Option<String>,
    gid: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SheetLink {
    #[serde(flatten)]
    source: SheetSource,
    csv_url: String,
}

pub async fn check_sheet(ApiQuery(query): ApiQuery<SheetLinkQuery>) -> impl IntoResponse {
    let url = query.url.unwrap_or_default();
    let gid = query.gid.unwrap_or_default();
    match SheetSource::from_link(&url, &gid) {
        Ok(source) => {
            let link = SheetLink {
                csv_url: source.csv_url(),
                source,
            };
            (StatusCode::OK, Json(link)).into_response()
        }
        Err(e) => e.into_response(),
    }
}
