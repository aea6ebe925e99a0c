use crate::models::AppState;
use axum::routing::{get, post};
use axum::Router;

mod completed;
mod logistics;
mod orders;
mod problems;

pub fn init(state: AppState) -> Router {
    Router::new()
        .route("/orders", get(orders::list).post(orders::fetch))
        .route("/sync-completed-orders", post(orders::sync_completed))
        .route("/workload", get(orders::workload))
        .route("/sheet", get(orders::check_sheet))
        .route(
            "/completed-orders",
            get(completed::list).delete(completed::clear),
        )
        .route("/completed-orders/report", get(completed::report))
        .route("/logistics", get(logistics::list).post(logistics::create))
        .route("/problems", get(problems::list_open).post(problems::create))
        .route("/problems/archive", get(problems::list_resolved))
        .route("/problems/{id}/resolve", post(problems::resolve))
        .with_state(state)
}
