use super::logistics::SearchQuery;
use crate::analytics;
use crate::models::{AppState, NewProblem, ReportRequest, ResolveRequest};
use crate::AppError;
use crate::routes::extract::{ApiJson, ApiPath, ApiQuery};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use http::StatusCode;

pub async fn list_open(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> impl IntoResponse {
    match state.problem_storage.get_open().await {
        Ok(problems) => {
            let problems = analytics::search_problems(problems, query.search.as_deref());
            (StatusCode::OK, Json(problems)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

pub async fn list_resolved(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> impl IntoResponse {
    match state.problem_storage.get_resolved().await {
        Ok(problems) => {
            let problems = analytics::search_problem_archive(problems, query.search.as_deref());
            (StatusCode::OK, Json(problems)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ReportRequest>,
) -> impl IntoResponse {
    let problem = match NewProblem::try_from(request) {
        Ok(problem) => problem,
        Err(e) => return e.into_response(),
    };
    match state.problem_storage.insert(problem).await {
        Ok(problem) => {
            tracing::info!(
                "Зарегистрирована проблема по заказу {}: {}",
                problem.order_number,
                problem.description
            );
            (StatusCode::CREATED, Json(problem)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

pub async fn resolve(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<uuid::Uuid>,
    ApiJson(request): ApiJson<ResolveRequest>,
) -> impl IntoResponse {
    let resolved_by = request.resolved_by.trim();
    if resolved_by.is_empty() {
        return AppError::Validation("Не указано, кто решил проблему".to_string()).into_response();
    }
    match state.problem_storage.resolve(id, resolved_by).await {
        Ok(Some(problem)) => {
            tracing::info!("Проблема {id} решена ({resolved_by})");
            (StatusCode::OK, Json(problem)).into_response()
        }
        Ok(None) => AppError::NotFound(format!("Проблема {id} не найдена")).into_response(),
        Err(e) => e.into_response(),
    }
}
