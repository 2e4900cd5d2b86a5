//! `/api/v1/list` handlers.

use axum::{Json, extract::State, http::StatusCode};

use crate::http::{
    auth::AuthenticatedUser,
    dto::{ListRequest, ListResponse, TaskRequest},
    error::ApiErrorResponse,
    extract::{JsonBody, PathParams},
    state::AppState,
};
use crate::todo_list::domain::{ListId, TaskId};

type ListResult = Result<Json<ListResponse>, ApiErrorResponse>;

/// `GET /api/v1/list/{id}`.
pub async fn get_list(
    State(state): State<AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
    PathParams(id): PathParams<ListId>,
) -> ListResult {
    let list = state.lists.get_list_by_id_for_user(id, &username).await?;
    Ok(Json(ListResponse::from(&list)))
}

/// `GET /api/v1/list/all`.
pub async fn list_all(
    State(state): State<AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
) -> Result<Json<Vec<ListResponse>>, ApiErrorResponse> {
    let lists = state.lists.list_all_for_user(&username).await?;
    Ok(Json(lists.iter().map(ListResponse::from).collect()))
}

/// `POST /api/v1/list`.
pub async fn create_list(
    State(state): State<AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
    JsonBody(request): JsonBody<ListRequest>,
) -> Result<(StatusCode, Json<ListResponse>), ApiErrorResponse> {
    let list = state.lists.create_list(request.into(), &username).await?;
    Ok((StatusCode::CREATED, Json(ListResponse::from(&list))))
}

/// `PUT /api/v1/list/{id}`.
pub async fn update_list(
    State(state): State<AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
    PathParams(id): PathParams<ListId>,
    JsonBody(request): JsonBody<ListRequest>,
) -> ListResult {
    let list = state.lists.update_list(id, request.into(), &username).await?;
    Ok(Json(ListResponse::from(&list)))
}

/// `DELETE /api/v1/list/{id}`.
pub async fn delete_list(
    State(state): State<AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
    PathParams(id): PathParams<ListId>,
) -> Result<StatusCode, ApiErrorResponse> {
    state.lists.delete_list(id, &username).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PATCH /api/v1/list/{id}/active/{active}`.
pub async fn set_active(
    State(state): State<AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
    PathParams((id, active)): PathParams<(ListId, bool)>,
) -> ListResult {
    let list = state.lists.set_active(id, &username, active).await?;
    Ok(Json(ListResponse::from(&list)))
}

/// `PATCH /api/v1/list/{id}/task/add`.
pub async fn add_task(
    State(state): State<AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
    PathParams(id): PathParams<ListId>,
    JsonBody(request): JsonBody<TaskRequest>,
) -> ListResult {
    let list = state.lists.add_task(id, &username, request.into()).await?;
    Ok(Json(ListResponse::from(&list)))
}

/// `PATCH /api/v1/list/{id}/task/remove/{task_id}`.
pub async fn remove_task(
    State(state): State<AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
    PathParams((list_id, task_id)): PathParams<(ListId, TaskId)>,
) -> ListResult {
    let list = state.lists.remove_task(list_id, &username, task_id).await?;
    Ok(Json(ListResponse::from(&list)))
}
