//! Legacy to-do routes mounted at the root path.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::{
    dto::{query::IdQuery, todo_dto::TodoPayload},
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/",
    tag = "todos",
    params(IdQuery),
    responses(
        (status = 200, description = "All to-dos, or the one selected by `id`", body = [crate::models::todo::ToDo]),
        (status = 404, description = "ToDo not found")
    )
)]
#[axum::debug_handler]
pub async fn get_todos(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Response> {
    match query.id {
        Some(id) => Ok(Json(state.todo_service.get_by_id(id).await?).into_response()),
        None => Ok(Json(state.todo_service.list().await?).into_response()),
    }
}

#[utoipa::path(
    post,
    path = "/",
    tag = "todos",
    request_body = TodoPayload,
    responses(
        (status = 201, description = "ToDo created", body = crate::models::todo::ToDo)
    )
)]
#[axum::debug_handler]
pub async fn create_todo(
    State(state): State<AppState>,
    Json(payload): Json<TodoPayload>,
) -> Result<impl IntoResponse> {
    let todo = state.todo_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

#[utoipa::path(
    patch,
    path = "/",
    tag = "todos",
    params(IdQuery),
    request_body = TodoPayload,
    responses(
        (status = 200, description = "Merged to-do", body = crate::models::todo::ToDo),
        (status = 404, description = "ToDo not found"),
        (status = 500, description = "Store returned an inconsistent record")
    )
)]
#[axum::debug_handler]
pub async fn update_todo(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
    Json(payload): Json<TodoPayload>,
) -> Result<impl IntoResponse> {
    let todo = state.todo_service.update(query.require()?, payload).await?;
    Ok(Json(todo))
}

#[utoipa::path(
    delete,
    path = "/",
    tag = "todos",
    params(IdQuery),
    responses(
        (status = 204, description = "ToDo deleted, or all to-dos when `id` is absent"),
        (status = 404, description = "ToDo not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_todos(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse> {
    match query.id {
        Some(id) => state.todo_service.delete(id).await?,
        None => {
            state.todo_service.delete_all().await?;
        }
    }
    Ok(StatusCode::NO_CONTENT)
}
