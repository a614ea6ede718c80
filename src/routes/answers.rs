use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::{
    dto::{
        answer_dto::{CreateAnswerPayload, UpdateAnswerPayload},
        query::IdQuery,
    },
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/answers",
    tag = "answers",
    params(IdQuery),
    responses(
        (status = 200, description = "All answers, or the one selected by `id`", body = [crate::models::answer::Answer]),
        (status = 404, description = "Answer not found")
    )
)]
#[axum::debug_handler]
pub async fn get_answers(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Response> {
    match query.id {
        Some(id) => Ok(Json(state.answer_service.get_by_id(id).await?).into_response()),
        None => Ok(Json(state.answer_service.list().await?).into_response()),
    }
}

#[utoipa::path(
    post,
    path = "/answers",
    tag = "answers",
    request_body = CreateAnswerPayload,
    responses(
        (status = 201, description = "Answer created", body = crate::models::answer::Answer),
        (status = 400, description = "Invalid payload, unknown or already answered question, or store failure")
    )
)]
#[axum::debug_handler]
pub async fn create_answer(
    State(state): State<AppState>,
    Json(payload): Json<CreateAnswerPayload>,
) -> Result<impl IntoResponse> {
    let answer = state.answer_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(answer)))
}

#[utoipa::path(
    patch,
    path = "/answers",
    tag = "answers",
    params(IdQuery),
    request_body = UpdateAnswerPayload,
    responses(
        (status = 200, description = "Merged answer", body = crate::models::answer::Answer),
        (status = 400, description = "Missing id or invalid payload"),
        (status = 404, description = "Answer not found"),
        (status = 500, description = "Store returned an inconsistent record")
    )
)]
#[axum::debug_handler]
pub async fn update_answer(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
    Json(payload): Json<UpdateAnswerPayload>,
) -> Result<impl IntoResponse> {
    let answer = state.answer_service.update(query.require()?, payload).await?;
    Ok(Json(answer))
}

#[utoipa::path(
    delete,
    path = "/answers",
    tag = "answers",
    params(IdQuery),
    responses(
        (status = 204, description = "Answer deleted, or all answers when `id` is absent"),
        (status = 404, description = "Answer not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_answers(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse> {
    match query.id {
        Some(id) => state.answer_service.delete(id).await?,
        None => {
            state.answer_service.delete_all().await?;
        }
    }
    Ok(StatusCode::NO_CONTENT)
}
