use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::{
    dto::{query::IdQuery, question_dto::CreateQuestionPayload},
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/questions",
    tag = "questions",
    params(IdQuery),
    responses(
        (status = 200, description = "All questions, or the one selected by `id`", body = [crate::models::question::Question]),
        (status = 404, description = "Question not found")
    )
)]
#[axum::debug_handler]
pub async fn get_questions(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Response> {
    match query.id {
        Some(id) => Ok(Json(state.question_service.get_by_id(id).await?).into_response()),
        None => Ok(Json(state.question_service.list().await?).into_response()),
    }
}

#[utoipa::path(
    post,
    path = "/questions",
    tag = "questions",
    request_body = CreateQuestionPayload,
    responses(
        (status = 201, description = "Question created and linked to its answer", body = crate::models::question::Question),
        (status = 400, description = "Invalid payload, answer already linked, or store failure"),
        (status = 404, description = "Referenced answer not found")
    )
)]
#[axum::debug_handler]
pub async fn create_question(
    State(state): State<AppState>,
    Json(payload): Json<CreateQuestionPayload>,
) -> Result<impl IntoResponse> {
    let question = state.question_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(question)))
}

#[utoipa::path(
    delete,
    path = "/questions",
    tag = "questions",
    params(IdQuery),
    responses(
        (status = 204, description = "Question deleted, or all questions when `id` is absent"),
        (status = 404, description = "Question not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_questions(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse> {
    match query.id {
        Some(id) => state.question_service.delete(id).await?,
        None => {
            state.question_service.delete_all().await?;
        }
    }
    Ok(StatusCode::NO_CONTENT)
}
