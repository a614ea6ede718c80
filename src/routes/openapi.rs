use axum::Json;
use utoipa::OpenApi;

use crate::dto::{
    answer_dto::{CreateAnswerPayload, UpdateAnswerPayload},
    question_dto::CreateQuestionPayload,
    todo_dto::TodoPayload,
};
use crate::models::{answer::Answer, question::Question, todo::ToDo};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::questions::get_questions,
        crate::routes::questions::create_question,
        crate::routes::questions::delete_questions,
        crate::routes::answers::get_answers,
        crate::routes::answers::create_answer,
        crate::routes::answers::update_answer,
        crate::routes::answers::delete_answers,
        crate::routes::todos::get_todos,
        crate::routes::todos::create_todo,
        crate::routes::todos::update_todo,
        crate::routes::todos::delete_todos,
    ),
    components(schemas(
        Question,
        Answer,
        ToDo,
        CreateQuestionPayload,
        CreateAnswerPayload,
        UpdateAnswerPayload,
        TodoPayload,
    )),
    tags(
        (name = "questions", description = "Questions posed to the player"),
        (name = "answers", description = "Expected answers"),
        (name = "todos", description = "Legacy to-do list")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_bodies_reference_model_schemas() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let created = |path: &str| {
            doc["paths"][path]["post"]["responses"]["201"]["content"]["application/json"]["schema"]
                ["$ref"]
                .clone()
        };
        assert_eq!(created("/questions"), "#/components/schemas/Question");
        assert_eq!(created("/answers"), "#/components/schemas/Answer");
        assert_eq!(created("/"), "#/components/schemas/ToDo");
        assert!(doc["components"]["schemas"]["Question"].is_object());
    }
}
