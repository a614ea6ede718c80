pub mod answers;
pub mod health;
pub mod openapi;
pub mod questions;
pub mod todos;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{middleware::cors::permissive_cors, AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/openapi", get(openapi::openapi_json))
        .route(
            "/questions",
            get(questions::get_questions)
                .post(questions::create_question)
                .delete(questions::delete_questions),
        )
        .route(
            "/answers",
            get(answers::get_answers)
                .post(answers::create_answer)
                .patch(answers::update_answer)
                .delete(answers::delete_answers),
        )
        .route(
            "/",
            get(todos::get_todos)
                .post(todos::create_todo)
                .patch(todos::update_todo)
                .delete(todos::delete_todos),
        )
        .with_state(state)
        .layer(permissive_cors())
        .layer(TraceLayer::new_for_http())
}
