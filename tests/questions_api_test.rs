use std::sync::Arc;

use animal_quiz_backend::{config::Config, database::MemoryStore, routes, AppState};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::send;

async fn setup_app() -> Router {
    let state = AppState::initialize(Arc::new(MemoryStore::new()), &Config::default())
        .await
        .expect("state");
    routes::router(state)
}

#[tokio::test]
async fn question_creation_links_answer_both_ways() {
    let app = setup_app().await;

    let (status, answer) = send(
        &app,
        "POST",
        "/answers",
        Some(json!({ "text": "Cat", "type": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let answer_id = answer["id"].as_i64().unwrap();
    assert!(answer["questionId"].is_null());

    let (status, question) = send(
        &app,
        "POST",
        "/questions",
        Some(json!({ "id": 500, "text": "Does it purr?", "type": 1, "answerId": answer_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(question["answerId"].as_i64(), Some(answer_id));
    assert_ne!(question["id"].as_i64(), Some(500));
    let question_id = question["id"].as_i64().unwrap();

    let (status, linked) = send(&app, "GET", &format!("/answers?id={}", answer_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(linked["questionId"].as_i64(), Some(question_id));

    let (status, fetched) = send(&app, "GET", &format!("/questions?id={}", question_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["text"], "Does it purr?");

    let (status, all) = send(&app, "GET", "/questions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn question_with_unknown_answer_is_not_found_and_not_stored() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/questions",
        Some(json!({ "text": "Does it bark?", "type": 1, "answerId": 42 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    let (_, all) = send(&app, "GET", "/questions", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn question_payload_validation() {
    let app = setup_app().await;
    let (_, answer) = send(&app, "POST", "/answers", Some(json!({ "text": "Dog", "type": 0 }))).await;
    let answer_id = answer["id"].as_i64().unwrap();

    for body in [
        json!({ "text": "", "type": 1, "answerId": answer_id }),
        json!({ "type": 1, "answerId": answer_id }),
        json!({ "text": "Does it bark?", "answerId": answer_id }),
        json!({ "text": "Does it bark?", "type": 1 }),
    ] {
        let (status, _) = send(&app, "POST", "/questions", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", body);
    }
}

#[tokio::test]
async fn question_type_outside_known_response_kinds_is_accepted() {
    let app = setup_app().await;

    for kind in [0, 4, 9] {
        let (_, answer) =
            send(&app, "POST", "/answers", Some(json!({ "text": "Rabbit", "type": 2 }))).await;
        let answer_id = answer["id"].as_i64().unwrap();

        let (status, question) = send(
            &app,
            "POST",
            "/questions",
            Some(json!({ "text": "Does it hop?", "type": kind, "answerId": answer_id })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "type {}", kind);
        assert_eq!(question["type"], kind);
        assert_eq!(question["answerId"], answer_id);
    }
}

#[tokio::test]
async fn second_question_for_linked_answer_conflicts() {
    let app = setup_app().await;
    let (_, answer) = send(&app, "POST", "/answers", Some(json!({ "text": "Dog", "type": 0 }))).await;
    let answer_id = answer["id"].as_i64().unwrap();

    let body = json!({ "text": "Does it bark?", "type": 1, "answerId": answer_id });
    let (status, first) = send(&app, "POST", "/questions", Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, "POST", "/questions", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, linked) = send(&app, "GET", &format!("/answers?id={}", answer_id), None).await;
    assert_eq!(linked["questionId"], first["id"]);
}

#[tokio::test]
async fn deleting_a_question_clears_the_answer_backlink() {
    let app = setup_app().await;
    let (_, answer) = send(&app, "POST", "/answers", Some(json!({ "text": "Rabbit", "type": 2 }))).await;
    let answer_id = answer["id"].as_i64().unwrap();
    let (_, question) = send(
        &app,
        "POST",
        "/questions",
        Some(json!({ "text": "Does it hop?", "type": 1, "answerId": answer_id })),
    )
    .await;
    let question_id = question["id"].as_i64().unwrap();

    let (status, _) = send(&app, "DELETE", &format!("/questions?id={}", question_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, orphan) = send(&app, "GET", &format!("/answers?id={}", answer_id), None).await;
    assert!(orphan["questionId"].is_null());

    let (status, _) = send(&app, "DELETE", &format!("/questions?id={}", question_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "GET", &format!("/questions?id={}", question_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_openapi_and_cors() {
    let app = setup_app().await;

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, doc) = send(&app, "GET", "/openapi", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/questions"].is_object());
    assert!(doc["paths"]["/answers"].is_object());

    let req = Request::builder()
        .method("GET")
        .uri("/questions")
        .header("origin", "http://example.com")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
