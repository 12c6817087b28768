use std::io::{Cursor, Read};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use quiz_generator::api::dto::{HistoryResponse, QuizTextResponse};
use quiz_generator::error::LlmError;
use quiz_generator::{api, App, AppResult, ChatBackend, Config, Message, Role};
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tower::ServiceExt;

const QUIZ: &str = "Level: B2 | Type: Grammar Exercise\n\
Title: Past Tenses\n\
1. She ____ to school yesterday.\n\
A) go\n\
B) went\n\
C) gone\n\
D) goes\n\
\n\
ANSWER KEY\n\
1) B";

/// 返回固定回复的模型后端，并记录每次请求
struct FakeBackend {
    reply: String,
    calls: Mutex<Vec<Vec<Message>>>,
}

#[async_trait]
impl ChatBackend for FakeBackend {
    async fn send(&self, messages: &[Message]) -> AppResult<String> {
        self.calls.lock().await.push(messages.to_vec());
        Ok(self.reply.clone())
    }
}

struct DownBackend;

#[async_trait]
impl ChatBackend for DownBackend {
    async fn send(&self, _messages: &[Message]) -> AppResult<String> {
        Err(LlmError::EmptyContent {
            model: "gpt-4o-mini".to_string(),
        }
        .into())
    }
}

struct TestApp {
    router: Router,
    backend: Arc<FakeBackend>,
    _dir: tempfile::TempDir,
}

fn test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        export_dir: dir.path().join("exports").display().to_string(),
        ..Config::default()
    };
    let backend = Arc::new(FakeBackend {
        reply: QUIZ.to_string(),
        calls: Mutex::new(Vec::new()),
    });
    let state = App::build_state(&config, backend.clone());
    TestApp {
        router: api::router(state),
        backend,
        _dir: dir,
    }
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let response = app.router.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["sessions"], 0);
}

#[tokio::test]
async fn test_create_quiz_then_read_history() {
    let app = test_app();

    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/api/quizzes/create",
            json!({
                "source_text": "Yesterday Tom went to school by bus.",
                "level": "B2",
                "quizType": "grammar",
                "question_count": 6,
                "session_id": "class-7"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created: QuizTextResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(created.result, QUIZ);

    let calls = app.backend.calls.lock().await;
    assert_eq!(calls.len(), 1);
    assert!(calls[0][0].content.contains("CEFR level: B2. Exercise type: grammar."));
    drop(calls);

    let response = app
        .router
        .oneshot(get("/api/sessions/class-7/history"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let history: HistoryResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(history.messages.len(), 3);
    assert_eq!(history.messages[0].role, Role::System);
    assert_eq!(history.messages[2].content, QUIZ);
}

#[tokio::test]
async fn test_create_quiz_rejects_bad_question_count() {
    let app = test_app();
    let response = app
        .router
        .oneshot(post_json(
            "/api/quizzes/create",
            json!({
                "source_text": "Yesterday Tom went to school by bus.",
                "level": "A1",
                "quizType": "reading",
                "question_count": 40
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.backend.calls.lock().await.is_empty());
}

#[tokio::test]
async fn test_chat_edit_forwards_header_meta() {
    let app = test_app();
    let response = app
        .router
        .oneshot(post_json(
            "/api/quizzes/chat",
            json!({ "quiz_text": QUIZ, "message": "Change option D to 'has gone'." }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let calls = app.backend.calls.lock().await;
    assert!(calls[0][0]
        .content
        .contains("Keep CEFR level = B2 and exercise type = grammar"));
    assert!(calls[0][1].content.contains("Change option D"));
}

#[tokio::test]
async fn test_chat_edit_empty_message_is_bad_request() {
    let app = test_app();
    let response = app
        .router
        .oneshot(post_json(
            "/api/quizzes/chat",
            json!({ "quiz_text": QUIZ, "message": "" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_provider_failure_is_bad_gateway() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        export_dir: dir.path().display().to_string(),
        ..Config::default()
    };
    let router = api::router(App::build_state(&config, Arc::new(DownBackend)));

    let response = router
        .oneshot(post_json(
            "/api/quizzes/chat",
            json!({ "quiz_text": QUIZ, "message": "shorter please" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(body["detail"].as_str().unwrap().contains("gpt-4o-mini"));
}

fn document_xml(docx: &[u8]) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(docx)).unwrap();
    let mut file = archive.by_name("word/document.xml").unwrap();
    let mut xml = String::new();
    file.read_to_string(&mut xml).unwrap();
    xml
}

#[tokio::test]
async fn test_export_student_copy_omits_answer_key() {
    let app = test_app();
    let response = app
        .router
        .oneshot(post_json(
            "/api/quizzes/export/docx",
            json!({ "content": QUIZ, "filename": "Past Tenses", "include_answers": false }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"Past_Tenses_student.docx\""
    );

    let xml = document_xml(&body_bytes(response).await);
    assert!(xml.contains("Past Tenses"));
    assert!(xml.contains("She ____ to school yesterday."));
    assert!(!xml.contains("ANSWER KEY"));
    assert!(!xml.contains("1) B"));
}

#[tokio::test]
async fn test_export_teacher_copy_defaults() {
    let app = test_app();
    let response = app
        .router
        .oneshot(post_json("/api/quizzes/export/docx", json!({ "content": QUIZ })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"quiz_teacher.docx\""
    );
    let xml = document_xml(&body_bytes(response).await);
    assert!(xml.contains("ANSWER KEY"));
    assert!(xml.contains("1) B"));
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let app = test_app();
    let response = app
        .router
        .clone()
        .oneshot(get("/api/sessions/nobody/history"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .router
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/sessions/nobody")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_level_is_json_bad_request() {
    let app = test_app();
    let response = app
        .router
        .oneshot(post_json(
            "/api/quizzes/create",
            json!({
                "source_text": "Yesterday Tom went to school by bus.",
                "level": "C1",
                "quizType": "reading",
                "question_count": 6
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("application/json"));

    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["status"], 400);
    assert!(body["detail"].as_str().unwrap().contains("C1"));
    assert!(app.backend.calls.lock().await.is_empty());
}

#[tokio::test]
async fn test_missing_field_is_json_bad_request() {
    let app = test_app();
    let response = app
        .router
        .oneshot(post_json("/api/quizzes/chat", json!({ "quiz_text": "abc" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(body["detail"].as_str().unwrap().contains("message"));
}

#[tokio::test]
async fn test_negative_question_count_is_json_bad_request() {
    let app = test_app();
    let response = app
        .router
        .oneshot(post_json(
            "/api/quizzes/create",
            json!({
                "source_text": "Yesterday Tom went to school by bus.",
                "level": "B1",
                "quizType": "reading",
                "question_count": -3
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["status"], 400);
}
