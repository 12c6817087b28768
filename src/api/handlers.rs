//! HTTP 处理器
//!
//! 只做请求解包与响应封装，具体逻辑交给流程层

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use super::dto::*;
use super::error::ApiError;
use super::extract::ApiJson;
use super::AppState;
use crate::services::docx_writer::DOCX_MIME_TYPE;
use crate::workflow::{ChatEditInput, CreateQuizInput};

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        sessions: state.store.session_count().await,
    })
}

/// POST /api/quizzes/create
pub async fn create_quiz(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<GenerateQuizRequest>,
) -> Result<Json<QuizTextResponse>, ApiError> {
    let input = CreateQuizInput {
        source_text: req.source_text,
        level: req.level,
        quiz_type: req.quiz_type,
        question_count: req.question_count,
        session_id: req.session_id,
    };
    let result = state.quiz_flow.create_quiz(&input).await?;
    Ok(Json(QuizTextResponse { result }))
}

/// POST /api/quizzes/chat
pub async fn chat_edit(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ChatEditRequest>,
) -> Result<Json<QuizTextResponse>, ApiError> {
    let input = ChatEditInput {
        quiz_text: req.quiz_text,
        message: req.message,
        session_id: req.session_id,
    };
    let result = state.quiz_flow.chat_edit(&input).await?;
    Ok(Json(QuizTextResponse { result }))
}

/// POST /api/quizzes/export/docx
///
/// 返回 DOCX 文件本体，下载名为 `{文件名}_teacher.docx` 或 `{文件名}_student.docx`
pub async fn export_docx(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ExportDocxRequest>,
) -> Result<Response, ApiError> {
    let file = state
        .export_flow
        .export(&req.content, req.filename.as_deref(), req.include_answers)
        .await?;

    let disposition = content_disposition(&file.download_name);
    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static(DOCX_MIME_TYPE)),
        (header::CONTENT_DISPOSITION, disposition),
    ];
    Ok((headers, file.bytes).into_response())
}

/// GET /api/sessions/:id/history
pub async fn session_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<HistoryResponse>, ApiError> {
    if !state.store.contains(&session_id).await {
        return Err(ApiError::SessionNotFound(session_id));
    }
    let messages = state.store.get_history(&session_id).await;
    Ok(Json(HistoryResponse {
        session_id,
        messages,
    }))
}

/// DELETE /api/sessions/:id
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.store.remove(&session_id).await {
        info!("🗑️ 会话已删除: {}", session_id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::SessionNotFound(session_id))
    }
}

/// 构建 `Content-Disposition`，非 ASCII 文件名同时给出 RFC 5987 编码
fn content_disposition(filename: &str) -> HeaderValue {
    let ascii_fallback: String = filename
        .chars()
        .map(|c| if c.is_ascii_graphic() && c != '"' && c != '\\' { c } else { '_' })
        .collect();

    let mut value = format!("attachment; filename=\"{}\"", ascii_fallback);
    if !filename.is_ascii() {
        value.push_str("; filename*=UTF-8''");
        value.push_str(&urlencoding::encode(filename));
    }

    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}
