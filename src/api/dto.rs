//! 请求与响应结构

use serde::{Deserialize, Serialize};

use crate::models::{Level, Message, QuizType};

/// POST /api/quizzes/create
#[derive(Debug, Deserialize)]
pub struct GenerateQuizRequest {
    pub source_text: String,
    pub level: Level,
    #[serde(rename = "quizType")]
    pub quiz_type: QuizType,
    pub question_count: usize,
    pub session_id: Option<String>,
}

/// POST /api/quizzes/chat
#[derive(Debug, Deserialize)]
pub struct ChatEditRequest {
    pub quiz_text: String,
    pub message: String,
    pub session_id: Option<String>,
}

/// 出题与改题的统一响应
#[derive(Debug, Serialize, Deserialize)]
pub struct QuizTextResponse {
    pub result: String,
}

/// POST /api/quizzes/export/docx
#[derive(Debug, Deserialize)]
pub struct ExportDocxRequest {
    pub content: String,
    pub filename: Option<String>,
    #[serde(default = "default_include_answers")]
    pub include_answers: bool,
}

fn default_include_answers() -> bool {
    true
}

/// GET /api/sessions/:id/history
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub session_id: String,
    pub messages: Vec<Message>,
}

/// GET /health
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub sessions: usize,
}
