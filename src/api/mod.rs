//! HTTP 接口层
//!
//! 对外暴露出题、改题、导出与会话查询接口

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::services::ConversationStore;
use crate::workflow::{ExportFlow, QuizFlow};

pub use error::ApiError;

/// 各处理器共享的状态
#[derive(Clone)]
pub struct AppState {
    pub quiz_flow: Arc<QuizFlow>,
    pub export_flow: Arc<ExportFlow>,
    pub store: Arc<ConversationStore>,
}

/// 构建路由
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/quizzes/create", post(handlers::create_quiz))
        .route("/api/quizzes/chat", post(handlers::chat_edit))
        .route("/api/quizzes/export/docx", post(handlers::export_docx))
        .route("/api/sessions/:id/history", get(handlers::session_history))
        .route("/api/sessions/:id", axum::routing::delete(handlers::delete_session))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
