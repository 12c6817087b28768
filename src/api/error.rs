//! HTTP 错误响应

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::error::AppError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("会话不存在: {0}")]
    SessionNotFound(String),

    #[error("请求格式错误: {}", .0.body_text())]
    BadRequest(#[from] JsonRejection),

    #[error(transparent)]
    App(#[from] AppError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::App(AppError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::App(AppError::Llm(_)) => StatusCode::BAD_GATEWAY,
            ApiError::App(AppError::File(_)) | ApiError::App(AppError::Config(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            error!("❌ 请求失败: {}", self);
        } else {
            warn!("请求被拒绝: {}", self);
        }

        let body = Json(json!({
            "detail": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
