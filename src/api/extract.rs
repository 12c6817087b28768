//! 请求体提取器

use axum::extract::FromRequest;

use super::error::ApiError;

/// JSON 请求体，解析失败时按 `ApiError` 返回 400 与 JSON 错误体
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
