//! HTTP Error Handling
//!
//! 所有失败都以 `{code, msg}` JSON 返回，code 与 HTTP 状态码一致

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::{ApplicationError, VoiceApiError};

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub msg: String,
    /// 仅内部错误携带底层错误信息
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: u16, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            error: None,
        }
    }
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized,
    AudioNotFound,
    AudioFetchFailed(StatusCode),
    Timeout,
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::AudioNotFound => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::AudioFetchFailed(status) => *status,
            ApiError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = status.as_u16();

        let response = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(code, error = %msg, "Bad request");
                ErrorResponse::new(code, msg)
            }
            ApiError::Unauthorized => {
                tracing::warn!(code, "Authentication failed");
                ErrorResponse::new(code, "authentication failed")
            }
            ApiError::AudioNotFound => {
                tracing::warn!(code, "Upstream returned no audio url");
                ErrorResponse::new(code, "audio file not found")
            }
            ApiError::AudioFetchFailed(_) => {
                tracing::error!(code, "Audio file fetch failed");
                ErrorResponse::new(code, "audio file fetch failed")
            }
            ApiError::Timeout => {
                tracing::error!(code, "Upstream request timed out");
                ErrorResponse::new(code, "request timed out")
            }
            ApiError::Internal(msg) => {
                tracing::error!(code, error = %msg, "Internal server error");
                ErrorResponse {
                    code,
                    msg: "internal server error".to_string(),
                    error: Some(msg),
                }
            }
        };

        (status, Json(response)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::InvalidAmount(err) => ApiError::BadRequest(err.to_string()),
            ApplicationError::AudioNotFound => ApiError::AudioNotFound,
            ApplicationError::AudioFetchFailed(status) => ApiError::AudioFetchFailed(status),
            ApplicationError::Upstream(VoiceApiError::Timeout) => ApiError::Timeout,
            other => ApiError::Internal(other.to_string()),
        }
    }
}
