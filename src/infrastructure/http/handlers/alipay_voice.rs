//! Alipay Voice Handler
//!
//! GET /api/alipay-voice?number=<decimal>[&type=json]
//!
//! 处理顺序: CORS → OPTIONS 预检 → 鉴权 → 参数校验 → 上游调用 → 响应整形。
//! CORS 头在任何分支之前算好，失败兜底同样附带。

use axum::{
    body::Body,
    extract::{Query, State},
    http::{
        header::{AUTHORIZATION, ORIGIN},
        HeaderMap, Method, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::application::{AudioPayload, GenerateVoice, VoiceOutcome};
use crate::domain::ReturnFormat;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::routes::API_PATH;
use crate::infrastructure::http::state::AppState;

/// 转发音频时丢弃的逐跳头
const HOP_BY_HOP_HEADERS: &[&str] = &["connection", "keep-alive", "transfer-encoding"];

/// 查询参数，重复出现时取第一个值
#[derive(Debug, Default, PartialEq)]
pub struct VoiceQuery {
    pub number: Option<String>,
    pub kind: Option<String>,
}

impl VoiceQuery {
    pub fn from_uri(uri: &Uri) -> Result<Self, ApiError> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri)
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "number" if query.number.is_none() => query.number = Some(value),
                "type" if query.kind.is_none() => query.kind = Some(value),
                _ => {}
            }
        }
        Ok(query)
    }
}

/// 唯一入口：路径以 API 前缀开头才交给代理处理，其余 404 无响应体
pub async fn dispatch(
    state: State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    if !uri.path().starts_with(API_PATH) {
        return StatusCode::NOT_FOUND.into_response();
    }

    alipay_voice(state, method, uri, headers).await
}

pub async fn alipay_voice(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let cors = state.cors.resolve(headers.get(ORIGIN));

    if method == Method::OPTIONS {
        return cors.apply_to(StatusCode::OK.into_response());
    }

    let client_ip = client_ip(&headers);
    tracing::info!(client_ip = %client_ip, uri = %uri, "API request");

    let response = match generate(&state, &uri, &headers).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    };

    cors.apply_to(response)
}

async fn generate(state: &AppState, uri: &Uri, headers: &HeaderMap) -> Result<Response, ApiError> {
    authorize(headers, &state.api_key)?;

    let query = VoiceQuery::from_uri(uri)?;

    let command = GenerateVoice {
        number: query.number,
        format: ReturnFormat::from_query(query.kind.as_deref()),
    };

    let response = match state.generate_voice_handler.handle(command).await? {
        VoiceOutcome::Json { status, body } => (status, Json(body)).into_response(),
        VoiceOutcome::Audio(payload) => audio_response(payload),
    };

    Ok(response)
}

/// 要求 `Authorization: Bearer <api_key>`
fn authorize(headers: &HeaderMap, api_key: &str) -> Result<(), ApiError> {
    let expected = format!("Bearer {}", api_key);
    let provided = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());

    match provided {
        Some(value) if value == expected => Ok(()),
        _ => Err(ApiError::Unauthorized),
    }
}

fn client_ip(headers: &HeaderMap) -> String {
    ["cf-connecting-ip", "x-forwarded-for"]
        .iter()
        .find_map(|name| headers.get(*name).and_then(|v| v.to_str().ok()))
        .unwrap_or("unknown")
        .to_string()
}

/// 原样转发音频流和上游头
fn audio_response(payload: AudioPayload) -> Response {
    let mut headers = payload.headers;
    for name in HOP_BY_HOP_HEADERS {
        headers.remove(*name);
    }

    let mut response = Response::new(Body::from_stream(payload.body));
    *response.status_mut() = payload.status;
    *response.headers_mut() = headers;
    response
}
