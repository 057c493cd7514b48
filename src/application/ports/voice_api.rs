//! Voice API Port - 上游收款语音服务抽象
//!
//! 两步调用：先取元数据（含 audiourl），再按需拉取音频

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use http::{HeaderMap, StatusCode};
use thiserror::Error;

use crate::domain::ReturnFormat;

/// 上游调用错误
#[derive(Debug, Error)]
pub enum VoiceApiError {
    #[error("request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 元数据请求
#[derive(Debug, Clone)]
pub struct VoiceRequest {
    /// 原样转发的金额字符串
    pub number: String,
    pub format: ReturnFormat,
}

/// 元数据响应
#[derive(Debug, Clone)]
pub struct MetadataReply {
    pub status: StatusCode,
    /// 响应体能解析为 JSON 时才有值
    pub body: Option<serde_json::Value>,
}

/// 音频字节流
pub type AudioBody = BoxStream<'static, Result<Vec<u8>, std::io::Error>>;

/// 音频响应，body 保持流式不落盘
pub struct AudioPayload {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: AudioBody,
}

impl std::fmt::Debug for AudioPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioPayload")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Voice API Port
///
/// 每次调用只尝试一次，超时由实现负责
#[async_trait]
pub trait VoiceApiPort: Send + Sync {
    /// 请求上游生成语音元数据
    async fn fetch_metadata(&self, request: VoiceRequest) -> Result<MetadataReply, VoiceApiError>;

    /// 拉取 audiourl 指向的音频
    async fn fetch_audio(&self, audio_url: &str) -> Result<AudioPayload, VoiceApiError>;
}
