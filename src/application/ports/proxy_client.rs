//! Proxy Client Port - 客户端调用代理的抽象

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ReturnFormat;

#[derive(Debug, Error)]
pub enum ProxyClientError {
    #[error("request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// 代理的原始响应
#[derive(Debug, Clone)]
pub struct ProxyReply {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl ProxyReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_audio(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("audio/"))
    }
}

#[async_trait]
pub trait ProxyClientPort: Send + Sync {
    /// GET /api/alipay-voice?number=..[&type=json]
    async fn request_voice(
        &self,
        number: &str,
        format: ReturnFormat,
    ) -> Result<ProxyReply, ProxyClientError>;
}
