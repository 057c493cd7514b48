//! HTTP Voice API Client - 调用上游收款语音服务
//!
//! 实现 VoiceApiPort trait
//!
//! 上游 API:
//! GET https://api.pearktrue.cn/api/alipay/?number=...[&type=json]
//! Response: {"code": 200, "msg": "...", "audiourl": "https://..."}
//! 音频由 audiourl 另行拉取

use async_trait::async_trait;
use futures_util::StreamExt;
use http::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

use crate::infrastructure::adapters::deadline::with_deadline;
use crate::application::ports::{
    AudioPayload, MetadataReply, VoiceApiError, VoiceApiPort, VoiceRequest,
};

/// 上游客户端配置
#[derive(Debug, Clone)]
pub struct HttpVoiceApiClientConfig {
    /// 上游元数据接口 URL
    pub url: String,
    /// 元数据请求超时（秒）
    pub metadata_timeout_secs: u64,
    /// 音频拉取超时（秒）
    pub audio_timeout_secs: u64,
}

impl Default for HttpVoiceApiClientConfig {
    fn default() -> Self {
        Self {
            url: "https://api.pearktrue.cn/api/alipay/".to_string(),
            metadata_timeout_secs: 5,
            audio_timeout_secs: 10,
        }
    }
}

impl HttpVoiceApiClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeouts(mut self, metadata_secs: u64, audio_secs: u64) -> Self {
        self.metadata_timeout_secs = metadata_secs;
        self.audio_timeout_secs = audio_secs;
        self
    }

    fn metadata_timeout(&self) -> Duration {
        Duration::from_secs(self.metadata_timeout_secs)
    }

    fn audio_timeout(&self) -> Duration {
        Duration::from_secs(self.audio_timeout_secs)
    }
}

/// HTTP 上游客户端
///
/// 不重试，每次调用只发一次请求
pub struct HttpVoiceApiClient {
    client: Client,
    config: HttpVoiceApiClientConfig,
}

impl HttpVoiceApiClient {
    /// 创建新的上游客户端
    pub fn new(config: HttpVoiceApiClientConfig) -> Result<Self, VoiceApiError> {
        let client = Client::builder()
            .build()
            .map_err(|e| VoiceApiError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> VoiceApiError {
    if e.is_timeout() {
        VoiceApiError::Timeout
    } else if e.is_connect() {
        VoiceApiError::NetworkError(format!("Cannot connect to voice API: {}", e))
    } else {
        VoiceApiError::NetworkError(e.to_string())
    }
}

#[async_trait]
impl VoiceApiPort for HttpVoiceApiClient {
    async fn fetch_metadata(&self, request: VoiceRequest) -> Result<MetadataReply, VoiceApiError> {
        let mut query = vec![("number", request.number.as_str())];
        if let Some(kind) = request.format.query_value() {
            query.push(("type", kind));
        }

        tracing::debug!(
            url = %self.config.url,
            number = %request.number,
            format = %request.format,
            "Sending voice metadata request"
        );

        let http_request = self
            .client
            .get(&self.config.url)
            .query(&query)
            .header(CONTENT_TYPE, "application/json")
            .timeout(self.config.metadata_timeout());

        with_deadline(self.config.metadata_timeout(), async move {
            let response = http_request.send().await.map_err(map_reqwest_error)?;
            let status = response.status();
            let bytes = response.bytes().await.map_err(map_reqwest_error)?;
            let body: Option<serde_json::Value> = serde_json::from_slice(&bytes).ok();

            tracing::info!(
                status = %status,
                size = bytes.len(),
                json = body.is_some(),
                "Voice metadata received"
            );

            Ok::<_, VoiceApiError>(MetadataReply { status, body })
        })
        .await
    }

    async fn fetch_audio(&self, audio_url: &str) -> Result<AudioPayload, VoiceApiError> {
        // 请求级 timeout 同时约束后续的流式读取
        let http_request = self
            .client
            .get(audio_url)
            .timeout(self.config.audio_timeout());

        let response = with_deadline(self.config.audio_timeout(), async move {
            http_request.send().await.map_err(map_reqwest_error)
        })
        .await?;

        let status = response.status();
        let headers = response.headers().clone();

        tracing::info!(
            status = %status,
            content_type = ?headers.get(CONTENT_TYPE),
            "Audio response received"
        );

        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map(|b| b.to_vec()).map_err(std::io::Error::other))
            .boxed();

        Ok(AudioPayload {
            status,
            headers,
            body,
        })
    }
}
