//! HTTP Proxy Client - 客户端调用本服务的代理接口
//!
//! 实现 ProxyClientPort trait

use async_trait::async_trait;
use http::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

use crate::application::ports::{ProxyClientError, ProxyClientPort, ProxyReply};
use crate::domain::ReturnFormat;
use crate::infrastructure::adapters::deadline::with_deadline;
use crate::infrastructure::http::routes::API_PATH;

/// 代理客户端配置
#[derive(Debug, Clone)]
pub struct HttpProxyClientConfig {
    /// 代理服务基础 URL
    pub base_url: String,
    /// Bearer 密钥
    pub api_key: Option<String>,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpProxyClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8787".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl HttpProxyClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP 代理客户端
pub struct HttpProxyClient {
    client: Client,
    config: HttpProxyClientConfig,
}

impl HttpProxyClient {
    pub fn new(config: HttpProxyClientConfig) -> Result<Self, ProxyClientError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ProxyClientError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 代理接口 URL
    fn voice_url(&self) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), API_PATH)
    }
}

#[async_trait]
impl ProxyClientPort for HttpProxyClient {
    async fn request_voice(
        &self,
        number: &str,
        format: ReturnFormat,
    ) -> Result<ProxyReply, ProxyClientError> {
        let mut query = vec![("number", number)];
        if let Some(kind) = format.query_value() {
            query.push(("type", kind));
        }

        let mut request = self.client.get(self.voice_url()).query(&query);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        tracing::debug!(url = %self.voice_url(), number = %number, format = %format, "Requesting voice");

        let timeout = Duration::from_secs(self.config.timeout_secs);
        with_deadline(timeout, async move {
            let response = request.send().await.map_err(|e| {
                if e.is_timeout() {
                    ProxyClientError::Timeout
                } else {
                    ProxyClientError::NetworkError(e.to_string())
                }
            })?;

            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let body = response
                .bytes()
                .await
                .map_err(|e| ProxyClientError::NetworkError(e.to_string()))?
                .to_vec();

            Ok::<_, ProxyClientError>(ProxyReply {
                status,
                content_type,
                body,
            })
        })
        .await
    }
}
