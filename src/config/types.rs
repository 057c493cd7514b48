//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::infrastructure::http::CorsPolicy;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 代理鉴权与 CORS
    #[serde(default)]
    pub proxy: ProxyConfig,

    /// 上游语音服务
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// 命令行客户端
    #[serde(default)]
    pub client: ClientConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8787
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 代理配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProxyConfig {
    /// 允许的来源，逗号分隔，`*` 表示任意
    #[serde(default)]
    pub allowed_origins: String,

    /// 共享密钥
    #[serde(default)]
    pub api_key: String,
}

impl ProxyConfig {
    pub fn cors_policy(&self) -> CorsPolicy {
        CorsPolicy::from_allow_list(&self.allowed_origins)
    }
}

/// 上游语音服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// 元数据接口 URL
    #[serde(default = "default_upstream_url")]
    pub url: String,

    /// 元数据请求超时（秒）
    #[serde(default = "default_metadata_timeout")]
    pub metadata_timeout_secs: u64,

    /// 音频拉取超时（秒）
    #[serde(default = "default_audio_timeout")]
    pub audio_timeout_secs: u64,
}

fn default_upstream_url() -> String {
    "https://api.pearktrue.cn/api/alipay/".to_string()
}

fn default_metadata_timeout() -> u64 {
    5
}

fn default_audio_timeout() -> u64 {
    10
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: default_upstream_url(),
            metadata_timeout_secs: default_metadata_timeout(),
            audio_timeout_secs: default_audio_timeout(),
        }
    }
}

/// 命令行客户端配置
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// 代理服务地址
    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,

    /// 调用代理使用的密钥
    #[serde(default)]
    pub api_key: Option<String>,

    /// 请求超时（秒）
    #[serde(default = "default_client_timeout")]
    pub timeout_secs: u64,

    /// 历史记录数据库路径
    #[serde(default = "default_history_db")]
    pub history_db: PathBuf,

    /// 生成音频存放目录
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,

    /// 下载另存目录
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
}

fn default_proxy_url() -> String {
    "http://localhost:8787".to_string()
}

fn default_client_timeout() -> u64 {
    30
}

fn default_history_db() -> PathBuf {
    PathBuf::from("data/history.sled")
}

fn default_audio_dir() -> PathBuf {
    PathBuf::from("data/audio")
}

fn default_download_dir() -> PathBuf {
    PathBuf::from("downloads")
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            proxy_url: default_proxy_url(),
            api_key: None,
            timeout_secs: default_client_timeout(),
            history_db: default_history_db(),
            audio_dir: default_audio_dir(),
            download_dir: default_download_dir(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
