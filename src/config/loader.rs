//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `PAYVOICE_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `PAYVOICE_SERVER__PORT=8080`
/// - `PAYVOICE_PROXY__API_KEY=secret`
/// - `PAYVOICE_PROXY__ALLOWED_ORIGINS=https://a.example,https://b.example`
/// - `PAYVOICE_CLIENT__PROXY_URL=http://proxy:8787`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8787)?
        .set_default("proxy.allowed_origins", "")?
        .set_default("proxy.api_key", "")?
        .set_default("upstream.url", "https://api.pearktrue.cn/api/alipay/")?
        .set_default("upstream.metadata_timeout_secs", 5)?
        .set_default("upstream.audio_timeout_secs", 10)?
        .set_default("client.proxy_url", "http://localhost:8787")?
        .set_default("client.timeout_secs", 30)?
        .set_default("client.history_db", "data/history.sled")?
        .set_default("client.audio_dir", "data/audio")?
        .set_default("client.download_dir", "downloads")?
        .set_default("log.level", "info")?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: PAYVOICE_PROXY__API_KEY=secret
    builder = builder.add_source(
        Environment::with_prefix("PAYVOICE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.upstream.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Upstream URL cannot be empty".to_string(),
        ));
    }

    if config.upstream.metadata_timeout_secs == 0 || config.upstream.audio_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Upstream timeouts must be greater than 0".to_string(),
        ));
    }

    if config.client.proxy_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Client proxy URL cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn mask(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<set>"
    }
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Allowed Origins: {:?}", config.proxy.allowed_origins);
    tracing::info!("API Key: {}", mask(&config.proxy.api_key));
    tracing::info!("Upstream URL: {}", config.upstream.url);
    tracing::info!(
        "Upstream Timeouts: metadata {}s, audio {}s",
        config.upstream.metadata_timeout_secs,
        config.upstream.audio_timeout_secs
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_timeout() {
        let mut config = AppConfig::default();
        config.upstream.audio_timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_upstream_url() {
        let mut config = AppConfig::default();
        config.upstream.url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9000

[proxy]
allowed_origins = "https://a.example"
api_key = "from-file"

[upstream]
metadata_timeout_secs = 3
"#
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.proxy.api_key, "from-file");
        assert_eq!(config.upstream.metadata_timeout_secs, 3);
        assert_eq!(config.upstream.audio_timeout_secs, 10);
    }

    #[test]
    fn test_mask_hides_secret() {
        assert_eq!(mask(""), "<unset>");
        assert_eq!(mask("secret"), "<set>");
    }
}
