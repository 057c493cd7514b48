//! Payvoice - 收款语音校验代理
//!
//! 分层结构：
//! - Domain: payment/, history/
//! - Application: commands, form, ports
//! - Infrastructure: http, adapters, memory, persistence

use std::sync::Arc;

use payvoice::config::{load_config, print_config};
use payvoice::infrastructure::adapters::{HttpVoiceApiClient, HttpVoiceApiClientConfig};
use payvoice::infrastructure::http::{AppState, HttpServer, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},payvoice={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Payvoice - 收款语音校验代理");
    print_config(&config);

    if config.proxy.api_key.is_empty() {
        anyhow::bail!("proxy.api_key must be set (PAYVOICE_PROXY__API_KEY)");
    }
    if config.proxy.allowed_origins.trim().is_empty() {
        tracing::warn!("No allowed origins configured, browsers will be refused by CORS");
    }

    // 创建上游语音服务客户端
    let upstream_config = HttpVoiceApiClientConfig::new(&config.upstream.url).with_timeouts(
        config.upstream.metadata_timeout_secs,
        config.upstream.audio_timeout_secs,
    );
    let voice_api = Arc::new(HttpVoiceApiClient::new(upstream_config)?);

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(
        voice_api,
        config.proxy.cors_policy(),
        config.proxy.api_key.clone(),
    );

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
