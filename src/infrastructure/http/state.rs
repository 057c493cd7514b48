//! Application State
//!
//! 每个请求只读共享，不保存请求间状态

use std::sync::Arc;

use crate::application::{GenerateVoiceHandler, VoiceApiPort};
use crate::infrastructure::http::cors::CorsPolicy;

/// 应用状态
pub struct AppState {
    pub generate_voice_handler: GenerateVoiceHandler,
    pub cors: CorsPolicy,
    /// 调用方必须携带的 Bearer 密钥
    pub api_key: String,
}

impl AppState {
    /// 创建应用状态
    pub fn new(voice_api: Arc<dyn VoiceApiPort>, cors: CorsPolicy, api_key: impl Into<String>) -> Self {
        Self {
            generate_voice_handler: GenerateVoiceHandler::new(voice_api),
            cors,
            api_key: api_key.into(),
        }
    }
}
