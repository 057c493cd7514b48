//! HTTP Routes
//!
//! API Endpoints:
//! - /api/alipay-voice*     GET      生成收款语音（音频或 JSON）
//! - /api/alipay-voice*     OPTIONS  CORS 预检
//!
//! 按前缀匹配，其余路径一律 404，无响应体

use axum::Router;
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 代理接口路径
pub const API_PATH: &str = "/api/alipay-voice";

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().fallback(handlers::dispatch)
}
