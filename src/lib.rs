//! PayVoice - 收款语音生成代理
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Payment Context: 金额解析、范围校验、显示格式化
//! - History Context: 客户端最近生成记录
//!
//! 应用层 (application/):
//! - Ports: VoiceApi, ProxyClient, HistoryStore, AudioStorage
//! - Commands: GenerateVoice（代理侧校验 → 上游 → 响应整形）
//! - Form: 客户端表单控制器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: 校验代理（CORS、鉴权、转发）
//! - Adapters: 上游客户端、代理客户端、本地音频文件
//! - Persistence / Memory: 历史记录存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
