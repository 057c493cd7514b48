//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（VoiceApi、ProxyClient、HistoryStore、AudioStorage）
//! - commands: 代理侧生成语音用例
//! - form: 客户端表单控制器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod form;
pub mod ports;

// Re-exports
pub use commands::{
    handlers::{GenerateVoiceHandler, VoiceOutcome, UPSTREAM_SUCCESS_CODE},
    GenerateVoice,
};

pub use error::ApplicationError;

pub use form::{DisplayResult, FormController, FormError};

pub use ports::{
    // Audio storage
    AudioStorageError,
    AudioStoragePort,
    // History store
    HistoryStoreError,
    HistoryStorePort,
    // Proxy client
    ProxyClientError,
    ProxyClientPort,
    ProxyReply,
    // Voice API
    AudioBody,
    AudioPayload,
    MetadataReply,
    VoiceApiError,
    VoiceApiPort,
    VoiceRequest,
};
