//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_storage;
mod history_store;
mod proxy_client;
mod voice_api;

pub use audio_storage::{AudioStorageError, AudioStoragePort};
pub use history_store::{HistoryStoreError, HistoryStorePort};
pub use proxy_client::{ProxyClientError, ProxyClientPort, ProxyReply};
pub use voice_api::{
    AudioBody, AudioPayload, MetadataReply, VoiceApiError, VoiceApiPort, VoiceRequest,
};
