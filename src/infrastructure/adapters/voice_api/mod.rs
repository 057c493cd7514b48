//! Voice API Adapter - 上游收款语音服务客户端

mod http_voice_api_client;

pub use http_voice_api_client::*;
