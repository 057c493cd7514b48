//! Proxy Client Adapter - 客户端调用代理

mod http_proxy_client;

pub use http_proxy_client::*;
