//! CORS Resolution
//!
//! 按允许列表回显 Origin。每个请求最先计算，之后所有响应分支（包括失败兜底）
//! 都附带同一组头。

use axum::response::Response;
use http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use http::{HeaderMap, HeaderValue};

const ALLOW_METHODS: &str = "GET";
const ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// 允许的来源列表
#[derive(Debug, Clone, Default)]
pub struct CorsPolicy {
    origins: Vec<String>,
    allow_any: bool,
}

impl CorsPolicy {
    /// 解析逗号分隔的列表，`*` 表示允许任意来源
    pub fn from_allow_list(list: &str) -> Self {
        let origins: Vec<String> = list
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
        let allow_any = origins.iter().any(|o| o == "*");

        Self { origins, allow_any }
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        self.allow_any || self.origins.iter().any(|o| o == origin)
    }

    /// 计算响应头，不允许时 Allow-Origin 为空串
    pub fn resolve(&self, origin: Option<&HeaderValue>) -> CorsHeaders {
        let requested = origin.and_then(|v| v.to_str().ok()).unwrap_or("");

        let allow_origin = match origin {
            Some(value) if self.is_allowed(requested) => value.clone(),
            _ => HeaderValue::from_static(""),
        };

        CorsHeaders { allow_origin }
    }
}

/// 一次请求的 CORS 头
#[derive(Debug, Clone)]
pub struct CorsHeaders {
    allow_origin: HeaderValue,
}

impl CorsHeaders {
    pub fn allow_origin(&self) -> &HeaderValue {
        &self.allow_origin
    }

    /// 写入（覆盖）到已有的头集合
    pub fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        );
    }

    pub fn apply_to(&self, mut response: Response) -> Response {
        self.apply(response.headers_mut());
        response
    }
}
