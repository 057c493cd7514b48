//! 应用层错误定义
//!
//! 代理用例的统一错误类型

use http::StatusCode;
use thiserror::Error;

use crate::application::ports::{AudioStorageError, HistoryStoreError, VoiceApiError};
use crate::domain::AmountError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 金额校验失败
    #[error(transparent)]
    InvalidAmount(#[from] AmountError),

    /// 上游成功但没有给出 audiourl
    #[error("audio file not found")]
    AudioNotFound,

    /// 拉取音频返回非成功状态
    #[error("audio file fetch failed ({0})")]
    AudioFetchFailed(StatusCode),

    /// 上游调用失败（超时、网络、响应格式）
    #[error(transparent)]
    Upstream(#[from] VoiceApiError),

    /// 本地音频存储错误
    #[error("Storage error: {0}")]
    StorageError(#[from] AudioStorageError),

    /// 历史记录存储错误
    #[error("History error: {0}")]
    HistoryError(#[from] HistoryStoreError),
}

impl ApplicationError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Upstream(VoiceApiError::Timeout))
    }
}
