//! Audio Storage Port - 出站端口
//!
//! 客户端把音频字节落到本地可寻址的位置，并支持另存为下载文件

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// 音频存储错误
#[derive(Debug, Error)]
pub enum AudioStorageError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Audio Storage Port - 出站端口
#[async_trait]
pub trait AudioStoragePort: Send + Sync {
    /// 保存音频数据，返回本地资源引用
    async fn materialize(
        &self,
        data: &[u8],
        content_type: Option<&str>,
    ) -> Result<String, AudioStorageError>;

    /// 把资源另存为下载目录下的 file_name
    async fn export(&self, audio_url: &str, file_name: &str) -> Result<PathBuf, AudioStorageError>;
}
