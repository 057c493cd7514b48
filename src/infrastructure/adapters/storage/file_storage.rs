//! File Storage - 文件系统音频存储实现
//!
//! 实现 AudioStoragePort trait

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::{AudioStorageError, AudioStoragePort};

/// 由 content-type 推断扩展名，未知时按 mp3 处理
fn extension_for(content_type: Option<&str>) -> &'static str {
    let mime = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_lowercase());

    match mime.as_deref() {
        Some("audio/wav") | Some("audio/x-wav") | Some("audio/wave") => "wav",
        Some("audio/ogg") => "ogg",
        Some("audio/flac") => "flac",
        Some("audio/aac") => "aac",
        _ => "mp3",
    }
}

/// 文件系统音频存储
pub struct FileAudioStorage {
    /// 生成的音频存放目录
    base_dir: PathBuf,
    /// 下载另存目录
    download_dir: PathBuf,
}

impl FileAudioStorage {
    /// 创建新的文件存储
    pub async fn new(
        base_dir: impl AsRef<Path>,
        download_dir: impl AsRef<Path>,
    ) -> Result<Self, AudioStorageError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let download_dir = download_dir.as_ref().to_path_buf();

        // 确保目录存在
        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        Ok(Self {
            base_dir,
            download_dir,
        })
    }

    /// 获取存储根目录
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

#[async_trait]
impl AudioStoragePort for FileAudioStorage {
    async fn materialize(
        &self,
        data: &[u8],
        content_type: Option<&str>,
    ) -> Result<String, AudioStorageError> {
        let audio_path = self
            .base_dir
            .join(format!("{}.{}", Uuid::new_v4(), extension_for(content_type)));

        fs::write(&audio_path, data)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        tracing::debug!(
            path = %audio_path.display(),
            size = data.len(),
            "Saved audio"
        );

        Ok(audio_path.to_string_lossy().to_string())
    }

    async fn export(&self, audio_url: &str, file_name: &str) -> Result<PathBuf, AudioStorageError> {
        let source = Path::new(audio_url);
        if !source.exists() {
            return Err(AudioStorageError::FileNotFound(audio_url.to_string()));
        }

        fs::create_dir_all(&self.download_dir)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        let target = self.download_dir.join(file_name);
        fs::copy(source, &target)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        tracing::info!(target = %target.display(), "Audio downloaded");

        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_materialize_and_export() {
        let temp_dir = tempdir().unwrap();
        let storage = FileAudioStorage::new(
            temp_dir.path().join("audio"),
            temp_dir.path().join("downloads"),
        )
        .await
        .unwrap();

        let data = b"fake mp3 data";

        let audio_url = storage.materialize(data, Some("audio/mpeg")).await.unwrap();
        assert!(audio_url.ends_with(".mp3"));
        assert!(Path::new(&audio_url).starts_with(storage.base_dir()));

        let exported = storage.export(&audio_url, "alipay_voice_1.mp3").await.unwrap();
        assert_eq!(exported, temp_dir.path().join("downloads/alipay_voice_1.mp3"));
        assert_eq!(std::fs::read(exported).unwrap(), data);
    }

    #[tokio::test]
    async fn test_export_missing_file() {
        let temp_dir = tempdir().unwrap();
        let storage = FileAudioStorage::new(temp_dir.path(), temp_dir.path())
            .await
            .unwrap();

        let result = storage.export("/nonexistent/a.mp3", "a.mp3").await;
        assert!(matches!(result, Err(AudioStorageError::FileNotFound(_))));
    }

    #[test]
    fn test_extension_for() {
        assert_eq!(extension_for(Some("audio/wav")), "wav");
        assert_eq!(extension_for(Some("audio/ogg; codecs=opus")), "ogg");
        assert_eq!(extension_for(Some("audio/mpeg")), "mp3");
        assert_eq!(extension_for(None), "mp3");
    }
}
