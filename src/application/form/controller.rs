//! Form Controller - 客户端表单状态机
//!
//! 输入金额 → 本地校验 → 调用代理 → 展示结果并维护历史记录。
//! 提交期间 loading 为 true，界面据此禁用输入与提交按钮。

use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    AudioStoragePort, HistoryStorePort, ProxyClientError, ProxyClientPort, ProxyReply,
};
use crate::domain::{format_display, Amount, AmountError, HistoryList, HistoryRecord, ReturnFormat};

/// 提交失败，Display 即展示给用户的文案
#[derive(Debug, Error)]
pub enum FormError {
    #[error("{0}")]
    InvalidAmount(#[from] AmountError),

    /// 代理返回的 msg，或兜底文案
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Request(#[from] ProxyClientError),

    #[error("invalid JSON response: {0}")]
    InvalidJson(String),

    #[error("{0}")]
    Application(#[from] ApplicationError),
}

/// 当前展示的结果
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayResult {
    /// 可播放的本地音频
    Audio { audio_url: String, number: String },
    /// 以键值表展示的 JSON
    Json(Value),
}

impl DisplayResult {
    /// JSON 结果的键值行
    pub fn table_rows(&self) -> Vec<(String, String)> {
        match self {
            DisplayResult::Json(Value::Object(map)) => map
                .iter()
                .map(|(k, v)| {
                    let value = match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    (k.clone(), value)
                })
                .collect(),
            DisplayResult::Json(other) => vec![(String::new(), other.to_string())],
            DisplayResult::Audio { .. } => Vec::new(),
        }
    }
}

pub struct FormController {
    proxy: Arc<dyn ProxyClientPort>,
    history_store: Arc<dyn HistoryStorePort>,
    audio_storage: Arc<dyn AudioStoragePort>,
    amount: String,
    formatted_amount: String,
    return_format: ReturnFormat,
    result: Option<DisplayResult>,
    loading: bool,
    error: Option<String>,
    history: HistoryList,
}

impl FormController {
    /// 创建控制器并加载持久化的历史记录
    ///
    /// 历史记录读取失败不影响使用，只记录日志
    pub async fn mount(
        proxy: Arc<dyn ProxyClientPort>,
        history_store: Arc<dyn HistoryStorePort>,
        audio_storage: Arc<dyn AudioStoragePort>,
    ) -> Self {
        let history = match history_store.load().await {
            Ok(records) => HistoryList::from_records(records),
            Err(e) => {
                tracing::error!(error = %e, "Error loading history");
                HistoryList::new()
            }
        };

        Self {
            proxy,
            history_store,
            audio_storage,
            amount: String::new(),
            formatted_amount: String::new(),
            return_format: ReturnFormat::default(),
            result: None,
            loading: false,
            error: None,
            history,
        }
    }

    /// 更新原始输入，并派生显示用的格式化字符串
    pub fn update_amount(&mut self, raw: impl Into<String>) {
        self.amount = raw.into();
        self.formatted_amount = format_display(&self.amount);
    }

    pub fn set_return_format(&mut self, format: ReturnFormat) {
        self.return_format = format;
    }

    /// 提交按钮是否可用
    pub fn can_submit(&self) -> bool {
        !self.loading && !self.amount.is_empty()
    }

    /// 提交一次生成请求
    ///
    /// 结果写入 `result()`，失败写入 `error()`；两者在提交开始时清空。
    pub async fn submit(&mut self, amount: &str, format: ReturnFormat) {
        if self.loading {
            return;
        }

        self.loading = true;
        self.error = None;
        self.result = None;
        self.return_format = format;

        match self.run_submission(amount, format).await {
            Ok(result) => self.result = Some(result),
            Err(e) => {
                tracing::warn!(error = %e, "Voice generation failed");
                self.error = Some(e.to_string());
            }
        }

        self.loading = false;
    }

    async fn run_submission(
        &mut self,
        amount: &str,
        format: ReturnFormat,
    ) -> Result<DisplayResult, FormError> {
        let amount = Amount::from_input(amount).map_err(|_| AmountError::OutOfRange)?;

        let reply = self.proxy.request_voice(amount.as_str(), format).await?;

        match format {
            ReturnFormat::Json => {
                let body: Value = serde_json::from_slice(&reply.body)
                    .map_err(|e| FormError::InvalidJson(e.to_string()))?;
                if !reply.is_success() {
                    return Err(FormError::Rejected(message_or(&body, "request failed")));
                }
                Ok(DisplayResult::Json(body))
            }
            ReturnFormat::Audio => {
                if !(reply.is_success() && reply.is_audio()) {
                    return Err(FormError::Rejected(audio_error_message(&reply)));
                }

                let audio_url = self
                    .audio_storage
                    .materialize(&reply.body, reply.content_type.as_deref())
                    .await
                    .map_err(ApplicationError::from)?;

                let record = HistoryRecord::new(amount.as_str(), audio_url.clone());
                self.history.push_front(record);
                self.persist_history().await;

                Ok(DisplayResult::Audio {
                    audio_url,
                    number: amount.as_str().to_string(),
                })
            }
        }
    }

    async fn persist_history(&self) {
        if let Err(e) = self.history_store.save(self.history.records()).await {
            tracing::error!(error = %e, "Error saving history");
        }
    }

    /// 另存当前音频结果，没有音频结果时返回 None
    pub async fn download_current_result(&self) -> Result<Option<PathBuf>, ApplicationError> {
        let Some(DisplayResult::Audio { audio_url, number }) = &self.result else {
            return Ok(None);
        };

        let file_name = format!("alipay_voice_{}.mp3", number);
        let path = self.audio_storage.export(audio_url, &file_name).await?;
        Ok(Some(path))
    }

    /// 另存一条历史记录
    pub async fn download_history_record(
        &self,
        record: &HistoryRecord,
    ) -> Result<PathBuf, ApplicationError> {
        let path = self
            .audio_storage
            .export(&record.audio_url, &record.download_file_name())
            .await?;
        Ok(path)
    }

    /// 重新展示历史记录，不发起网络请求
    pub fn replay(&mut self, record: &HistoryRecord) {
        self.return_format = ReturnFormat::Audio;
        self.error = None;
        self.result = Some(DisplayResult::Audio {
            audio_url: record.audio_url.clone(),
            number: record.amount.clone(),
        });
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn formatted_amount(&self) -> &str {
        &self.formatted_amount
    }

    pub fn return_format(&self) -> ReturnFormat {
        self.return_format
    }

    pub fn result(&self) -> Option<&DisplayResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn history(&self) -> &[HistoryRecord] {
        self.history.records()
    }

    pub fn find_history(&self, id: &str) -> Option<&HistoryRecord> {
        self.history.find(id)
    }
}

fn message_or(body: &Value, fallback: &str) -> String {
    body.get("msg")
        .and_then(Value::as_str)
        .filter(|msg| !msg.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

fn audio_error_message(reply: &ProxyReply) -> String {
    match serde_json::from_slice::<Value>(&reply.body) {
        Ok(body) => message_or(&body, "audio generation failed"),
        Err(_) => "audio generation failed".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{AudioStorageError, HistoryStoreError};
    use crate::domain::history::MAX_HISTORY;
    use crate::infrastructure::adapters::FileAudioStorage;
    use crate::infrastructure::memory::InMemoryHistoryStore;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tempfile::tempdir;

    /// 按顺序返回预设响应的代理
    struct ScriptedProxy {
        replies: Mutex<Vec<Result<ProxyReply, ProxyClientError>>>,
        calls: Mutex<Vec<(String, ReturnFormat)>>,
    }

    impl ScriptedProxy {
        fn new(replies: Vec<Result<ProxyReply, ProxyClientError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(String, ReturnFormat)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProxyClientPort for ScriptedProxy {
        async fn request_voice(
            &self,
            number: &str,
            format: ReturnFormat,
        ) -> Result<ProxyReply, ProxyClientError> {
            self.calls.lock().unwrap().push((number.to_string(), format));
            self.replies.lock().unwrap().remove(0)
        }
    }

    struct FailingHistoryStore;

    #[async_trait]
    impl HistoryStorePort for FailingHistoryStore {
        async fn load(&self) -> Result<Vec<HistoryRecord>, HistoryStoreError> {
            Err(HistoryStoreError::SerializationError("corrupt".to_string()))
        }

        async fn save(&self, _records: &[HistoryRecord]) -> Result<(), HistoryStoreError> {
            Err(HistoryStoreError::DatabaseError("read-only".to_string()))
        }
    }

    fn audio_reply() -> Result<ProxyReply, ProxyClientError> {
        Ok(ProxyReply {
            status: 200,
            content_type: Some("audio/mpeg".to_string()),
            body: b"ID3-audio".to_vec(),
        })
    }

    fn json_reply(status: u16, body: &str) -> Result<ProxyReply, ProxyClientError> {
        Ok(ProxyReply {
            status,
            content_type: Some("application/json".to_string()),
            body: body.as_bytes().to_vec(),
        })
    }

    async fn controller(
        proxy: Arc<ScriptedProxy>,
        store: Arc<dyn HistoryStorePort>,
        dir: &std::path::Path,
    ) -> FormController {
        let storage = FileAudioStorage::new(dir.join("audio"), dir.join("downloads"))
            .await
            .unwrap();
        FormController::mount(proxy, store, Arc::new(storage)).await
    }

    #[tokio::test]
    async fn test_update_amount_keeps_raw_value() {
        let dir = tempdir().unwrap();
        let mut form = controller(
            ScriptedProxy::new(vec![]),
            Arc::new(InMemoryHistoryStore::new()),
            dir.path(),
        )
        .await;

        form.update_amount("1234567.5");
        assert_eq!(form.amount(), "1234567.5");
        assert_eq!(form.formatted_amount(), "1,234,567.5");
        assert!(form.can_submit());

        form.update_amount("");
        assert_eq!(form.formatted_amount(), "");
        assert!(!form.can_submit());
    }

    #[tokio::test]
    async fn test_invalid_amount_fails_locally() {
        let dir = tempdir().unwrap();
        let proxy = ScriptedProxy::new(vec![]);
        let mut form = controller(
            proxy.clone(),
            Arc::new(InMemoryHistoryStore::new()),
            dir.path(),
        )
        .await;

        for input in ["abc", "0", "100,000,000,000"] {
            form.submit(input, ReturnFormat::Audio).await;
            assert_eq!(form.error(), Some("amount must be between 0 and 100 billion"));
            assert!(form.result().is_none());
            assert!(!form.is_loading());
        }
        assert!(proxy.calls().is_empty());
    }

    #[tokio::test]
    async fn test_json_submission_shows_table() {
        let dir = tempdir().unwrap();
        let proxy = ScriptedProxy::new(vec![json_reply(
            200,
            r#"{"code":200,"msg":"ok","audiourl":"https://cdn.example/a.mp3"}"#,
        )]);
        let store = Arc::new(InMemoryHistoryStore::new());
        let mut form = controller(proxy.clone(), store.clone(), dir.path()).await;

        form.submit("1,000", ReturnFormat::Json).await;

        assert_eq!(proxy.calls(), vec![("1000".to_string(), ReturnFormat::Json)]);
        assert!(form.error().is_none());
        let rows = form.result().unwrap().table_rows();
        assert!(rows.contains(&("code".to_string(), "200".to_string())));
        assert!(rows.contains(&("msg".to_string(), "ok".to_string())));
        // JSON 结果不进历史
        assert!(form.history().is_empty());
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_json_error_uses_message() {
        let dir = tempdir().unwrap();
        let proxy = ScriptedProxy::new(vec![
            json_reply(401, r#"{"code":401,"msg":"authentication failed"}"#),
            json_reply(500, r#"{"code":500}"#),
        ]);
        let mut form = controller(proxy, Arc::new(InMemoryHistoryStore::new()), dir.path()).await;

        form.submit("10", ReturnFormat::Json).await;
        assert_eq!(form.error(), Some("authentication failed"));

        form.submit("10", ReturnFormat::Json).await;
        assert_eq!(form.error(), Some("request failed"));
        assert!(form.result().is_none());
    }

    #[tokio::test]
    async fn test_audio_submission_records_history() {
        let dir = tempdir().unwrap();
        let proxy = ScriptedProxy::new(vec![audio_reply()]);
        let store = Arc::new(InMemoryHistoryStore::new());
        let mut form = controller(proxy, store.clone(), dir.path()).await;

        form.submit("88.88", ReturnFormat::Audio).await;

        let Some(DisplayResult::Audio { audio_url, number }) = form.result().cloned() else {
            panic!("expected audio result, error: {:?}", form.error());
        };
        assert_eq!(number, "88.88");
        assert_eq!(std::fs::read(&audio_url).unwrap(), b"ID3-audio");

        let stored = store.load().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].amount, "88.88");
        assert_eq!(stored[0].audio_url, audio_url);
    }

    #[tokio::test]
    async fn test_audio_wrong_content_type_is_error() {
        let dir = tempdir().unwrap();
        let proxy = ScriptedProxy::new(vec![
            json_reply(200, r#"{"code":201,"msg":"service busy"}"#),
            json_reply(504, r#"{"code":504,"msg":"request timed out"}"#),
            Ok(ProxyReply {
                status: 500,
                content_type: Some("text/plain".to_string()),
                body: b"oops".to_vec(),
            }),
        ]);
        let store = Arc::new(InMemoryHistoryStore::new());
        let mut form = controller(proxy, store.clone(), dir.path()).await;

        form.submit("1", ReturnFormat::Audio).await;
        assert_eq!(form.error(), Some("service busy"));

        form.submit("1", ReturnFormat::Audio).await;
        assert_eq!(form.error(), Some("request timed out"));

        form.submit("1", ReturnFormat::Audio).await;
        assert_eq!(form.error(), Some("audio generation failed"));

        assert!(form.result().is_none());
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_surfaces_message() {
        let dir = tempdir().unwrap();
        let proxy = ScriptedProxy::new(vec![Err(ProxyClientError::Timeout)]);
        let mut form = controller(proxy, Arc::new(InMemoryHistoryStore::new()), dir.path()).await;

        form.submit("1", ReturnFormat::Audio).await;
        assert_eq!(form.error(), Some("request timed out"));
    }

    #[tokio::test]
    async fn test_history_capped_at_ten_newest_first() {
        let dir = tempdir().unwrap();
        let replies = (0..11).map(|_| audio_reply()).collect();
        let proxy = ScriptedProxy::new(replies);
        let store = Arc::new(InMemoryHistoryStore::new());
        let mut form = controller(proxy, store.clone(), dir.path()).await;

        for i in 1..=11 {
            form.submit(&i.to_string(), ReturnFormat::Audio).await;
            assert!(form.error().is_none());
        }

        let stored = store.load().await.unwrap();
        assert_eq!(stored.len(), MAX_HISTORY);
        assert_eq!(stored[0].amount, "11");
        assert_eq!(stored[9].amount, "2");
        assert_eq!(form.history(), stored.as_slice());
    }

    #[tokio::test]
    async fn test_mount_restores_history() {
        let dir = tempdir().unwrap();
        let store = Arc::new(InMemoryHistoryStore::new());
        let record = HistoryRecord::new("5", "data/audio/5.mp3");
        store.save(&[record.clone()]).await.unwrap();

        let form = controller(ScriptedProxy::new(vec![]), store, dir.path()).await;
        assert_eq!(form.history(), &[record]);
    }

    #[tokio::test]
    async fn test_history_store_failures_are_not_fatal() {
        let dir = tempdir().unwrap();
        let proxy = ScriptedProxy::new(vec![audio_reply()]);
        let mut form = controller(proxy, Arc::new(FailingHistoryStore), dir.path()).await;
        assert!(form.history().is_empty());

        form.submit("3", ReturnFormat::Audio).await;
        assert!(form.error().is_none());
        assert_eq!(form.history().len(), 1);
    }

    #[tokio::test]
    async fn test_replay_and_download() {
        let dir = tempdir().unwrap();
        let proxy = ScriptedProxy::new(vec![audio_reply(), json_reply(200, r#"{"code":200}"#)]);
        let mut form = controller(proxy, Arc::new(InMemoryHistoryStore::new()), dir.path()).await;

        form.submit("66", ReturnFormat::Audio).await;
        let path = form.download_current_result().await.unwrap().unwrap();
        assert!(path.ends_with("alipay_voice_66.mp3"));
        assert_eq!(std::fs::read(&path).unwrap(), b"ID3-audio");

        let record = form.history()[0].clone();
        form.submit("66", ReturnFormat::Json).await;
        assert!(form.download_current_result().await.unwrap().is_none());

        form.replay(&record);
        assert_eq!(form.return_format(), ReturnFormat::Audio);
        assert_eq!(
            form.result(),
            Some(&DisplayResult::Audio {
                audio_url: record.audio_url.clone(),
                number: "66".to_string(),
            })
        );

        let path = form.download_history_record(&record).await.unwrap();
        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            record.download_file_name()
        );
    }

    #[tokio::test]
    async fn test_download_missing_resource() {
        let dir = tempdir().unwrap();
        let form = controller(
            ScriptedProxy::new(vec![]),
            Arc::new(InMemoryHistoryStore::new()),
            dir.path(),
        )
        .await;

        let record = HistoryRecord::new("1", dir.path().join("gone.mp3").to_string_lossy());
        let err = form.download_history_record(&record).await.err().unwrap();
        assert!(matches!(
            err,
            ApplicationError::StorageError(AudioStorageError::FileNotFound(_))
        ));
    }
}
