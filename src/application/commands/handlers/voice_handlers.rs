//! Voice Command Handlers

use http::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::application::commands::GenerateVoice;
use crate::application::error::ApplicationError;
use crate::application::ports::{AudioPayload, VoiceApiError, VoiceApiPort, VoiceRequest};
use crate::domain::{Amount, ReturnFormat};

/// 上游表示成功的业务码
pub const UPSTREAM_SUCCESS_CODE: i64 = 200;

/// 生成结果
#[derive(Debug)]
pub enum VoiceOutcome {
    /// 原样转发的 JSON（状态码跟随上游）
    Json { status: StatusCode, body: Value },
    /// 转发的音频流
    Audio(AudioPayload),
}

/// GenerateVoice Handler
///
/// 校验金额 → 请求上游元数据 → 按返回格式决定转发 JSON 还是音频
pub struct GenerateVoiceHandler {
    voice_api: Arc<dyn VoiceApiPort>,
}

impl GenerateVoiceHandler {
    pub fn new(voice_api: Arc<dyn VoiceApiPort>) -> Self {
        Self { voice_api }
    }

    pub async fn handle(&self, command: GenerateVoice) -> Result<VoiceOutcome, ApplicationError> {
        let amount = Amount::parse(command.number.as_deref().unwrap_or(""))?;

        let reply = self
            .voice_api
            .fetch_metadata(VoiceRequest {
                number: amount.as_str().to_string(),
                format: command.format,
            })
            .await?;

        if !reply.status.is_success() {
            tracing::error!(
                status = %reply.status,
                number = %amount,
                "Upstream voice API returned an error"
            );
            let body = reply.body.unwrap_or_else(|| {
                json!({
                    "code": reply.status.as_u16(),
                    "msg": "upstream API returned an error",
                })
            });
            return Ok(VoiceOutcome::Json {
                status: reply.status,
                body,
            });
        }

        let body = reply.body.ok_or_else(|| {
            VoiceApiError::InvalidResponse("upstream body is not JSON".to_string())
        })?;

        let upstream_ok = body.get("code").and_then(Value::as_i64) == Some(UPSTREAM_SUCCESS_CODE);
        if command.format == ReturnFormat::Json || !upstream_ok {
            tracing::info!(number = %amount, body = %body, "Relaying upstream JSON");
            return Ok(VoiceOutcome::Json {
                status: reply.status,
                body,
            });
        }

        let audio_url = body
            .get("audiourl")
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .ok_or(ApplicationError::AudioNotFound)?;

        tracing::info!(number = %amount, audio_url = %audio_url, "Proxying audio file");

        let audio = self.voice_api.fetch_audio(audio_url).await?;
        if !audio.status.is_success() {
            return Err(ApplicationError::AudioFetchFailed(audio.status));
        }

        Ok(VoiceOutcome::Audio(audio))
    }
}
