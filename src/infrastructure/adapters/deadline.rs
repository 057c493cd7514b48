//! Deadline - 可取消的出站调用
//!
//! 到期时丢弃 future（即取消进行中的请求），返回 DeadlineExceeded

use std::future::Future;
use std::time::Duration;

use crate::application::ports::{ProxyClientError, VoiceApiError};

/// 调用超过截止时间
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineExceeded(pub Duration);

impl From<DeadlineExceeded> for VoiceApiError {
    fn from(_: DeadlineExceeded) -> Self {
        VoiceApiError::Timeout
    }
}

impl From<DeadlineExceeded> for ProxyClientError {
    fn from(_: DeadlineExceeded) -> Self {
        ProxyClientError::Timeout
    }
}

/// 在 deadline 内执行 call
pub async fn with_deadline<T, E, F>(deadline: Duration, call: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<DeadlineExceeded>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(deadline_ms = deadline.as_millis() as u64, "Outbound call timed out");
            Err(DeadlineExceeded(deadline).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_within_deadline() {
        let result: Result<u32, VoiceApiError> =
            with_deadline(Duration::from_secs(1), async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_expired_call_is_cancelled() {
        let result: Result<(), VoiceApiError> = with_deadline(Duration::from_millis(20), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(VoiceApiError::Timeout)));
    }

    #[tokio::test]
    async fn test_inner_error_passes_through() {
        let result: Result<(), ProxyClientError> = with_deadline(Duration::from_secs(1), async {
            Err(ProxyClientError::NetworkError("refused".to_string()))
        })
        .await;
        assert!(matches!(result, Err(ProxyClientError::NetworkError(_))));
    }
}
