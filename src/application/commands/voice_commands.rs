//! Voice Commands

use crate::domain::ReturnFormat;

/// 生成收款语音命令
///
/// `number` 为查询参数原文，缺失时为 None
#[derive(Debug, Clone)]
pub struct GenerateVoice {
    pub number: Option<String>,
    pub format: ReturnFormat,
}
