//! Payment Context - Value Objects

use serde::{Deserialize, Serialize};

use super::AmountError;

/// 金额上限（开区间，1000 亿）
pub const AMOUNT_UPPER_BOUND: f64 = 100_000_000_000.0;

/// 收款金额
///
/// 不变量:
/// - 数值有限
/// - 0 < value < AMOUNT_UPPER_BOUND
#[derive(Debug, Clone, PartialEq)]
pub struct Amount {
    raw: String,
    value: f64,
}

impl Amount {
    /// 解析服务端收到的 `number` 参数
    pub fn parse(raw: &str) -> Result<Self, AmountError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(AmountError::Missing);
        }

        let value: f64 = raw.parse().map_err(|_| AmountError::NotANumber)?;
        if !value.is_finite() {
            return Err(AmountError::NotANumber);
        }

        if value <= 0.0 || value >= AMOUNT_UPPER_BOUND {
            return Err(AmountError::OutOfRange);
        }

        Ok(Self {
            raw: raw.to_string(),
            value,
        })
    }

    /// 解析用户输入（允许千分位分隔符）
    pub fn from_input(input: &str) -> Result<Self, AmountError> {
        Self::parse(&strip_grouping(input))
    }

    /// 原始十进制字符串，原样转发给上游
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// 返回格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnFormat {
    #[default]
    Audio,
    Json,
}

impl ReturnFormat {
    /// 由 `type` 查询参数推断，只有 `json` 会切换为 JSON
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("json") => Self::Json,
            _ => Self::Audio,
        }
    }

    /// 需要显式携带的 `type` 参数值
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            Self::Audio => None,
            Self::Json => Some("json"),
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }
}

impl std::fmt::Display for ReturnFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Audio => write!(f, "audio"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// 去掉千分位分隔符
pub fn strip_grouping(input: &str) -> String {
    input.chars().filter(|c| *c != ',').collect()
}

/// 金额显示格式化
///
/// 只保留数字和小数点，整数部分按千分位分组，保留第一个小数点后的部分。
/// 对已经格式化过的字符串幂等。
pub fn format_display(raw: &str) -> String {
    let numeric: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut parts = numeric.split('.');
    let integer = parts.next().unwrap_or("");
    let fraction = parts.next().unwrap_or("");

    let mut formatted = group_thousands(integer);
    if !fraction.is_empty() {
        formatted.push('.');
        formatted.push_str(fraction);
    }
    formatted
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
