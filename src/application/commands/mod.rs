//! 应用层 - 命令
//!
//! 代理侧的生成语音用例

mod voice_commands;

pub mod handlers;

pub use voice_commands::*;
