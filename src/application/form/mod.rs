//! 应用层 - 客户端表单
//!
//! 收集金额与返回格式，调用代理并维护最近生成历史

mod controller;

pub use controller::{DisplayResult, FormController, FormError};
