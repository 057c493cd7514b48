//! HTTP Handlers

mod alipay_voice;

pub use alipay_voice::*;
