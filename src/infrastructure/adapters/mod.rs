//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod deadline;
pub mod proxy_client;
pub mod storage;
pub mod voice_api;

pub use deadline::{with_deadline, DeadlineExceeded};
pub use proxy_client::*;
pub use storage::*;
pub use voice_api::*;
