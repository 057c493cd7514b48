//! HTTP Layer - 校验代理

pub mod cors;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use cors::{CorsHeaders, CorsPolicy};
pub use error::ApiError;
pub use routes::{create_routes, API_PATH};
pub use server::{HttpServer, ServerConfig};
pub use state::AppState;
