pub mod auth;
pub mod client;
pub mod error;
pub mod search;

pub use auth::AuthApi;
pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use search::HttpSearchBackend;
