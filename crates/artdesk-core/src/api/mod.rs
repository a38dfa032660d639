//! Articles API client and wire types.

mod client;
mod errors;
mod types;

pub use client::ApiClient;
pub use errors::{ApiError, ApiResult};
pub use types::{
    Article, ArticleFields, ArticleId, ArticleResponse, ArticlesResponse, Credentials,
    LoginResponse, MessageResponse, Topic,
};
