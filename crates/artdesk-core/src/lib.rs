//! Core artdesk library (session, API client, application state, actions).

pub mod actions;
pub mod api;
pub mod config;
pub mod guard;
pub mod logging;
pub mod session;
pub mod state;

pub use actions::{
    ActionError, ActionOutcome, ActionRequest, Desk, GOODBYE_MESSAGE, SESSION_INVALID_MESSAGE,
};
pub use api::{
    ApiClient, ApiError, ApiResult, Article, ArticleFields, ArticleId, Credentials, Topic,
};
pub use config::Config;
pub use guard::guard;
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
pub use state::{AppState, Route};
