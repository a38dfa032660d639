use std::sync::Arc;

use anyhow::Result;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::errors::{ApiError, ApiResult};
use super::types::{
    ArticleFields, ArticleId, ArticleResponse, ArticlesResponse, Credentials, LoginResponse,
    MessageResponse,
};
use crate::config::Config;
use crate::session::SessionStore;

/// Standard User-Agent header for artdesk API requests.
pub const USER_AGENT: &str = concat!("artdesk/", env!("CARGO_PKG_VERSION"));

/// Articles API client.
///
/// Reads the token from the session store on every authenticated call; it
/// never writes to the store.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    auth_scheme: Option<String>,
    http: reqwest::Client,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Creates a client for `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>, session: Arc<dyn SessionStore>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_scheme: None,
            http: reqwest::Client::new(),
            session,
        }
    }

    /// Creates a client from config (base URL precedence and auth scheme).
    ///
    /// # Errors
    /// Returns an error if the effective base URL is invalid.
    pub fn from_config(config: &Config, session: Arc<dyn SessionStore>) -> Result<Self> {
        let base_url = config.effective_base_url()?;
        Ok(Self::new(base_url, session).with_auth_scheme(config.auth_scheme.clone()))
    }

    /// Sets the scheme placed before the token (`None` sends the raw token).
    #[must_use]
    pub fn with_auth_scheme(mut self, scheme: Option<String>) -> Self {
        self.auth_scheme = scheme
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /login`
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status, or an
    /// unexpected body.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse> {
        let request = self.request(Method::POST, "/login", false).json(credentials);
        self.send(request).await
    }

    /// `GET /articles`
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status, or an
    /// unexpected body.
    pub async fn list_articles(&self) -> ApiResult<ArticlesResponse> {
        let request = self.request(Method::GET, "/articles", true);
        self.send(request).await
    }

    /// `POST /articles`
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status, or an
    /// unexpected body.
    pub async fn create_article(&self, fields: &ArticleFields) -> ApiResult<ArticleResponse> {
        self.send_json(Method::POST, "/articles", fields).await
    }

    /// `PUT /articles/:article_id`
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status, or an
    /// unexpected body.
    pub async fn update_article(
        &self,
        id: ArticleId,
        fields: &ArticleFields,
    ) -> ApiResult<ArticleResponse> {
        self.send_json(Method::PUT, &format!("/articles/{id}"), fields)
            .await
    }

    /// `DELETE /articles/:article_id`
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status, or an
    /// unexpected body.
    pub async fn delete_article(&self, id: ArticleId) -> ApiResult<MessageResponse> {
        let request = self.request(Method::DELETE, &format!("/articles/{id}"), true);
        self.send(request).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(method, path, true).json(body);
        self.send(request).await
    }

    /// Builds a request, attaching the session token when `authenticated`.
    ///
    /// A missing token is not checked locally: the request goes out without
    /// the header and the server rejects it.
    fn request(&self, method: Method, path: &str, authenticated: bool) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self
            .http
            .request(method.clone(), &url)
            .header(reqwest::header::USER_AGENT, USER_AGENT);

        let token = if authenticated {
            self.session.token()
        } else {
            None
        };
        tracing::debug!(%method, path, with_token = token.is_some(), "api request");

        if let Some(token) = token {
            let value = match &self.auth_scheme {
                Some(scheme) => format!("{scheme} {token}"),
                None => token,
            };
            builder = builder.header(AUTHORIZATION, value);
        }
        builder
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!(%status, "api request failed");
            return Err(ApiError::from_status(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("auth_scheme", &self.auth_scheme)
            .finish_non_exhaustive()
    }
}
