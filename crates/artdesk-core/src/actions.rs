//! Action layer.
//!
//! Every network action is single-shot: [`begin`] enters the pending state,
//! [`execute`] performs the API call and [`complete`] applies its outcome.
//! The TUI runs `execute` on a task and feeds the outcome back through its
//! inbox; sequential callers use [`Desk`], which runs all three in order.

use std::sync::Arc;

use thiserror::Error;

use crate::api::{
    ApiClient, ApiError, ApiResult, ArticleFields, ArticleId, ArticleResponse, ArticlesResponse,
    Credentials, LoginResponse, MessageResponse,
};
use crate::config::Config;
use crate::session::SessionStore;
use crate::state::{AppState, Route};

/// Message shown for any failed authenticated call.
pub const SESSION_INVALID_MESSAGE: &str = "Ouch: jwt malformed";

/// Message shown after logging out.
pub const GOODBYE_MESSAGE: &str = "Goodbye!";

/// A network action and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRequest {
    Login(Credentials),
    ListArticles,
    CreateArticle(ArticleFields),
    UpdateArticle { id: ArticleId, fields: ArticleFields },
    DeleteArticle(ArticleId),
}

impl ActionRequest {
    pub fn name(&self) -> &'static str {
        match self {
            ActionRequest::Login(_) => "login",
            ActionRequest::ListArticles => "list_articles",
            ActionRequest::CreateArticle(_) => "create_article",
            ActionRequest::UpdateArticle { .. } => "update_article",
            ActionRequest::DeleteArticle(_) => "delete_article",
        }
    }
}

/// Result of [`execute`], ready to be applied with [`complete`].
#[derive(Debug)]
pub enum ActionOutcome {
    LoggedIn(ApiResult<LoginResponse>),
    ArticlesListed(ApiResult<ArticlesResponse>),
    ArticleCreated(ApiResult<ArticleResponse>),
    ArticleUpdated {
        id: ArticleId,
        result: ApiResult<ArticleResponse>,
    },
    ArticleDeleted {
        id: ArticleId,
        result: ApiResult<MessageResponse>,
    },
}

/// Why an action failed. State has already been updated when this is returned.
#[derive(Error, Debug)]
pub enum ActionError {
    /// Login was rejected. The application message is left empty.
    #[error("Login failed: {0}")]
    LoginFailed(ApiError),
    /// An authenticated call failed; the user was sent back to login.
    #[error("Ouch: jwt malformed")]
    SessionInvalid(#[source] ApiError),
    /// The session store could not be written.
    #[error(transparent)]
    Session(#[from] anyhow::Error),
}

/// Enters the pending state for `request`.
pub fn begin(state: &mut AppState, request: &ActionRequest) {
    tracing::debug!(action = request.name(), "action pending");
    state.begin_request();
}

/// Performs the API call for `request`.
pub async fn execute(client: &ApiClient, request: ActionRequest) -> ActionOutcome {
    match request {
        ActionRequest::Login(credentials) => {
            ActionOutcome::LoggedIn(client.login(&credentials).await)
        }
        ActionRequest::ListArticles => ActionOutcome::ArticlesListed(client.list_articles().await),
        ActionRequest::CreateArticle(fields) => {
            ActionOutcome::ArticleCreated(client.create_article(&fields).await)
        }
        ActionRequest::UpdateArticle { id, fields } => ActionOutcome::ArticleUpdated {
            id,
            result: client.update_article(id, &fields).await,
        },
        ActionRequest::DeleteArticle(id) => ActionOutcome::ArticleDeleted {
            id,
            result: client.delete_article(id).await,
        },
    }
}

/// Applies `outcome` to `state`.
///
/// Returns the route navigated to, if the action navigated. A
/// [`ActionError::SessionInvalid`] has already moved the state to login.
///
/// # Errors
/// Returns the failure after it has been reflected in `state`.
pub fn complete(
    state: &mut AppState,
    session: &dyn SessionStore,
    outcome: ActionOutcome,
) -> Result<Option<Route>, ActionError> {
    match outcome {
        ActionOutcome::LoggedIn(Ok(response)) => {
            if let Err(e) = session.set_token(&response.token) {
                state.loading = false;
                return Err(ActionError::Session(e));
            }
            tracing::info!("logged in");
            state.finish_request(response.message);
            Ok(Some(state.navigate(Route::Articles, session)))
        }
        ActionOutcome::LoggedIn(Err(err)) => {
            tracing::warn!(error = %err, status = ?err.status(), "login failed");
            state.loading = false;
            Err(ActionError::LoginFailed(err))
        }
        ActionOutcome::ArticlesListed(Ok(response)) => {
            tracing::info!(count = response.articles.len(), "articles listed");
            state.articles = response.articles;
            state.finish_request(response.message);
            Ok(None)
        }
        ActionOutcome::ArticleCreated(Ok(response)) => {
            tracing::info!(id = %response.article.article_id, "article created");
            state.append_article(response.article);
            state.finish_request(response.message);
            Ok(None)
        }
        ActionOutcome::ArticleUpdated {
            id,
            result: Ok(response),
        } => {
            if state.replace_article(id, response.article) {
                tracing::info!(%id, "article updated");
            } else {
                tracing::debug!(%id, "updated article not in local collection");
            }
            state.finish_request(response.message);
            Ok(None)
        }
        ActionOutcome::ArticleDeleted {
            id,
            result: Ok(response),
        } => {
            tracing::info!(%id, "article deleted");
            state.remove_article(id);
            state.finish_request(response.message);
            Ok(None)
        }
        ActionOutcome::ArticlesListed(Err(err))
        | ActionOutcome::ArticleCreated(Err(err))
        | ActionOutcome::ArticleUpdated { result: Err(err), .. }
        | ActionOutcome::ArticleDeleted { result: Err(err), .. } => {
            tracing::warn!(
                error = %err,
                status = ?err.status(),
                "authenticated call failed, returning to login"
            );
            state.finish_request(SESSION_INVALID_MESSAGE);
            state.navigate(Route::Login, session);
            Err(ActionError::SessionInvalid(err))
        }
    }
}

/// Clears the token and returns to login. Not a network call; idempotent.
///
/// # Errors
/// Returns an error if the session store cannot be cleared.
pub fn logout(state: &mut AppState, session: &dyn SessionStore) -> Result<Route, ActionError> {
    session.clear_token()?;
    tracing::info!("logged out");
    state.message = GOODBYE_MESSAGE.to_string();
    Ok(state.navigate(Route::Login, session))
}

/// Explicit context owning the application state, the API client and the
/// session store.
pub struct Desk {
    state: AppState,
    client: ApiClient,
    session: Arc<dyn SessionStore>,
}

impl Desk {
    /// `client` should read tokens from the same `session`.
    pub fn new(client: ApiClient, session: Arc<dyn SessionStore>) -> Self {
        Self {
            state: AppState::new(),
            client,
            session,
        }
    }

    /// Builds a desk whose client is configured from `config`.
    ///
    /// # Errors
    /// Returns an error if the effective base URL is invalid.
    pub fn from_config(config: &Config, session: Arc<dyn SessionStore>) -> anyhow::Result<Self> {
        let client = ApiClient::from_config(config, Arc::clone(&session))?;
        Ok(Self::new(client, session))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Navigates through the guard.
    pub fn navigate(&mut self, route: Route) -> Route {
        self.state.navigate(route, self.session.as_ref())
    }

    pub fn select(&mut self, id: Option<ArticleId>) {
        self.state.select(id);
    }

    /// Runs one action to completion.
    ///
    /// # Errors
    /// See [`complete`].
    pub async fn run(&mut self, request: ActionRequest) -> Result<Option<Route>, ActionError> {
        begin(&mut self.state, &request);
        let outcome = execute(&self.client, request).await;
        complete(&mut self.state, self.session.as_ref(), outcome)
    }

    /// # Errors
    /// See [`complete`].
    pub async fn login(&mut self, credentials: Credentials) -> Result<Option<Route>, ActionError> {
        self.run(ActionRequest::Login(credentials)).await
    }

    /// # Errors
    /// See [`logout`].
    pub fn logout(&mut self) -> Result<Route, ActionError> {
        logout(&mut self.state, self.session.as_ref())
    }

    /// # Errors
    /// See [`complete`].
    pub async fn list_articles(&mut self) -> Result<(), ActionError> {
        self.run(ActionRequest::ListArticles).await.map(|_| ())
    }

    /// # Errors
    /// See [`complete`].
    pub async fn create_article(&mut self, fields: ArticleFields) -> Result<(), ActionError> {
        self.run(ActionRequest::CreateArticle(fields))
            .await
            .map(|_| ())
    }

    /// # Errors
    /// See [`complete`].
    pub async fn update_article(
        &mut self,
        id: ArticleId,
        fields: ArticleFields,
    ) -> Result<(), ActionError> {
        self.run(ActionRequest::UpdateArticle { id, fields })
            .await
            .map(|_| ())
    }

    /// Deletes `id`, clearing the selection if it pointed at it.
    ///
    /// # Errors
    /// See [`complete`].
    pub async fn delete_article(&mut self, id: ArticleId) -> Result<(), ActionError> {
        self.run(ActionRequest::DeleteArticle(id)).await?;
        self.state.clear_selection_if(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;
    use crate::api::{Article, Topic};
    use crate::session::MemorySessionStore;

    fn unauthorized() -> ApiError {
        ApiError::from_status(StatusCode::UNAUTHORIZED, r#"{"message":"nope"}"#)
    }

    fn article(id: u64) -> Article {
        Article {
            article_id: ArticleId(id),
            title: format!("t{id}"),
            text: format!("x{id}"),
            topic: Topic::Node,
        }
    }

    #[test]
    fn test_login_failure_leaves_message_empty() {
        let session = MemorySessionStore::new();
        let mut state = AppState::new();
        begin(
            &mut state,
            &ActionRequest::Login(Credentials::new("user", "password1")),
        );

        let err = complete(&mut state, &session, ActionOutcome::LoggedIn(Err(unauthorized())))
            .unwrap_err();

        assert!(matches!(err, ActionError::LoginFailed(_)));
        assert!(err.to_string().starts_with("Login failed: nope"));
        assert!(state.message.is_empty());
        assert!(!state.loading);
        assert_eq!(state.route, Route::Login);
        assert!(session.token().is_none());
    }

    #[test]
    fn test_session_invalid_for_every_authenticated_outcome() {
        let outcomes = [
            ActionOutcome::ArticlesListed(Err(unauthorized())),
            ActionOutcome::ArticleCreated(Err(unauthorized())),
            ActionOutcome::ArticleUpdated {
                id: ArticleId(1),
                result: Err(unauthorized()),
            },
            ActionOutcome::ArticleDeleted {
                id: ArticleId(1),
                result: Err(unauthorized()),
            },
        ];

        for outcome in outcomes {
            let session = MemorySessionStore::with_token("abc");
            let mut state = AppState {
                articles: vec![article(1)],
                route: Route::Articles,
                ..AppState::default()
            };
            state.begin_request();

            let err = complete(&mut state, &session, outcome).unwrap_err();

            assert!(matches!(err, ActionError::SessionInvalid(_)));
            assert_eq!(err.to_string(), SESSION_INVALID_MESSAGE);
            assert_eq!(state.message, SESSION_INVALID_MESSAGE);
            assert!(!state.loading);
            assert_eq!(state.route, Route::Login);
            assert_eq!(state.articles, vec![article(1)]);
        }
    }

    #[test]
    fn test_logout_is_idempotent() {
        let session = MemorySessionStore::with_token("abc");
        let mut state = AppState {
            route: Route::Articles,
            ..AppState::default()
        };

        assert_eq!(logout(&mut state, &session).unwrap(), Route::Login);
        assert_eq!(state.message, GOODBYE_MESSAGE);
        assert!(session.token().is_none());

        state.message.clear();
        assert_eq!(logout(&mut state, &session).unwrap(), Route::Login);
        assert_eq!(state.message, "Goodbye!");
    }

    #[test]
    fn test_update_of_missing_article_changes_nothing_but_message() {
        let session = MemorySessionStore::with_token("abc");
        let mut state = AppState {
            articles: vec![article(1), article(2)],
            ..AppState::default()
        };
        state.begin_request();

        let route = complete(
            &mut state,
            &session,
            ActionOutcome::ArticleUpdated {
                id: ArticleId(5),
                result: Ok(ArticleResponse {
                    message: "updated".into(),
                    article: article(5),
                }),
            },
        )
        .unwrap();

        assert!(route.is_none());
        assert_eq!(state.articles, vec![article(1), article(2)]);
        assert_eq!(state.message, "updated");
    }
}
