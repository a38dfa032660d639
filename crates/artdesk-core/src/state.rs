//! Application state.
//!
//! A single in-memory value owned by whoever drives the actions (the TUI
//! reducer or a CLI command). Only the action layer mutates it, except for
//! `route`, which changes through [`AppState::navigate`].

use std::fmt;

use crate::api::{Article, ArticleId};
use crate::guard;
use crate::session::SessionStore;

/// Client-visible screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// `/`
    #[default]
    Login,
    /// `/articles` (guarded)
    Articles,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Articles => "/articles",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Status message shown to the user (empty = nothing to show).
    pub message: String,
    /// Articles in server order.
    pub articles: Vec<Article>,
    /// Article currently being edited, if any.
    pub selected_article_id: Option<ArticleId>,
    /// True while an action's request is in flight.
    pub loading: bool,
    /// Current screen.
    pub route: Route,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigates to `requested`, applying the guard. Returns where we landed.
    pub fn navigate(&mut self, requested: Route, session: &dyn SessionStore) -> Route {
        self.route = guard::guard(requested, session);
        self.route
    }

    pub fn select(&mut self, id: Option<ArticleId>) {
        self.selected_article_id = id;
    }

    /// Clears the selection if it references `id`.
    ///
    /// Deleting never clears the selection on its own; callers that delete
    /// the selected article use this afterwards.
    pub fn clear_selection_if(&mut self, id: ArticleId) {
        if self.selected_article_id == Some(id) {
            self.selected_article_id = None;
        }
    }

    /// Pending entry shared by every network action.
    pub(crate) fn begin_request(&mut self) {
        self.message.clear();
        self.loading = true;
    }

    pub(crate) fn finish_request(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.loading = false;
    }

    pub(crate) fn append_article(&mut self, article: Article) {
        self.articles.push(article);
    }

    /// Replaces the article with `id` in place. Returns false if absent.
    pub(crate) fn replace_article(&mut self, id: ArticleId, article: Article) -> bool {
        match self.articles.iter_mut().find(|a| a.article_id == id) {
            Some(slot) => {
                *slot = article;
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove_article(&mut self, id: ArticleId) {
        self.articles.retain(|a| a.article_id != id);
    }
}
