//! TUI state.
//!
//! `TuiState` wraps the shared `AppState` with the view-only state the
//! screens need (form buffers, focus, list cursor, spinner).

use std::sync::Arc;

use artdesk_core::{AppState, SessionStore};

use crate::screens::{ArticlesScreen, LoginForm};

pub struct TuiState {
    /// Application state, mutated only through the action layer.
    pub app: AppState,
    /// Session store shared with the API client.
    pub session: Arc<dyn SessionStore>,
    pub login: LoginForm,
    pub articles: ArticlesScreen,
    pub should_quit: bool,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self {
            app: AppState::new(),
            session,
            login: LoginForm::default(),
            articles: ArticlesScreen::default(),
            should_quit: false,
            spinner_frame: 0,
        }
    }
}
