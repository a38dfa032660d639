//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(tui, event)`
//! and executes the returned effects.

use artdesk_core::actions::{self, ActionError};
use artdesk_core::{ActionOutcome, ActionRequest, Route};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::screens;
use crate::state::TuiState;

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(tui: &mut TuiState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            tui.spinner_frame = tui.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(Event::Key(key)) if key.kind != KeyEventKind::Release => {
            handle_key(tui, key)
        }
        UiEvent::Terminal(Event::Paste(text)) => {
            handle_paste(tui, &text);
            vec![]
        }
        UiEvent::Terminal(_) => vec![],
        UiEvent::Action(outcome) => handle_outcome(tui, outcome),
    }
}

/// Enters the pending state for `request` and asks the runtime to run it.
pub(crate) fn start_action(tui: &mut TuiState, request: ActionRequest) -> Vec<UiEffect> {
    actions::begin(&mut tui.app, &request);
    vec![UiEffect::RunAction(request)]
}

/// Navigates through the guard. Landing on `/articles` from elsewhere
/// fetches the list.
fn navigate(tui: &mut TuiState, requested: Route) -> Vec<UiEffect> {
    let previous = tui.app.route;
    let landed = tui.app.navigate(requested, tui.session.as_ref());
    entered(tui, previous, landed)
}

fn entered(tui: &mut TuiState, previous: Route, landed: Route) -> Vec<UiEffect> {
    if landed == Route::Articles && previous != Route::Articles {
        tui.articles.focus = screens::ArticlesFocus::Title;
        start_action(tui, ActionRequest::ListArticles)
    } else {
        vec![]
    }
}

fn handle_key(tui: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Char('c') if ctrl => vec![UiEffect::Quit],
        KeyCode::Char('l') if ctrl => {
            logout(tui);
            vec![]
        }
        KeyCode::F(1) => navigate(tui, Route::Login),
        KeyCode::F(2) => navigate(tui, Route::Articles),
        _ => match tui.app.route {
            Route::Login => screens::login::handle_key(tui, key),
            Route::Articles => screens::articles::handle_key(tui, key),
        },
    }
}

fn handle_paste(tui: &mut TuiState, text: &str) {
    use screens::{ArticlesFocus, LoginField};

    let text = text.replace(['\r', '\n'], " ");
    match tui.app.route {
        Route::Login => match tui.login.focus {
            LoginField::Username => tui.login.username.push_str(&text),
            LoginField::Password => tui.login.password.push_str(&text),
        },
        Route::Articles => match tui.articles.focus {
            ArticlesFocus::Title => tui.articles.form.title.push_str(&text),
            ArticlesFocus::Text => tui.articles.form.text.push_str(&text),
            ArticlesFocus::Topic | ArticlesFocus::List => {}
        },
    }
}

fn logout(tui: &mut TuiState) {
    if let Err(e) = actions::logout(&mut tui.app, tui.session.as_ref()) {
        tracing::warn!(error = %e, "logout failed");
        return;
    }
    tui.login.reset();
    screens::articles::cancel_edit(tui);
}

fn handle_outcome(tui: &mut TuiState, outcome: ActionOutcome) -> Vec<UiEffect> {
    let deleted = match &outcome {
        ActionOutcome::ArticleDeleted { id, result: Ok(_) } => Some(*id),
        _ => None,
    };

    let previous = tui.app.route;
    let result = actions::complete(&mut tui.app, tui.session.as_ref(), outcome);
    tui.articles.clamp_cursor(tui.app.articles.len());

    match result {
        Ok(Some(landed)) => {
            if landed == Route::Articles {
                tui.login.reset();
            }
            entered(tui, previous, landed)
        }
        Ok(None) => {
            if let Some(id) = deleted {
                tui.app.clear_selection_if(id);
            }
            vec![]
        }
        Err(ActionError::LoginFailed(err)) => {
            tui.login.error = Some(format!("Login failed: {err}"));
            vec![]
        }
        Err(ActionError::SessionInvalid(_)) => {
            screens::articles::cancel_edit(tui);
            vec![]
        }
        Err(ActionError::Session(err)) => {
            tracing::warn!(error = %format!("{err:#}"), "could not persist session");
            tui.login.error = Some(format!("Could not save session: {err}"));
            vec![]
        }
    }
}
