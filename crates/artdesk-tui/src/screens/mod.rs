//! Screens, one per route.
//!
//! Each screen owns its local form state, its key handling, and its render
//! function. Only `update` calls the key handlers.

pub mod articles;
pub mod login;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub use articles::{ArticleForm, ArticlesFocus, ArticlesScreen};
pub use login::{LoginField, LoginForm};

/// Applies a text-editing key to `buf`. Returns true if the key was consumed.
pub(crate) fn edit_text(buf: &mut String, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            buf.push(c);
            true
        }
        KeyCode::Backspace => {
            buf.pop();
            true
        }
        _ => false,
    }
}

/// One `label: value` row of a form.
pub(crate) fn field_line<'a>(label: &'a str, value: String, focused: bool) -> Line<'a> {
    let marker = if focused { "> " } else { "  " };
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::from(vec![
        Span::styled(marker, label_style),
        Span::styled(format!("{label:<10}"), label_style),
        Span::raw(value),
    ])
}
