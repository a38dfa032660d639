use artdesk_core::{ActionRequest, Credentials};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::{edit_text, field_line};
use crate::effects::UiEffect;
use crate::state::TuiState;
use crate::update::start_action;

const MIN_USERNAME_CHARS: usize = 3;
const MIN_PASSWORD_CHARS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

impl LoginField {
    fn toggle(self) -> Self {
        match self {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    /// Last login failure, shown under the form.
    pub error: Option<String>,
}

impl LoginForm {
    pub fn can_submit(&self) -> bool {
        self.username.trim().chars().count() >= MIN_USERNAME_CHARS
            && self.password.trim().chars().count() >= MIN_PASSWORD_CHARS
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

pub fn handle_key(tui: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    let form = &mut tui.login;
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            form.focus = form.focus.toggle();
            vec![]
        }
        KeyCode::Enter => {
            if !form.can_submit() {
                return vec![];
            }
            form.error = None;
            let request = ActionRequest::Login(form.credentials());
            start_action(tui, request)
        }
        _ => {
            let buf = match form.focus {
                LoginField::Username => &mut form.username,
                LoginField::Password => &mut form.password,
            };
            edit_text(buf, key);
            vec![]
        }
    }
}

pub fn render(tui: &TuiState, frame: &mut Frame, area: Rect) {
    let form = &tui.login;
    let masked = "*".repeat(form.password.chars().count());

    let submit_style = if form.can_submit() {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut lines = vec![
        Line::from(""),
        field_line(
            "Username",
            form.username.clone(),
            form.focus == LoginField::Username,
        ),
        field_line("Password", masked, form.focus == LoginField::Password),
        Line::from(""),
        Line::styled("  [ Enter: Submit credentials ]", submit_style),
    ];
    if let Some(error) = &form.error {
        lines.push(Line::from(""));
        lines.push(Line::styled(
            format!("  {error}"),
            Style::default().fg(Color::Red),
        ));
    }

    let block = Block::default().borders(Borders::ALL).title(" Login ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_requires_trimmed_lengths() {
        let mut form = LoginForm {
            username: "  ab  ".into(),
            password: "12345678".into(),
            ..LoginForm::default()
        };
        assert!(!form.can_submit());

        form.username = "abc".into();
        assert!(form.can_submit());

        form.password = "   1234567   ".into();
        assert!(!form.can_submit());
    }

    #[test]
    fn test_credentials_are_sent_as_typed() {
        let form = LoginForm {
            username: "foo".into(),
            password: "12345678".into(),
            ..LoginForm::default()
        };
        let creds = form.credentials();
        assert_eq!(creds.username, "foo");
        assert_eq!(creds.password, "12345678");
    }
}
