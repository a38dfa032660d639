//! Pure view/render functions for the TUI.
//!
//! Functions here take `&TuiState` by immutable reference, draw to a
//! ratatui Frame, and never mutate state or return effects.

use artdesk_core::Route;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::screens;
use crate::state::TuiState;

/// Height of the header (title + message line).
const HEADER_HEIGHT: u16 = 2;

/// Height of the key hint footer.
const FOOTER_HEIGHT: u16 = 1;

/// Spinner frames shown while a request is in flight.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

const LOGOUT_HINT: &str = "Ctrl+L logout";

/// Renders the entire TUI to the frame.
pub fn render(tui: &TuiState, frame: &mut Frame) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    render_header(tui, frame, chunks[0]);

    match tui.app.route {
        Route::Login => screens::login::render(tui, frame, chunks[1]),
        Route::Articles => screens::articles::render(tui, frame, chunks[1]),
    }
    // Soft guard: input still works, the body just looks busy.
    if tui.app.loading {
        frame
            .buffer_mut()
            .set_style(chunks[1], Style::default().add_modifier(Modifier::DIM));
    }

    render_footer(tui, frame, chunks[2]);
}

fn render_header(tui: &TuiState, frame: &mut Frame, area: Rect) {
    let title = format!(" artdesk {} ", tui.app.route.path());
    let pad = (area.width as usize)
        .saturating_sub(title.width() + LOGOUT_HINT.width() + 1);
    let top = Line::from(vec![
        Span::styled(
            title,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(pad)),
        Span::styled(LOGOUT_HINT, Style::default().fg(Color::DarkGray)),
    ]);

    let mut status = Vec::new();
    if tui.app.loading {
        let spinner = SPINNER_FRAMES[tui.spinner_frame % SPINNER_FRAMES.len()];
        status.push(Span::styled(
            format!(" {spinner} "),
            Style::default().fg(Color::Yellow),
        ));
    } else {
        status.push(Span::raw(" "));
    }
    status.push(Span::styled(
        tui.app.message.clone(),
        Style::default().fg(Color::Green),
    ));

    frame.render_widget(Paragraph::new(vec![top, Line::from(status)]), area);
}

fn render_footer(tui: &TuiState, frame: &mut Frame, area: Rect) {
    let hints = match tui.app.route {
        Route::Login => " F2 articles · Tab next field · Enter submit · Esc quit",
        Route::Articles => {
            " F1 login · Tab next · Space topic · e edit · d delete · Enter submit · Esc quit"
        }
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
