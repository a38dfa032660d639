use artdesk_core::{ActionRequest, Article, ArticleFields, Topic};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use super::{edit_text, field_line};
use crate::effects::UiEffect;
use crate::state::TuiState;
use crate::update::start_action;

/// Which part of the articles screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArticlesFocus {
    #[default]
    Title,
    Text,
    Topic,
    List,
}

impl ArticlesFocus {
    fn next(self) -> Self {
        match self {
            ArticlesFocus::Title => ArticlesFocus::Text,
            ArticlesFocus::Text => ArticlesFocus::Topic,
            ArticlesFocus::Topic => ArticlesFocus::List,
            ArticlesFocus::List => ArticlesFocus::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            ArticlesFocus::Title => ArticlesFocus::List,
            ArticlesFocus::Text => ArticlesFocus::Title,
            ArticlesFocus::Topic => ArticlesFocus::Text,
            ArticlesFocus::List => ArticlesFocus::Topic,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleForm {
    pub title: String,
    pub text: String,
    /// Starts unset; the user has to pick one.
    pub topic: Option<Topic>,
}

impl ArticleForm {
    pub fn from_article(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            text: article.text.clone(),
            topic: Some(article.topic),
        }
    }

    /// The request body, if the form is complete.
    pub fn fields(&self) -> Option<ArticleFields> {
        if self.title.trim().is_empty() || self.text.trim().is_empty() {
            return None;
        }
        Some(ArticleFields {
            title: self.title.clone(),
            text: self.text.clone(),
            topic: self.topic?,
        })
    }

    pub fn cycle_topic(&mut self) {
        self.topic = Some(match self.topic {
            Some(topic) => topic.next(),
            None => Topic::all()[0],
        });
    }
}

#[derive(Debug, Clone, Default)]
pub struct ArticlesScreen {
    pub form: ArticleForm,
    pub focus: ArticlesFocus,
    /// Highlighted row in the list.
    pub cursor: usize,
}

impl ArticlesScreen {
    /// Keeps the cursor inside a list of `len` rows.
    pub fn clamp_cursor(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub fn reset_form(&mut self) {
        self.form = ArticleForm::default();
    }
}

pub fn handle_key(tui: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('x') {
        cancel_edit(tui);
        return vec![];
    }

    match key.code {
        KeyCode::Tab => {
            tui.articles.focus = tui.articles.focus.next();
            vec![]
        }
        KeyCode::BackTab => {
            tui.articles.focus = tui.articles.focus.prev();
            vec![]
        }
        KeyCode::Enter if tui.articles.focus != ArticlesFocus::List => submit(tui),
        _ => match tui.articles.focus {
            ArticlesFocus::Title => {
                edit_text(&mut tui.articles.form.title, key);
                vec![]
            }
            ArticlesFocus::Text => {
                edit_text(&mut tui.articles.form.text, key);
                vec![]
            }
            ArticlesFocus::Topic => {
                if matches!(
                    key.code,
                    KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right
                ) {
                    tui.articles.form.cycle_topic();
                }
                vec![]
            }
            ArticlesFocus::List => handle_list_key(tui, key),
        },
    }
}

fn handle_list_key(tui: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    let len = tui.app.articles.len();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            tui.articles.cursor = tui.articles.cursor.saturating_sub(1);
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if tui.articles.cursor + 1 < len {
                tui.articles.cursor += 1;
            }
            vec![]
        }
        // Edit and delete are disabled while an article is being edited.
        KeyCode::Char('e') if tui.app.selected_article_id.is_none() => {
            let Some(article) = tui.app.articles.get(tui.articles.cursor) else {
                return vec![];
            };
            tui.articles.form = ArticleForm::from_article(article);
            let id = article.article_id;
            tui.app.select(Some(id));
            tui.articles.focus = ArticlesFocus::Title;
            vec![]
        }
        KeyCode::Char('d') if tui.app.selected_article_id.is_none() => {
            let Some(article) = tui.app.articles.get(tui.articles.cursor) else {
                return vec![];
            };
            let request = ActionRequest::DeleteArticle(article.article_id);
            start_action(tui, request)
        }
        _ => vec![],
    }
}

fn submit(tui: &mut TuiState) -> Vec<UiEffect> {
    let Some(fields) = tui.articles.form.fields() else {
        return vec![];
    };
    let request = match tui.app.selected_article_id {
        Some(id) => ActionRequest::UpdateArticle { id, fields },
        None => ActionRequest::CreateArticle(fields),
    };
    tui.articles.reset_form();
    tui.app.select(None);
    start_action(tui, request)
}

/// Drops the selection and empties the form.
pub(crate) fn cancel_edit(tui: &mut TuiState) {
    tui.articles.reset_form();
    tui.app.select(None);
}

pub fn render(tui: &TuiState, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(3)])
        .split(area);

    render_form(tui, frame, chunks[0]);
    render_list(tui, frame, chunks[1]);
}

fn render_form(tui: &TuiState, frame: &mut Frame, area: Rect) {
    let screen = &tui.articles;
    let form = &screen.form;
    let editing = tui.app.selected_article_id.is_some();

    let topic = form
        .topic
        .map_or_else(|| "-- select topic --".to_string(), |t| t.to_string());
    let submit_style = if form.fields().is_some() {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut hint = vec![Span::styled("  [ Enter: Submit ]", submit_style)];
    if editing {
        hint.push(Span::styled(
            "  Ctrl+X: cancel edit",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let lines = vec![
        field_line(
            "Title",
            form.title.clone(),
            screen.focus == ArticlesFocus::Title,
        ),
        field_line(
            "Text",
            form.text.clone(),
            screen.focus == ArticlesFocus::Text,
        ),
        field_line("Topic", topic, screen.focus == ArticlesFocus::Topic),
        Line::from(""),
        Line::from(hint),
    ];

    let title = if editing {
        " Edit Article "
    } else {
        " Create Article "
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_list(tui: &TuiState, frame: &mut Frame, area: Rect) {
    let focused = tui.articles.focus == ArticlesFocus::List;
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Articles ");

    if tui.app.articles.is_empty() {
        let empty = Paragraph::new("No articles yet")
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = tui
        .app
        .articles
        .iter()
        .map(|article| {
            let editing = tui.app.selected_article_id == Some(article.article_id);
            let title_style = if editing {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(article.title.clone(), title_style),
                    Span::styled(
                        format!("  Topic: {}", article.topic),
                        Style::default().fg(Color::Magenta),
                    ),
                ]),
                Line::from(format!("  {}", article.text)),
            ])
        })
        .collect();

    let mut list_state = ListState::default();
    if focused {
        list_state.select(Some(tui.articles.cursor));
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut list_state);
}
