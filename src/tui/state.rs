use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};
use std::sync::Arc;
use tokio::sync::Mutex;
use tui_textarea::TextArea;
use unicode_width::UnicodeWidthChar;

use crate::map::{Bounds, MapPresenter, MarkerLayer};
use crate::search::SearchController;
use crate::tui::theme::Theme;

/// What a single input event asks the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Search with the raw field contents.
    Submit(String),
    NextMarker,
    PrevMarker,
    ActivateMarker(usize),
    DismissPopup,
    Quit,
    /// Handled locally (text edit) or ignored.
    None,
}

pub struct MapApp {
    pub title: String,
    pub textarea: TextArea<'static>,
    pub theme: Theme,
    pub bounds: Bounds,
    /// Where the search button was last drawn, for mouse hit-testing.
    pub button_area: Rect,
    /// Where the marker list was last drawn.
    pub list_area: Rect,
    pub spinner_state: usize,
    pub should_quit: bool,
    pub(crate) controller: SearchController<MarkerLayer>,
    pub(crate) presenter: Arc<Mutex<MapPresenter<MarkerLayer>>>,
}

impl MapApp {
    pub fn new(
        title: impl Into<String>,
        controller: SearchController<MarkerLayer>,
        theme: &str,
    ) -> Self {
        let theme = Theme::by_name(theme);
        let mut textarea = TextArea::default();
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title("Search symbols"),
        );
        textarea.set_placeholder_text("keyword, e.g. fire (Enter to search)");
        textarea.set_cursor_line_style(Style::default());
        textarea.set_style(theme.input_style);

        let presenter = controller.presenter();
        Self {
            title: title.into(),
            textarea,
            theme,
            bounds: Bounds::default(),
            button_area: Rect::default(),
            list_area: Rect::default(),
            spinner_state: 0,
            should_quit: false,
            controller,
            presenter,
        }
    }

    pub fn search_text(&self) -> String {
        self.textarea.lines().first().cloned().unwrap_or_default()
    }

    /// Maps a key to an action. Plain edits go straight into the search field.
    pub fn map_key(&mut self, k: KeyEvent) -> AppAction {
        if k.kind != KeyEventKind::Press {
            return AppAction::None;
        }
        match k.code {
            KeyCode::Char('c') | KeyCode::Char('q')
                if k.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                AppAction::Quit
            }
            KeyCode::Enter => AppAction::Submit(self.search_text()),
            KeyCode::Tab => AppAction::NextMarker,
            KeyCode::BackTab => AppAction::PrevMarker,
            KeyCode::Esc => AppAction::DismissPopup,
            // Single-line field: swallow newline-producing and scroll keys.
            KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown => AppAction::None,
            KeyCode::Char('m') if k.modifiers.contains(KeyModifiers::CONTROL) => AppAction::None,
            _ => {
                self.textarea.input(k);
                AppAction::None
            }
        }
    }

    pub fn map_mouse(&self, m: MouseEvent) -> AppAction {
        let MouseEventKind::Down(MouseButton::Left) = m.kind else {
            return AppAction::None;
        };
        let at = Position::new(m.column, m.row);
        if self.button_area.contains(at) {
            return AppAction::Submit(self.search_text());
        }
        // List rows start inside the top border.
        if self.list_area.contains(at)
            && m.row > self.list_area.y
            && m.row + 1 < self.list_area.bottom()
        {
            return AppAction::ActivateMarker((m.row - self.list_area.y - 1) as usize);
        }
        AppAction::None
    }

    /// Applies an action. Searches run in the background.
    pub async fn apply(&mut self, action: AppAction) {
        match action {
            AppAction::Submit(text) => {
                self.controller.submit_search(Some(text));
            }
            AppAction::NextMarker => self.presenter.lock().await.widget_mut().activate_next(),
            AppAction::PrevMarker => self.presenter.lock().await.widget_mut().activate_prev(),
            AppAction::ActivateMarker(i) => {
                self.presenter.lock().await.widget_mut().activate(i);
            }
            AppAction::DismissPopup => self.presenter.lock().await.widget_mut().dismiss_popup(),
            AppAction::Quit => self.should_quit = true,
            AppAction::None => {}
        }
    }
}

pub fn truncate_display(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let mut width = 0usize;
    let mut out = String::new();
    for ch in s.chars() {
        let ch_w = ch.width().unwrap_or(0);
        if ch_w == 0 {
            out.push(ch);
            continue;
        }
        if width + ch_w > max {
            break;
        }
        out.push(ch);
        width += ch_w;
    }
    out
}
