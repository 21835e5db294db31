//! EventLog component: scrollable history of board events.
//!
//! Collapsed it shows only the newest event on one row; `L` expands it into a
//! bordered panel under the board. Sticks to the bottom while new events
//! arrive unless the operator has scrolled up.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_MUTED, C_SECONDARY},
    widgets::pane_chrome::pane_chrome,
};

pub struct EventLog {
    pub expanded: bool,
    scroll: usize,
    last_len: usize,
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            expanded: false,
            scroll: 0,
            last_len: 0,
        }
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
        if self.expanded {
            self.scroll = usize::MAX;
        }
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for EventLog {
    fn id(&self) -> ComponentId {
        ComponentId::EventLog
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.expanded {
            return vec![];
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Home | KeyCode::Char('g') => self.scroll = 0,
            KeyCode::End | KeyCode::Char('G') => self.scroll = usize::MAX,
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::ToggleLog = action {
            self.toggle();
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        if area.height == 0 {
            return;
        }
        frame.render_widget(Clear, area);

        if !self.expanded || area.height <= 2 {
            let last = state
                .event_log
                .back()
                .map(String::as_str)
                .unwrap_or("(no events)");
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(" events ", Style::default().fg(C_MUTED)),
                    Span::styled(last, Style::default().fg(C_SECONDARY)),
                ])),
                area,
            );
            return;
        }

        let title = format!(" events ({}) ", state.event_log.len());
        let block = pane_chrome(&title, focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let height = inner.height as usize;
        let len = state.event_log.len();
        let max_scroll = len.saturating_sub(height);

        if len > self.last_len {
            if self.scroll >= max_scroll.saturating_sub(1) {
                self.scroll = usize::MAX;
            }
            self.last_len = len;
        }
        self.scroll = self.scroll.min(max_scroll);

        let lines: Vec<Line> = state
            .event_log
            .iter()
            .skip(self.scroll)
            .take(height)
            .map(|msg| {
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(msg.as_str(), Style::default().fg(C_MUTED)),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}
