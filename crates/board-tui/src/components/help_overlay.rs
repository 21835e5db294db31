//! HelpOverlay component: centered popup with the keyboard reference.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_BG, C_MUTED, C_PRIMARY, C_SECONDARY},
    widgets::pane_chrome::pane_chrome,
};

pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for HelpOverlay {
    fn id(&self) -> ComponentId {
        ComponentId::HelpOverlay
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.visible {
            return vec![];
        }
        match key.code {
            KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc => vec![Action::ToggleHelp],
            // Swallow everything else while open.
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::ToggleHelp = action {
            self.toggle();
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        if !self.visible {
            return;
        }
        let popup = centered_rect(60, 21, area);
        let log_line = format!(" log file: {}", state.log_path.display());

        let lines = vec![
            section("schedule"),
            help_row("o", "open a schedule file (Esc = no file)"),
            help_row("r", "reload the last selection"),
            help_row("pg up / pg dn", "previous / next page"),
            help_row("space", "next page"),
            Line::from(""),
            section("board"),
            help_row("n", "edit operator notice (empty clears)"),
            help_row("L", "toggle event log"),
            help_row("↑ / ↓  g / G", "scroll event log"),
            help_row("?", "toggle this help"),
            help_row("q / Ctrl+C", "quit"),
            Line::from(""),
            section("prompt"),
            help_row("enter", "confirm"),
            help_row("esc", "dismiss"),
            Line::from(""),
            Line::from(Span::styled(log_line, Style::default().fg(C_SECONDARY))),
            Line::from(Span::styled(
                " press ? or esc to close",
                Style::default().fg(C_MUTED),
            )),
        ];

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .block(pane_chrome(" keys ", true, None).style(Style::default().bg(C_BG)))
                .wrap(Wrap { trim: false }),
            popup,
        );
    }
}

fn section(name: &str) -> Line<'_> {
    Line::from(Span::styled(
        format!(" {}", name),
        Style::default().fg(C_MUTED).add_modifier(Modifier::BOLD),
    ))
}

fn help_row<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!("{:<16}", key),
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc, Style::default().fg(C_SECONDARY)),
    ])
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}
