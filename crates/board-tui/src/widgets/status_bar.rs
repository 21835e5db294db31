//! Status bar: bottom line with input mode, last selection and keybindings.

use std::path::Path;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_MODE_NORMAL, C_MODE_PROMPT, C_MUTED, C_SECONDARY};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Prompt,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "BOARD",
            Self::Prompt => "INPUT",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Normal => C_MODE_NORMAL,
            Self::Prompt => C_MODE_PROMPT,
        }
    }
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode, source: Option<&Path>) {
    let mut spans = vec![Span::styled(
        format!(" {} ", mode.label()),
        Style::default()
            .fg(mode.color())
            .add_modifier(Modifier::BOLD),
    )];

    if let Some(name) = source.and_then(|p| p.file_name()).and_then(|n| n.to_str()) {
        spans.push(Span::styled(
            format!("[{}] ", name),
            Style::default().fg(C_SECONDARY),
        ));
    }

    let keys = match mode {
        InputMode::Normal => {
            " o open  r reload  n notice  L log  ? help  q quit"
        }
        InputMode::Prompt => " type  Enter confirm  Esc cancel",
    };
    spans.push(Span::styled(keys, Style::default().fg(C_MUTED)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
