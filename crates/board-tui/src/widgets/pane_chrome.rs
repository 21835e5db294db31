//! PaneChrome: standardized bordered panes with focus styling and badges.

use crate::theme::{style_focused_border, style_unfocused_border, C_FRAME, C_MUTED, C_PRIMARY};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders},
};

/// A badge shown in the top-right of the pane header (e.g., "LIVE", "ERR").
pub struct Badge<'a> {
    pub text: &'a str,
    pub color: Color,
}

/// Bordered pane for secondary panels (event log, help).
pub fn pane_chrome<'a>(title: &'a str, focused: bool, badge: Option<Badge<'a>>) -> Block<'a> {
    let border_style = if focused {
        style_focused_border()
    } else {
        style_unfocused_border()
    };

    let title_style = if focused {
        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_MUTED)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Line::from(Span::styled(title, title_style)));

    with_badge(block, badge)
}

/// Heavy double-line frame standing in for the board's housing.
pub fn board_frame<'a>(title: &'a str, badge: Option<Badge<'a>>) -> Block<'a> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(C_FRAME))
        .title(Line::from(Span::styled(
            format!(" {} ", title),
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        )));

    with_badge(block, badge)
}

fn with_badge<'a>(block: Block<'a>, badge: Option<Badge<'a>>) -> Block<'a> {
    if let Some(b) = badge {
        block.title_top(
            Line::from(Span::styled(
                format!(" {} ", b.text),
                Style::default().fg(b.color).add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        )
    } else {
        block
    }
}
