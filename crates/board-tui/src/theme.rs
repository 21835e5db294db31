//! Color palette and style constants for the departure board.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(10, 10, 14);
pub const C_LED: Color = Color::Rgb(255, 176, 40); // amber dot-matrix
pub const C_LED_DIM: Color = Color::Rgb(96, 66, 16);
pub const C_CLOCK: Color = Color::Rgb(255, 196, 80);
pub const C_PLACEHOLDER: Color = Color::Rgb(255, 140, 0); // orange test-run marker
pub const C_ERROR: Color = Color::Rgb(255, 80, 80);
pub const C_MUTED: Color = Color::Rgb(72, 72, 88);
pub const C_SECONDARY: Color = Color::Rgb(115, 115, 138);
pub const C_PRIMARY: Color = Color::Rgb(210, 210, 225);
pub const C_FRAME: Color = Color::Rgb(60, 60, 76);
pub const C_PANEL_BORDER: Color = Color::Rgb(40, 40, 52);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(120, 100, 200);
pub const C_NOTICE: Color = Color::Rgb(120, 200, 255);
pub const C_PROMPT_BG: Color = Color::Rgb(20, 20, 32);
pub const C_PROMPT_FG: Color = Color::Rgb(255, 200, 80);
pub const C_TOAST_INFO: Color = Color::Rgb(80, 160, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(80, 200, 120);
pub const C_TOAST_WARNING: Color = Color::Rgb(255, 184, 80);
pub const C_TOAST_ERROR: Color = Color::Rgb(255, 95, 95);
pub const C_MODE_NORMAL: Color = Color::Rgb(115, 115, 138);
pub const C_MODE_PROMPT: Color = Color::Rgb(255, 200, 80);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_led() -> Style {
    Style::default().fg(C_LED)
}

pub fn style_placeholder() -> Style {
    Style::default().fg(C_PLACEHOLDER)
}

pub fn style_error() -> Style {
    Style::default().fg(C_ERROR).add_modifier(Modifier::BOLD)
}

pub fn style_pending() -> Style {
    Style::default().fg(C_LED_DIM).add_modifier(Modifier::ITALIC)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

pub fn style_prompt() -> Style {
    Style::default().fg(C_PROMPT_FG).bg(C_PROMPT_BG)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}
