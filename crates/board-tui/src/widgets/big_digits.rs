//! Block-digit rendering of the five-character clock face.
//!
//! Each digit is a 3×5 cell glyph; the colon (and the space that replaces it
//! on alternate ticks) is one column wide, so the face never shifts sideways.

use ratatui::{
    style::Style,
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

pub const GLYPH_ROWS: usize = 5;

type Glyph = [&'static str; GLYPH_ROWS];

const DIGITS: [Glyph; 10] = [
    ["███", "█ █", "█ █", "█ █", "███"],
    ["  █", "  █", "  █", "  █", "  █"],
    ["███", "  █", "███", "█  ", "███"],
    ["███", "  █", "███", "  █", "███"],
    ["█ █", "█ █", "███", "  █", "  █"],
    ["███", "█  ", "███", "  █", "███"],
    ["███", "█  ", "███", "█ █", "███"],
    ["███", "  █", "  █", "  █", "  █"],
    ["███", "█ █", "███", "█ █", "███"],
    ["███", "█ █", "███", "  █", "███"],
];
const COLON: Glyph = [" ", "█", " ", "█", " "];
const GAP: Glyph = [" ", " ", " ", " ", " "];
const DASH: Glyph = ["   ", "   ", "███", "   ", "   "];

fn glyph(c: char) -> Glyph {
    match c {
        '0'..='9' => DIGITS[(c as u8 - b'0') as usize],
        ':' => COLON,
        '-' => DASH,
        _ => GAP,
    }
}

/// The five text rows of `text` in block glyphs, one space between glyphs.
pub fn render_rows(text: &str) -> Vec<String> {
    (0..GLYPH_ROWS)
        .map(|row| {
            text.chars()
                .map(|c| glyph(c)[row])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Terminal columns needed to draw `text`.
pub fn rendered_width(text: &str) -> u16 {
    render_rows(text)
        .first()
        .map(|row| UnicodeWidthStr::width(row.as_str()) as u16)
        .unwrap_or(0)
}

pub fn big_clock_lines(text: &str, style: Style) -> Vec<Line<'static>> {
    render_rows(text)
        .into_iter()
        .map(|row| Line::from(Span::styled(row, style)))
        .collect()
}
