//! BoardFrame component: the departure board itself.
//!
//! ```text
//! ╔═ Departures ═══════════════════════════════════════ LIVE ═╗
//! ║ notice: platform 2 closed for cleaning                    ║
//! ║                      7:45 Depart PlatformA OnTime         ║
//! ║                      Line 2: test run                     ║
//! ║ ███ ███   ███ █ █                                         ║
//! ║ █ █ █ █ █   █ █ █                                         ║
//! ║ █ █ ███   ███ ███                              page 1/2   ║
//! ╚═══════════════════════════════════════════════════════════╝
//! ```
//!
//! Owns input in normal mode. When the body has more lines than fit, pages
//! rotate automatically like a station display.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use board_core::LineTone;

use crate::{
    action::{Action, ComponentId, PromptKind},
    app_state::{AppState, BoardStatus},
    component::Component,
    theme::{
        style_error, style_led, style_muted, style_pending, style_placeholder, C_CLOCK, C_ERROR,
        C_LED_DIM, C_NOTICE, C_TOAST_SUCCESS,
    },
    widgets::{
        big_digits::{big_clock_lines, rendered_width, GLYPH_ROWS},
        pane_chrome::{board_frame, Badge},
    },
};

/// UI ticks (~100ms each) a page stays up before rotating.
const PAGE_HOLD_TICKS: u32 = 50;
/// Below this inner width the clock falls back to plain text.
const MIN_WIDTH_FOR_BIG_CLOCK: u16 = 48;

pub struct BoardFrame {
    page: usize,
    page_count: usize,
    ticks_on_page: u32,
}

impl BoardFrame {
    pub fn new() -> Self {
        Self {
            page: 0,
            page_count: 1,
            ticks_on_page: 0,
        }
    }

    fn next_page(&mut self) {
        self.page = (self.page + 1) % self.page_count.max(1);
        self.ticks_on_page = 0;
    }

    fn prev_page(&mut self) {
        let count = self.page_count.max(1);
        self.page = (self.page + count - 1) % count;
        self.ticks_on_page = 0;
    }

    fn reset_paging(&mut self) {
        self.page = 0;
        self.ticks_on_page = 0;
    }
}

impl Default for BoardFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for BoardFrame {
    fn id(&self) -> ComponentId {
        ComponentId::Board
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                vec![Action::Quit]
            }
            KeyCode::Char('q') => vec![Action::Quit],
            KeyCode::Char('o') => vec![Action::OpenPrompt(PromptKind::OpenFile)],
            KeyCode::Char('n') => vec![Action::OpenPrompt(PromptKind::Notice)],
            KeyCode::Char('r') => vec![Action::Reload],
            KeyCode::Char('L') => vec![Action::ToggleLog],
            KeyCode::Char('?') => vec![Action::ToggleHelp],
            KeyCode::PageDown | KeyCode::Char(' ') => {
                self.next_page();
                vec![]
            }
            KeyCode::PageUp => {
                self.prev_page();
                vec![]
            }
            _ => vec![],
        }
    }

    fn tick(&mut self, _state: &AppState) -> Vec<Action> {
        if self.page_count > 1 {
            self.ticks_on_page += 1;
            if self.ticks_on_page >= PAGE_HOLD_TICKS {
                self.next_page();
            }
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::SelectFile(_) | Action::Reload = action {
            self.reset_paging();
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        frame.render_widget(Clear, area);

        let badge = match state.status {
            BoardStatus::Live => Badge {
                text: "LIVE",
                color: C_TOAST_SUCCESS,
            },
            BoardStatus::Failed => Badge {
                text: "ERR",
                color: C_ERROR,
            },
            BoardStatus::Idle => Badge {
                text: "WAIT",
                color: C_LED_DIM,
            },
        };
        let block = board_frame(&state.title, Some(badge));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let notice_rows = u16::from(state.notice.is_some());
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(notice_rows), Constraint::Min(0)])
            .split(inner);

        if let Some(notice) = &state.notice {
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(" ▶ ", Style::default().fg(C_NOTICE)),
                    Span::styled(
                        notice.as_str(),
                        Style::default().fg(C_NOTICE).add_modifier(Modifier::BOLD),
                    ),
                ])),
                rows[0],
            );
        }

        let big = inner.width >= MIN_WIDTH_FOR_BIG_CLOCK && rows[1].height as usize >= GLYPH_ROWS;
        let clock_text = state.clock_text.as_str();
        let clock_cols = if big {
            rendered_width(clock_text) + 4
        } else {
            clock_text.len() as u16 + 4
        };

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(clock_cols), Constraint::Min(0)])
            .split(rows[1]);

        draw_clock(frame, cols[0], clock_text, big);
        self.draw_body(frame, cols[1], state);
    }
}

impl BoardFrame {
    fn draw_body(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        if area.height == 0 {
            return;
        }
        let total = state.body_lines.len();
        // Leave the bottom row for the page indicator when paging.
        let per_page = if total > area.height as usize {
            (area.height as usize).saturating_sub(1).max(1)
        } else {
            area.height as usize
        };
        self.page_count = total.div_ceil(per_page).max(1);
        if self.page >= self.page_count {
            self.reset_paging();
        }

        let lines: Vec<Line> = state
            .body_lines
            .iter()
            .skip(self.page * per_page)
            .take(per_page)
            .map(|l| {
                let style = match l.tone {
                    LineTone::Normal => style_led(),
                    LineTone::Placeholder => style_placeholder(),
                    LineTone::Error => style_error(),
                    LineTone::Pending => style_pending(),
                };
                Line::from(Span::styled(l.text.clone(), style))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);

        if self.page_count > 1 {
            let indicator = format!("page {}/{} ", self.page + 1, self.page_count);
            let footer = Rect {
                y: area.y + area.height - 1,
                height: 1,
                ..area
            };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(indicator, style_muted())).right_aligned()),
                footer,
            );
        }
    }
}

/// Clock sits in the lower-left corner of its column.
fn draw_clock(frame: &mut Frame, area: Rect, text: &str, big: bool) {
    let style = Style::default().fg(C_CLOCK).add_modifier(Modifier::BOLD);
    let (lines, height) = if big {
        (big_clock_lines(text, style), GLYPH_ROWS as u16)
    } else {
        (vec![Line::from(Span::styled(text.to_string(), style))], 1)
    };
    if area.height < height || area.width < 2 {
        return;
    }
    let target = Rect {
        x: area.x + 1,
        y: area.y + area.height - height,
        width: area.width - 1,
        height,
    };
    frame.render_widget(Paragraph::new(lines), target);
}
