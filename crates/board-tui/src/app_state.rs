//! AppState: shared read-only data passed to all components during render/event.
//!
//! Components read this for board state, but never mutate it.
//! The App event-loop is the only thing that writes to AppState; it refreshes
//! the board snapshot from the compositor after every tick or selection.

use std::collections::VecDeque;
use std::path::PathBuf;

use board_core::{BodyLine, BodyState, ClockText, OverlayCompositor};

use crate::widgets::status_bar::InputMode;

/// Oldest event-log lines are dropped past this many.
pub const EVENT_LOG_CAPACITY: usize = 500;

/// Coarse body state for badges and the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardStatus {
    Idle,
    Live,
    Failed,
}

impl From<&BodyState> for BoardStatus {
    fn from(body: &BodyState) -> Self {
        match body {
            BodyState::Idle => Self::Idle,
            BodyState::Displaying(_) => Self::Live,
            BodyState::Failed(_) => Self::Failed,
        }
    }
}

/// The full shared state of the application.
pub struct AppState {
    // ── Board snapshot ───────────────────────────────────────────────────────
    pub clock_text: ClockText,
    pub body_lines: Vec<BodyLine>,
    pub status: BoardStatus,

    // ── Operator input ───────────────────────────────────────────────────────
    pub title: String,
    pub notice: Option<String>,
    pub last_selection: Option<PathBuf>,
    pub schedule_dir: PathBuf,

    // ── UI mode ──────────────────────────────────────────────────────────────
    pub input_mode: InputMode,

    // ── Observability ────────────────────────────────────────────────────────
    /// Board events as received from the broadcast channel, newest last.
    pub event_log: VecDeque<String>,
    pub log_path: PathBuf,
}

impl AppState {
    pub fn new(title: String, notice: Option<String>, schedule_dir: PathBuf, log_path: PathBuf) -> Self {
        Self {
            clock_text: ClockText::unset(),
            body_lines: Vec::new(),
            status: BoardStatus::Idle,
            title,
            notice,
            last_selection: None,
            schedule_dir,
            input_mode: InputMode::Normal,
            event_log: VecDeque::new(),
            log_path,
        }
    }

    /// Copy what the board currently shows out of the compositor.
    pub fn sync_board(&mut self, board: &OverlayCompositor) {
        self.clock_text = board.clock_text().clone();
        self.body_lines = board.body_lines();
        self.status = BoardStatus::from(board.body());
    }

    pub fn push_event_line(&mut self, line: String) {
        self.event_log.push_back(line);
        while self.event_log.len() > EVENT_LOG_CAPACITY {
            self.event_log.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_core::{event, ScheduleParser};

    fn state() -> AppState {
        AppState::new("Departures".into(), None, PathBuf::from("."), PathBuf::from("x.log"))
    }

    #[test]
    fn sync_copies_compositor_view() {
        let (tx, _rx) = event::channel();
        let mut board = OverlayCompositor::new(tx);
        let mut s = state();

        s.sync_board(&board);
        assert_eq!(s.status, BoardStatus::Idle);
        assert_eq!(s.body_lines[0].text, "Loading System");

        board.apply_selection(Ok(ScheduleParser.parse_str("7,45,Depart,PlatformA,OnTime")));
        s.sync_board(&board);
        assert_eq!(s.status, BoardStatus::Live);
        assert_eq!(s.body_lines[0].text, "7:45 Depart PlatformA OnTime");
    }

    #[test]
    fn event_log_is_bounded() {
        let mut s = state();
        for i in 0..EVENT_LOG_CAPACITY + 10 {
            s.push_event_line(format!("event {i}"));
        }
        assert_eq!(s.event_log.len(), EVENT_LOG_CAPACITY);
        assert_eq!(s.event_log.front().map(String::as_str), Some("event 10"));
    }
}
