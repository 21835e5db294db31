//! OverlayCompositor: single owner of what the board currently shows.
//!
//! # Body states
//! ```text
//!  Idle                 before the first selection; "Loading System"
//!  Displaying(board)    last selection parsed
//!  Failed(kind)         last selection failed; held until the next one
//! ```
//!
//! Every selection lands in Displaying or Failed; Idle is never re-entered.
//! The clock face is updated by `apply_tick` alone and survives every body
//! transition.

use tracing::{info, warn};

use crate::clock::{ClockText, Tick};
use crate::event::{BoardEvent, EventReceiver, EventSender};
use crate::schedule::{BoardItem, FailureKind, ScheduleBoard, ScheduleError};

pub const LOADING_MESSAGE: &str = "Loading System";
pub const NO_FILE_MESSAGE: &str = "No file selected.";
pub const OPEN_FAILED_MESSAGE: &str = "Could not open the file.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BodyState {
    #[default]
    Idle,
    Displaying(ScheduleBoard),
    Failed(FailureKind),
}

impl BodyState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Displaying(_) => "displaying",
            Self::Failed(_) => "failed",
        }
    }
}

pub fn failure_message(kind: FailureKind) -> &'static str {
    match kind {
        FailureKind::NoFileSelected => NO_FILE_MESSAGE,
        FailureKind::Io => OPEN_FAILED_MESSAGE,
    }
}

/// How the presentation layer should colour a body line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTone {
    Normal,
    Placeholder,
    Error,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyLine {
    pub text: String,
    pub tone: LineTone,
}

impl BodyLine {
    fn new(text: impl Into<String>, tone: LineTone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayState {
    pub clock_text: ClockText,
    pub body: BodyState,
}

pub struct OverlayCompositor {
    state: OverlayState,
    events: EventSender,
}

impl OverlayCompositor {
    pub fn new(events: EventSender) -> Self {
        Self {
            state: OverlayState::default(),
            events,
        }
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn clock_text(&self) -> &ClockText {
        &self.state.clock_text
    }

    pub fn body(&self) -> &BodyState {
        &self.state.body
    }

    pub fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }

    pub fn apply_tick(&mut self, tick: Tick) {
        self.state.clock_text = tick.text;
        if let Some(changed) = tick.minute_changed {
            info!("minute changed: {}", changed);
            self.publish(BoardEvent::MinuteChanged(changed));
        }
    }

    /// Replace the body with the outcome of one selection event.
    pub fn apply_selection(&mut self, outcome: Result<ScheduleBoard, ScheduleError>) -> &BodyState {
        let previous = self.state.body.label();
        match outcome {
            Ok(board) => {
                let event = BoardEvent::ScheduleLoaded {
                    entries: board.entries().count(),
                    placeholders: board.placeholder_count(),
                };
                self.state.body = BodyState::Displaying(board);
                self.publish(event);
            }
            Err(err) => {
                let kind = err.kind();
                match &err {
                    ScheduleError::NoFileSelected => info!("no schedule file selected"),
                    ScheduleError::Io { .. } => warn!("schedule load failed: {}", err),
                }
                self.state.body = BodyState::Failed(kind);
                self.publish(BoardEvent::ScheduleFailed {
                    kind,
                    detail: err.to_string(),
                });
            }
        }
        info!("body {} → {}", previous, self.state.body.label());
        &self.state.body
    }

    pub fn body_lines(&self) -> Vec<BodyLine> {
        match &self.state.body {
            BodyState::Idle => vec![BodyLine::new(LOADING_MESSAGE, LineTone::Pending)],
            BodyState::Failed(kind) => {
                vec![BodyLine::new(failure_message(*kind), LineTone::Error)]
            }
            BodyState::Displaying(board) => board
                .items()
                .iter()
                .map(|item| match item {
                    BoardItem::Entry(e) => BodyLine::new(e.to_string(), LineTone::Normal),
                    BoardItem::Placeholder(p) => BodyLine::new(p.to_string(), LineTone::Placeholder),
                })
                .collect(),
        }
    }

    fn publish(&self, event: BoardEvent) {
        // No subscribers is fine; the board keeps running unobserved.
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{ClockState, MinuteChanged};
    use crate::event;
    use crate::schedule::ScheduleParser;
    use chrono::NaiveTime;
    use std::io;
    use std::path::PathBuf;

    fn compositor() -> (OverlayCompositor, EventReceiver) {
        let (tx, rx) = event::channel();
        (OverlayCompositor::new(tx), rx)
    }

    fn io_failure() -> ScheduleError {
        ScheduleError::Io {
            path: PathBuf::from("/nope.csv"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        }
    }

    fn tick_at(state: ClockState, h: u32, m: u32) -> (ClockState, Tick) {
        state.advance(NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    #[test]
    fn starts_idle_with_loading_message() {
        let (c, _rx) = compositor();
        assert_eq!(c.body(), &BodyState::Idle);
        assert_eq!(
            c.body_lines(),
            vec![BodyLine::new(LOADING_MESSAGE, LineTone::Pending)]
        );
    }

    #[test]
    fn selection_outcomes_map_to_states() {
        let (mut c, _rx) = compositor();

        c.apply_selection(ScheduleParser.select_none());
        assert_eq!(c.body(), &BodyState::Failed(FailureKind::NoFileSelected));
        assert_eq!(c.body_lines()[0].text, NO_FILE_MESSAGE);

        c.apply_selection(Err(io_failure()));
        assert_eq!(c.body(), &BodyState::Failed(FailureKind::Io));
        assert_eq!(c.body_lines()[0].text, OPEN_FAILED_MESSAGE);
        assert_eq!(c.body_lines()[0].tone, LineTone::Error);

        c.apply_selection(Ok(ScheduleParser.parse_str("1,2,A,B,C\nx")));
        let lines = c.body_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], BodyLine::new("1:2 A B C", LineTone::Normal));
        assert_eq!(lines[1], BodyLine::new("Line 2: test run", LineTone::Placeholder));
    }

    #[test]
    fn empty_board_displays_nothing() {
        let (mut c, _rx) = compositor();
        c.apply_selection(Ok(ScheduleBoard::default()));
        assert!(matches!(c.body(), BodyState::Displaying(b) if b.is_empty()));
        assert!(c.body_lines().is_empty());
    }

    #[test]
    fn clock_survives_body_transitions() {
        let (mut c, _rx) = compositor();
        let (state, tick) = tick_at(ClockState::default(), 6, 30);
        c.apply_tick(tick);
        assert_eq!(c.clock_text().as_str(), "06:30");

        c.apply_selection(Err(io_failure()));
        assert_eq!(c.clock_text().as_str(), "06:30");
        c.apply_selection(Ok(ScheduleBoard::default()));
        assert_eq!(c.clock_text().as_str(), "06:30");

        let (_, tick) = tick_at(state, 6, 30);
        c.apply_tick(tick);
        assert_eq!(c.clock_text().as_str(), "06 30");
    }

    #[test]
    fn publishes_minute_and_schedule_events() {
        let (mut c, mut rx) = compositor();

        let (state, tick) = tick_at(ClockState::default(), 8, 0);
        c.apply_tick(tick);
        let (_, tick) = tick_at(state, 8, 0);
        c.apply_tick(tick);
        c.apply_selection(Ok(ScheduleParser.parse_str("1,2,A,B,C\nx")));
        c.apply_selection(ScheduleParser.select_none());

        assert_eq!(
            rx.try_recv().unwrap(),
            BoardEvent::MinuteChanged(MinuteChanged {
                hour: 8,
                minute: 0,
                second: 0
            })
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            BoardEvent::ScheduleLoaded {
                entries: 1,
                placeholders: 1
            }
        );
        assert!(matches!(
            rx.try_recv().unwrap(),
            BoardEvent::ScheduleFailed {
                kind: FailureKind::NoFileSelected,
                ..
            }
        ));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let (tx, rx) = event::channel();
        drop(rx);
        let mut c = OverlayCompositor::new(tx);
        c.apply_selection(ScheduleParser.select_none());
        assert_eq!(c.body().label(), "failed");
    }
}
