//! Board notifications for observers (event log panel, tracing, ...).
//!
//! The compositor publishes on a `tokio::sync::broadcast` channel and never
//! waits on subscribers; sending with no subscriber attached is not an error.

use std::fmt;

use tokio::sync::broadcast;

use crate::clock::MinuteChanged;
use crate::schedule::FailureKind;

pub const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// First tick of a newly observed minute.
    MinuteChanged(MinuteChanged),
    /// A selection produced a board.
    ScheduleLoaded { entries: usize, placeholders: usize },
    /// A selection failed; `detail` carries the underlying cause for logs.
    ScheduleFailed { kind: FailureKind, detail: String },
}

impl fmt::Display for BoardEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinuteChanged(m) => write!(f, "minute changed: {}", m),
            Self::ScheduleLoaded {
                entries,
                placeholders,
            } => write!(
                f,
                "schedule loaded: {} entries, {} placeholders",
                entries, placeholders
            ),
            Self::ScheduleFailed { detail, .. } => write!(f, "schedule failed: {}", detail),
        }
    }
}

pub type EventSender = broadcast::Sender<BoardEvent>;
pub type EventReceiver = broadcast::Receiver<BoardEvent>;

pub fn channel() -> (EventSender, EventReceiver) {
    broadcast::channel(EVENT_CHANNEL_CAPACITY)
}
