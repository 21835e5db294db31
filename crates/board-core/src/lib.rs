//! Overlay refresh engine for the departure board: the blinking clock, the
//! schedule file parser, and the compositor that owns what the board shows.

pub mod clock;
pub mod config;
pub mod event;
pub mod overlay;
pub mod platform;
pub mod schedule;

pub use clock::{ClockState, ClockText, ClockTicker, MinuteChanged, SystemClock, Tick, TimeSource};
pub use event::BoardEvent;
pub use overlay::{BodyLine, BodyState, LineTone, OverlayCompositor, OverlayState};
pub use schedule::{
    BoardItem, FailureKind, FileSelection, PlaceholderLine, ScheduleBoard, ScheduleEntry,
    ScheduleError, ScheduleParser,
};
