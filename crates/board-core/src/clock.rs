//! Blinking board clock.
//!
//! `ClockState` is a plain value: `advance` takes the sampled wall-clock time
//! and returns the next state together with what the tick produced.
//! `ClockTicker` pairs a state with a `TimeSource` so the host only has to call
//! `tick()` from its periodic timer.
//!
//! ```text
//!  tick 1   "09:41"  colon on   MinuteChanged(09:41:07)   <- first tick always reports
//!  tick 2   "09 41"  colon off
//!  tick 3   "09:41"  colon on
//!  ...
//!  tick 54  "09 42"  colon off  MinuteChanged(09:42:00)
//! ```

use std::fmt;

use chrono::{Local, NaiveTime, Timelike};

/// Where the ticker reads the current wall-clock time from.
pub trait TimeSource {
    fn now(&self) -> NaiveTime;
}

/// Host local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

impl<F> TimeSource for F
where
    F: Fn() -> NaiveTime,
{
    fn now(&self) -> NaiveTime {
        self()
    }
}

/// Five-character clock face: `HH:MM` or `HH MM`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClockText(String);

impl ClockText {
    pub fn format(time: NaiveTime, colon_visible: bool) -> Self {
        let sep = if colon_visible { ':' } else { ' ' };
        Self(format!("{:02}{}{:02}", time.hour(), sep, time.minute()))
    }

    /// Shown before the first tick has sampled the clock.
    pub fn unset() -> Self {
        Self("--:--".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn colon_visible(&self) -> bool {
        self.0.as_bytes().get(2) == Some(&b':')
    }
}

impl Default for ClockText {
    fn default() -> Self {
        Self::unset()
    }
}

impl fmt::Display for ClockText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raised on the first tick of every newly observed minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinuteChanged {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl fmt::Display for MinuteChanged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Output of one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub text: ClockText,
    pub minute_changed: Option<MinuteChanged>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockState {
    /// Whether the *next* tick renders the colon.
    pub colon_visible: bool,
    pub last_emitted_minute: Option<u32>,
    /// Most recent sample, `None` until the first tick.
    pub now: Option<NaiveTime>,
}

impl Default for ClockState {
    fn default() -> Self {
        Self {
            colon_visible: true,
            last_emitted_minute: None,
            now: None,
        }
    }
}

impl ClockState {
    pub fn advance(self, now: NaiveTime) -> (Self, Tick) {
        let text = ClockText::format(now, self.colon_visible);

        let minute = now.minute();
        let minute_changed = if self.last_emitted_minute != Some(minute) {
            Some(MinuteChanged {
                hour: now.hour(),
                minute,
                second: now.second(),
            })
        } else {
            None
        };

        let next = Self {
            colon_visible: !self.colon_visible,
            last_emitted_minute: Some(minute),
            now: Some(now),
        };
        (
            next,
            Tick {
                text,
                minute_changed,
            },
        )
    }
}

/// Drives a `ClockState` from a `TimeSource`.
pub struct ClockTicker<S = SystemClock> {
    source: S,
    state: ClockState,
}

impl ClockTicker<SystemClock> {
    pub fn system() -> Self {
        Self::new(SystemClock)
    }
}

impl<S: TimeSource> ClockTicker<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: ClockState::default(),
        }
    }

    /// Sample the time source and advance one step. Never blocks, never fails.
    pub fn tick(&mut self) -> Tick {
        let (next, tick) = self.state.advance(self.source.now());
        self.state = next;
        tick
    }

    pub fn state(&self) -> &ClockState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn t(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn formats_with_and_without_colon() {
        assert_eq!(ClockText::format(t(7, 5, 0), true).as_str(), "07:05");
        assert_eq!(ClockText::format(t(7, 5, 0), false).as_str(), "07 05");
        assert_eq!(ClockText::format(t(23, 59, 59), true).as_str(), "23:59");
        assert_eq!(ClockText::format(t(0, 0, 0), false).as_str(), "00 00");
    }

    #[test]
    fn clock_text_is_always_five_chars() {
        for h in 0..24 {
            for colon in [true, false] {
                assert_eq!(ClockText::format(t(h, 30, 0), colon).as_str().len(), 5);
            }
        }
        assert_eq!(ClockText::unset().as_str().len(), 5);
    }

    #[test]
    fn colon_alternates_every_tick() {
        let mut ticker = ClockTicker::new(|| t(12, 0, 0));
        let mut faces = Vec::new();
        for n in 1..=9 {
            faces.push(ticker.tick().text);
            // Odd tick counts invert the initial `true`.
            assert_eq!(ticker.state().colon_visible, n % 2 == 0);
        }
        for (i, face) in faces.iter().enumerate() {
            assert_eq!(face.colon_visible(), i % 2 == 0, "tick {}", i + 1);
        }
    }

    #[test]
    fn first_tick_always_reports_minute() {
        let mut ticker = ClockTicker::new(|| t(9, 41, 7));
        let first = ticker.tick();
        assert_eq!(
            first.minute_changed,
            Some(MinuteChanged {
                hour: 9,
                minute: 41,
                second: 7
            })
        );
        assert_eq!(ticker.tick().minute_changed, None);
    }

    #[test]
    fn minute_boundary_reports_once() {
        let secs = Cell::new(57u32);
        let source = || {
            let total = secs.get();
            secs.set(total + 1);
            t(9, 41 + total / 60, total % 60)
        };
        let mut ticker = ClockTicker::new(source);

        let events: Vec<_> = (0..8).filter_map(|_| ticker.tick().minute_changed).collect();
        // 09:41:57 on the first tick, then 09:42:00 at the rollover.
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].to_string(), "09:41:57");
        assert_eq!(events[1].to_string(), "09:42:00");
    }

    #[test]
    fn advance_is_a_pure_step() {
        let state = ClockState::default();
        let (a, tick_a) = state.advance(t(10, 0, 0));
        let (b, tick_b) = state.advance(t(10, 0, 0));
        assert_eq!(a, b);
        assert_eq!(tick_a, tick_b);
        assert_eq!(a.now, Some(t(10, 0, 0)));
        assert_eq!(a.last_emitted_minute, Some(0));
    }
}
