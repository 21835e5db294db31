#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use board_core::TimeSource;
use chrono::NaiveTime;

/// Time source that replays a fixed list of samples, then repeats the last one.
pub struct ScriptedClock {
    samples: RefCell<VecDeque<NaiveTime>>,
    last: RefCell<NaiveTime>,
}

impl ScriptedClock {
    pub fn new(samples: &[(u32, u32, u32)]) -> Self {
        let samples: VecDeque<NaiveTime> = samples.iter().map(|&(h, m, s)| hms(h, m, s)).collect();
        let first = samples.front().copied().unwrap_or_else(|| hms(0, 0, 0));
        Self {
            samples: RefCell::new(samples),
            last: RefCell::new(first),
        }
    }

    /// `count` consecutive one-second samples starting at `h:m:s`.
    pub fn seconds_from(h: u32, m: u32, s: u32, count: u32) -> Self {
        let start = hms(h, m, s);
        let samples: Vec<(u32, u32, u32)> = (0..count)
            .map(|i| {
                use chrono::Timelike;
                let t = start + chrono::Duration::seconds(i64::from(i));
                (t.hour(), t.minute(), t.second())
            })
            .collect();
        Self::new(&samples)
    }
}

impl TimeSource for ScriptedClock {
    fn now(&self) -> NaiveTime {
        if let Some(next) = self.samples.borrow_mut().pop_front() {
            *self.last.borrow_mut() = next;
        }
        *self.last.borrow()
    }
}

pub fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).expect("valid time")
}

pub fn write_schedule(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write schedule fixture");
    path
}
