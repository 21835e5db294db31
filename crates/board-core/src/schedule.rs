//! Schedule file ingestion.
//!
//! ## Record format (one per line, no header)
//!
//!   hour,minute,type,detail,remark
//!
//! Fields are split on `,` with no quoting or escaping and trimmed afterwards.
//! Empty fields at the end of a line do not count. Anything past the fifth
//! field is ignored. A line with fewer than five
//! fields is kept as a numbered placeholder so the board still shows that
//! something was there.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

const FIELD_COUNT: usize = 5;

/// One fully-specified scheduled item. Hour and minute stay as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub hour: String,
    pub minute: String,
    /// The record's `type` column.
    pub kind: String,
    pub detail: String,
    pub remark: String,
}

impl fmt::Display for ScheduleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {} {} {}",
            self.hour, self.minute, self.kind, self.detail, self.remark
        )
    }
}

/// A line that did not carry five fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderLine {
    /// 1-based position of the line in the file.
    pub line_number: usize,
}

impl fmt::Display for PlaceholderLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: test run", self.line_number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardItem {
    Entry(ScheduleEntry),
    Placeholder(PlaceholderLine),
}

impl fmt::Display for BoardItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entry(e) => fmt::Display::fmt(e, f),
            Self::Placeholder(p) => fmt::Display::fmt(p, f),
        }
    }
}

/// The ordered result of one parse pass. Replaced wholesale on every selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleBoard {
    items: Vec<BoardItem>,
}

impl ScheduleBoard {
    pub fn new(items: Vec<BoardItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[BoardItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.items.iter().filter_map(|item| match item {
            BoardItem::Entry(e) => Some(e),
            BoardItem::Placeholder(_) => None,
        })
    }

    pub fn placeholder_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, BoardItem::Placeholder(_)))
            .count()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// The operator dismissed the picker.
    #[error("no file selected")]
    NoFileSelected,
    /// Missing, unreadable, or interrupted mid-read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScheduleError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::NoFileSelected => FailureKind::NoFileSelected,
            Self::Io { .. } => FailureKind::Io,
        }
    }
}

/// Cause-free classification of a `ScheduleError`, cheap to clone and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NoFileSelected,
    Io,
}

/// Outcome of the host's file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSelection {
    Path(PathBuf),
    None,
}

impl From<Option<PathBuf>> for FileSelection {
    fn from(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => Self::Path(p),
            None => Self::None,
        }
    }
}

/// Turns a line stream into a `ScheduleBoard`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleParser;

impl ScheduleParser {
    pub fn new() -> Self {
        Self
    }

    pub fn load(&self, selection: &FileSelection) -> Result<ScheduleBoard, ScheduleError> {
        match selection {
            FileSelection::Path(path) => self.parse_file(path),
            FileSelection::None => self.select_none(),
        }
    }

    pub fn select_none(&self) -> Result<ScheduleBoard, ScheduleError> {
        Err(ScheduleError::NoFileSelected)
    }

    pub fn parse_file(&self, path: &Path) -> Result<ScheduleBoard, ScheduleError> {
        let io_err = |source| ScheduleError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_err)?;
        let board = self.parse(BufReader::new(file)).map_err(io_err)?;
        info!(
            "parsed {}: {} items ({} placeholders)",
            path.display(),
            board.len(),
            board.placeholder_count()
        );
        Ok(board)
    }

    /// Parse every line of `reader`. Any read error discards what was parsed so far.
    ///
    /// Lines end at `\n`, `\r\n` or a lone `\r`. Bytes that are not valid
    /// UTF-8 are replaced with U+FFFD rather than failing the file.
    pub fn parse<R: BufRead>(&self, mut reader: R) -> io::Result<ScheduleBoard> {
        let mut items = Vec::new();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let chunk = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
            let chunk = chunk.strip_suffix(b"\r").unwrap_or(chunk);
            for raw in chunk.split(|&b| b == b'\r') {
                let line = String::from_utf8_lossy(raw);
                items.push(parse_line(&line, items.len() + 1));
            }
        }
        Ok(ScheduleBoard::new(items))
    }

    /// In-memory variant of `parse`; reading a byte slice cannot fail.
    pub fn parse_str(&self, text: &str) -> ScheduleBoard {
        self.parse(text.as_bytes()).unwrap_or_default()
    }
}

/// Trailing empty fields are dropped before counting, so `1,2,A,B,` is a
/// placeholder while `1,2,A,B, ` is an entry with an empty remark.
fn parse_line(line: &str, line_number: usize) -> BoardItem {
    let mut fields: Vec<&str> = line.split(',').collect();
    while fields.last() == Some(&"") {
        fields.pop();
    }
    if fields.len() < FIELD_COUNT {
        debug!("line {}: {} fields, placeholder", line_number, fields.len());
        return BoardItem::Placeholder(PlaceholderLine { line_number });
    }
    BoardItem::Entry(ScheduleEntry {
        hour: fields[0].trim().to_string(),
        minute: fields[1].trim().to_string(),
        kind: fields[2].trim().to_string(),
        detail: fields[3].trim().to_string(),
        remark: fields[4].trim().to_string(),
    })
}
