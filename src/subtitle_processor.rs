use std::borrow::Cow;
use std::fmt;
use std::io::Write;

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::errors::SrtError;

// @module: SRT parsing, cue coalescing and canonical emission

// @const: Loose SRT timestamp line, e.g. "0: 1: 2,342 -->  0: 1: 5,334"
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?-u)^(\d+):\s*(\d+):\s*(\d+),\s*(\d+)\s+-->\s+\s*(\d+):\s*(\d+):\s*(\d+),\s*(\d+)$",
    )
    .unwrap()
});

/// Canonical `HH:MM:SS,mmm` timestamp.
///
/// Stored as text: fields are zero-padded, never reinterpreted, so
/// fixed-width timestamps compare the same as strings and as times.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(String);

impl Timestamp {
    /// Build a timestamp from decimal digit fields of any width
    pub fn from_fields(hours: &str, minutes: &str, seconds: &str, millis: &str) -> Self {
        Timestamp(format!("{:0>2}:{:0>2}:{:0>2},{:0>3}", hours, minutes, seconds, millis))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Total milliseconds, `None` if a field overflows
    pub fn to_millis(&self) -> Option<u64> {
        let mut parts = self.0.split([':', ',']);
        let hours: u64 = parts.next()?.parse().ok()?;
        let minutes: u64 = parts.next()?.parse().ok()?;
        let seconds: u64 = parts.next()?.parse().ok()?;
        let millis: u64 = parts.next()?.parse().ok()?;

        hours
            .checked_mul(3_600_000)?
            .checked_add(minutes.checked_mul(60_000)?)?
            .checked_add(seconds.checked_mul(1_000)?)?
            .checked_add(millis)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// @struct: Single subtitle cue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    // @field: Start timestamp
    pub start: Timestamp,

    // @field: End timestamp
    pub end: Timestamp,

    // @field: Trimmed text lines joined by '\n'
    pub text: String,
}

impl SubtitleEntry {
    pub fn new(start: Timestamp, end: Timestamp, text: String) -> Self {
        SubtitleEntry { start, end, text }
    }

    /// Whether `next` repeats this cue's text and starts exactly where it ends
    pub fn is_continued_by(&self, next: &SubtitleEntry) -> bool {
        self.end == next.start && self.text == next.text
    }

    /// End earlier than start; only detectable when both fit in u64 millis
    pub fn has_reversed_interval(&self) -> bool {
        match (self.start.to_millis(), self.end.to_millis()) {
            (Some(start), Some(end)) => end < start,
            _ => false,
        }
    }
}

// @enum: Parser state, one variant per expected line kind
#[derive(Debug)]
enum ParseState {
    ExpectIndex,
    ExpectTime,
    ExpectText {
        start: Timestamp,
        end: Timestamp,
        lines: Vec<String>,
    },
}

/// Ordered list of cues; indices are assigned when emitted
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SubtitleCollection {
    /// List of subtitle entries
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    pub fn new() -> Self {
        SubtitleCollection { entries: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry as is
    pub fn push(&mut self, entry: SubtitleEntry) {
        self.entries.push(entry);
    }

    /// Append an entry, or extend the last one if `entry` continues it.
    ///
    /// Returns `true` when the entry was merged into its predecessor.
    pub fn push_coalescing(&mut self, entry: SubtitleEntry) -> bool {
        if let Some(last) = self.entries.last_mut() {
            if last.is_continued_by(&entry) {
                debug!(
                    "Merging cue {} --> {} into previous cue ending {}",
                    entry.start, entry.end, last.end
                );
                last.end = entry.end;
                return true;
            }
        }

        self.entries.push(entry);
        false
    }

    /// Parse SRT content from UTF-8 bytes.
    ///
    /// Every line is trimmed and fed to a three-state machine
    /// (index, timestamp, text). Any malformed line aborts the parse with the
    /// 1-based line number. With `coalesce` set, contiguous cues with equal
    /// text are merged as they are finalized.
    pub fn parse_srt_bytes(content: &[u8], coalesce: bool) -> Result<Self, SrtError> {
        let mut collection = SubtitleCollection::new();
        let mut state = ParseState::ExpectIndex;
        let mut line_count = 0;
        let mut reported_invalid_utf8 = false;

        for raw_line in split_lines(content) {
            line_count += 1;

            let decoded = String::from_utf8_lossy(raw_line);
            if matches!(decoded, Cow::Owned(_)) && !reported_invalid_utf8 {
                warn!("Invalid UTF-8 at line {}, replacing undecodable bytes", line_count);
                reported_invalid_utf8 = true;
            }
            let line = decoded.trim();

            state = match state {
                ParseState::ExpectIndex => {
                    if line.is_empty() {
                        ParseState::ExpectIndex
                    } else {
                        line.parse::<u64>().map_err(|_| SrtError::ParseIndex {
                            line: line_count,
                            content: line.to_string(),
                        })?;
                        ParseState::ExpectTime
                    }
                }
                ParseState::ExpectTime => {
                    let (start, end) = parse_time_line(line).ok_or_else(|| SrtError::ParseTime {
                        line: line_count,
                        content: line.to_string(),
                    })?;
                    ParseState::ExpectText { start, end, lines: Vec::new() }
                }
                ParseState::ExpectText { start, end, mut lines } => {
                    if line.is_empty() {
                        collection.finalize(SubtitleEntry::new(start, end, lines.join("\n")), coalesce, line_count);
                        ParseState::ExpectIndex
                    } else {
                        lines.push(line.to_string());
                        ParseState::ExpectText { start, end, lines }
                    }
                }
            };
        }

        match state {
            ParseState::ExpectIndex => {}
            ParseState::ExpectTime => {
                return Err(SrtError::ParseTime {
                    line: line_count + 1,
                    content: String::new(),
                });
            }
            ParseState::ExpectText { lines, .. } if lines.is_empty() => {
                return Err(SrtError::ParseText { line: line_count + 1 });
            }
            ParseState::ExpectText { start, end, lines } => {
                collection.finalize(SubtitleEntry::new(start, end, lines.join("\n")), coalesce, line_count);
            }
        }

        Ok(collection)
    }

    // @finalizes: A parsed cue ending at `line`
    fn finalize(&mut self, entry: SubtitleEntry, coalesce: bool, line: usize) {
        if entry.has_reversed_interval() {
            warn!("Cue ending at line {} ends before it starts: {} --> {}", line, entry.start, entry.end);
        }

        if coalesce {
            self.push_coalescing(entry);
        } else {
            self.push(entry);
        }
    }

    /// Canonical SRT bytes, UTF-8 without BOM
    pub fn to_srt_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Write canonical SRT to `writer`
    pub fn write_srt<W: Write>(&self, writer: &mut W) -> Result<(), SrtError> {
        write!(writer, "{}", self)?;
        writer.flush()?;
        Ok(())
    }
}

/// Canonical SRT: 1-based index, timestamp line, text, blank separator
impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            writeln!(f, "{}", i + 1)?;
            writeln!(f, "{} --> {}", entry.start, entry.end)?;
            writeln!(f, "{}", entry.text)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

// @splits: On '\n'; a final terminator does not open an extra line
fn split_lines(content: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = content.strip_suffix(b"\n").unwrap_or(content);
    let empty = content.is_empty();
    body.split(|byte| *byte == b'\n').filter(move |_| !empty)
}

// @parses: Timestamp line into canonical start/end
fn parse_time_line(line: &str) -> Option<(Timestamp, Timestamp)> {
    let caps = TIMESTAMP_REGEX.captures(line)?;
    Some((timestamp_at(&caps, 1), timestamp_at(&caps, 5)))
}

fn timestamp_at(caps: &Captures, first: usize) -> Timestamp {
    Timestamp::from_fields(&caps[first], &caps[first + 1], &caps[first + 2], &caps[first + 3])
}
