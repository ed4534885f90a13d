//! Log line formatting
//!
//! Every line has the shape
//!
//! ```text
//! level=<level> [ts=<epoch-millis>] <key>[=<value>]... evt=<event>\n
//! ```
//!
//! The level is written verbatim, fields follow in set order and the event
//! always comes last.

use super::error::{LoggerError, Result};
use super::escape::{escape, escape_str};
use super::field_set::FieldSet;
use std::fmt::Write;

/// Key carrying the event of every line
pub const EVENT_KEY: &str = "evt";

/// Key carrying the level of every line
pub const LEVEL_KEY: &str = "level";

/// Key carrying the optional timestamp
pub const TIMESTAMP_KEY: &str = "ts";

/// Format one line with an explicit timestamp
///
/// # Errors
///
/// Returns [`LoggerError::MissingEvent`] if `event` is empty.
///
/// # Example
///
/// ```
/// use logfmtr::{format_line, FieldSet};
///
/// let fields = FieldSet::new().with_field("a", "b").with_field("c", "d");
/// let line = format_line("info", None, &fields, "started").unwrap();
/// assert_eq!(line, "level=info a=b c=d evt=started\n");
/// ```
pub fn format_line(
    level: &str,
    timestamp: Option<i64>,
    fields: &FieldSet,
    event: &str,
) -> Result<String> {
    format_line_with(level, timestamp, fields, None, event)
}

/// Like [`format_line`], with per-call fields written after `fields`
pub fn format_line_with(
    level: &str,
    timestamp: Option<i64>,
    fields: &FieldSet,
    extra: Option<&FieldSet>,
    event: &str,
) -> Result<String> {
    if event.is_empty() {
        return Err(LoggerError::MissingEvent);
    }

    let mut line = String::with_capacity(64);
    line.push_str(LEVEL_KEY);
    line.push('=');
    line.push_str(level);

    if let Some(ts) = timestamp {
        // writing into a String cannot fail
        let _ = write!(line, " {}={}", TIMESTAMP_KEY, ts);
    }

    for (key, value) in fields.iter().chain(extra.into_iter().flat_map(|set| set.iter())) {
        line.push(' ');
        line.push_str(key);
        line.push_str(&escape(value));
    }

    line.push(' ');
    line.push_str(EVENT_KEY);
    line.push_str(&escape_str(event));
    line.push('\n');

    Ok(line)
}

/// Current time in milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Formats lines, stamping them with the wall clock when enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFormatter {
    timestamps: bool,
}

impl LineFormatter {
    pub fn new(timestamps: bool) -> Self {
        Self { timestamps }
    }

    pub fn timestamps(&self) -> bool {
        self.timestamps
    }

    pub fn format(&self, level: &str, fields: &FieldSet, event: &str) -> Result<String> {
        self.format_with(level, fields, None, event)
    }

    pub fn format_with(
        &self,
        level: &str,
        fields: &FieldSet,
        extra: Option<&FieldSet>,
        event: &str,
    ) -> Result<String> {
        let ts = self.timestamps.then(now_millis);
        format_line_with(level, ts, fields, extra, event)
    }
}

impl Default for LineFormatter {
    fn default() -> Self {
        Self::new(true)
    }
}
