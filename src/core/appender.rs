//! Appender trait for log output destinations

use super::error::Result;

/// Destination for formatted lines
///
/// `line` is a complete logfmt line including its trailing newline and must
/// be written as-is. Errors are returned to the emitting caller.
pub trait Appender: Send {
    fn append(&mut self, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
