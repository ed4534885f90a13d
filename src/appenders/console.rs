//! Console appender implementation

use crate::core::{Appender, LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Standard stream a [`ConsoleAppender`] writes to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleTarget {
    #[default]
    Stdout,
    Stderr,
}

pub struct ConsoleAppender {
    target: ConsoleTarget,
}

impl ConsoleAppender {
    pub fn new(target: ConsoleTarget) -> Self {
        Self { target }
    }

    pub fn stdout() -> Self {
        Self::new(ConsoleTarget::Stdout)
    }

    pub fn stderr() -> Self {
        Self::new(ConsoleTarget::Stderr)
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, line: &str) -> Result<()> {
        let result = match self.target {
            ConsoleTarget::Stdout => std::io::stdout().lock().write_all(line.as_bytes()),
            ConsoleTarget::Stderr => std::io::stderr().lock().write_all(line.as_bytes()),
        };
        result.map_err(|e| LoggerError::io_operation("writing log line", self.name(), e))
    }

    fn flush(&mut self) -> Result<()> {
        match self.target {
            ConsoleTarget::Stdout => std::io::stdout().flush()?,
            ConsoleTarget::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        match self.target {
            ConsoleTarget::Stdout => "stdout",
            ConsoleTarget::Stderr => "stderr",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_stdout() {
        let appender = ConsoleAppender::default();
        assert_eq!(appender.target(), ConsoleTarget::Stdout);
        assert_eq!(appender.name(), "stdout");
    }

    #[test]
    fn test_stderr_write() {
        let mut appender = ConsoleAppender::stderr();
        assert!(appender.append("level=info evt=console-test\n").is_ok());
        assert!(appender.flush().is_ok());
    }
}
