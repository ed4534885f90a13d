//! Serializable logger options
//!
//! `LoggerOptions` mirrors [`LoggerBuilder`] for configuration read from a
//! file or the environment. Every key is optional:
//!
//! ```json
//! {
//!   "name": "api",
//!   "ts": false,
//!   "output": { "file": "/var/log/api.log" },
//!   "fields": { "service": "api", "region": "eu-1" }
//! }
//! ```

use super::error::{LoggerError, Result};
use super::field_set::FieldSet;
use super::logger::{Logger, LoggerBuilder, DEFAULT_LOGGER_NAME};
use crate::appenders::{ConsoleAppender, FileAppender};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where lines go
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    #[default]
    Stdout,
    Stderr,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerOptions {
    pub name: String,
    /// Emit `ts=<epoch-millis>` on every line
    pub ts: bool,
    pub output: OutputTarget,
    pub fields: FieldSet,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            name: DEFAULT_LOGGER_NAME.to_string(),
            ts: true,
            output: OutputTarget::default(),
            fields: FieldSet::new(),
        }
    }
}

impl LoggerOptions {
    /// Parse options from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Turn the options into a builder, opening the output if needed
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` for an empty file path, or the file appender's
    /// error if the file cannot be opened.
    pub fn into_builder(self) -> Result<LoggerBuilder> {
        let builder = Logger::builder()
            .name(self.name)
            .timestamps(self.ts)
            .fields(self.fields);

        let builder = match self.output {
            OutputTarget::Stdout => builder.appender(ConsoleAppender::stdout()),
            OutputTarget::Stderr => builder.appender(ConsoleAppender::stderr()),
            OutputTarget::File(path) => {
                if path.as_os_str().is_empty() {
                    return Err(LoggerError::config("LoggerOptions", "output file path is empty"));
                }
                builder.appender(FileAppender::new(path)?)
            }
        };

        Ok(builder)
    }

    pub fn build(self) -> Result<Logger> {
        Ok(self.into_builder()?.build())
    }
}
