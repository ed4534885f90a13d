//! Main logger implementation
//!
//! A [`Logger`] is an immutable pair of a shared configuration and a field
//! set. Deriving a logger with [`Logger::with_fields`] never touches the
//! source: the new logger points at the same configuration (and therefore the
//! same appender) but carries its own merged fields.

use super::{
    appender::Appender,
    error::Result,
    field_set::{FieldSet, FieldValue},
    formatter::LineFormatter,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    process_info::{ProcessInfo, SystemProcessInfo},
};
use crate::appenders::ConsoleAppender;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Name given to loggers built without one
pub const DEFAULT_LOGGER_NAME: &str = "default";

/// Configuration shared by a logger and everything derived from it
pub struct LoggerConfig {
    name: String,
    formatter: LineFormatter,
    appender: Mutex<Box<dyn Appender>>,
    metrics: LoggerMetrics,
}

impl LoggerConfig {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timestamps(&self) -> bool {
        self.formatter.timestamps()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("name", &self.name)
            .field("timestamps", &self.timestamps())
            .field("appender", &self.appender.lock().name())
            .finish()
    }
}

#[derive(Clone)]
pub struct Logger {
    config: Arc<LoggerConfig>,
    fields: Arc<FieldSet>,
}

impl Logger {
    /// Logger writing to stdout with timestamps enabled
    #[must_use]
    pub fn new() -> Self {
        LoggerBuilder::new().build()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use logfmtr::prelude::*;
    ///
    /// let sink = MemoryAppender::new();
    /// let logger = Logger::builder()
    ///     .name("api")
    ///     .timestamps(false)
    ///     .appender(sink.clone())
    ///     .field("service", "billing")
    ///     .build();
    ///
    /// logger.info("started").unwrap();
    /// assert_eq!(sink.contents(), "level=info service=billing evt=started\n");
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn name(&self) -> &str {
        self.config.name()
    }

    pub fn timestamps(&self) -> bool {
        self.config.timestamps()
    }

    /// Fields written on every line of this logger
    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn config(&self) -> &Arc<LoggerConfig> {
        &self.config
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        self.config.metrics()
    }

    /// True if both handles are the same logger: same configuration and
    /// same field set
    pub fn ptr_eq(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.config, &other.config) && Arc::ptr_eq(&self.fields, &other.fields)
    }

    /// True if both loggers write through the same configuration
    pub fn shares_config(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.config, &other.config)
    }

    /// Derive a logger with `additions` merged over this logger's fields
    ///
    /// Existing keys are overwritten in place, new keys are appended in the
    /// order supplied. `self` is not modified.
    ///
    /// ```
    /// use logfmtr::prelude::*;
    ///
    /// let sink = MemoryAppender::new();
    /// let base = Logger::builder().timestamps(false).appender(sink.clone()).build();
    ///
    /// let req = base.with_fields([("rid", "7f3a"), ("method", "GET")]);
    /// req.info("req-start").unwrap();
    /// base.info("idle").unwrap();
    ///
    /// assert_eq!(sink.lines(), vec![
    ///     "level=info rid=7f3a method=GET evt=req-start",
    ///     "level=info evt=idle",
    /// ]);
    /// ```
    #[must_use]
    pub fn with_fields<I, K, V>(&self, additions: I) -> Logger
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        Logger {
            config: Arc::clone(&self.config),
            fields: Arc::new(self.fields.with_fields(additions)),
        }
    }

    /// Derive a logger with one extra field
    #[must_use]
    pub fn with_field<K, V>(&self, key: K, value: V) -> Logger
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.with_fields([(key, value)])
    }

    /// Derive a logger carrying `pid=<current process id>`
    #[must_use]
    pub fn with_pid(&self) -> Logger {
        self.with_pid_from(&SystemProcessInfo)
    }

    /// Derive a logger carrying `hostname=<local host name>`
    #[must_use]
    pub fn with_hostname(&self) -> Logger {
        self.with_hostname_from(&SystemProcessInfo)
    }

    #[must_use]
    pub fn with_pid_from(&self, info: &impl ProcessInfo) -> Logger {
        self.with_field("pid", info.pid())
    }

    #[must_use]
    pub fn with_hostname_from(&self, info: &impl ProcessInfo) -> Logger {
        self.with_field("hostname", info.hostname())
    }

    /// Format a line with this logger's fields without writing it
    pub fn format(&self, level: LogLevel, event: impl AsRef<str>) -> Result<String> {
        self.config
            .formatter
            .format(level.as_str(), &self.fields, event.as_ref())
    }

    /// Write one line at `level`
    ///
    /// # Errors
    ///
    /// [`LoggerError::MissingEvent`](super::LoggerError::MissingEvent) when
    /// `event` is empty, or whatever the appender returns.
    pub fn log(&self, level: LogLevel, event: impl AsRef<str>) -> Result<()> {
        self.write_line(level.as_str(), None, event.as_ref())
    }

    /// Write one line with per-call fields after the logger's own
    ///
    /// The per-call fields are not retained.
    pub fn log_with(
        &self,
        level: LogLevel,
        fields: &FieldSet,
        event: impl AsRef<str>,
    ) -> Result<()> {
        self.write_line(level.as_str(), Some(fields), event.as_ref())
    }

    /// Write one line with a free-form level token
    pub fn emit(&self, level: &str, event: impl AsRef<str>) -> Result<()> {
        self.write_line(level, None, event.as_ref())
    }

    fn write_line(&self, level: &str, extra: Option<&FieldSet>, event: &str) -> Result<()> {
        let line = match self.config.formatter.format_with(level, &self.fields, extra, event) {
            Ok(line) => line,
            Err(e) => {
                self.config.metrics.record_rejected();
                return Err(e);
            }
        };

        let mut appender = self.config.appender.lock();
        match appender.append(&line) {
            Ok(()) => {
                self.config.metrics.record_written(line.len());
                Ok(())
            }
            Err(e) => {
                self.config.metrics.record_failed();
                Err(e)
            }
        }
    }

    pub fn flush(&self) -> Result<()> {
        self.config.appender.lock().flush()
    }

    #[inline]
    pub fn debug(&self, event: impl AsRef<str>) -> Result<()> {
        self.log(LogLevel::Debug, event)
    }

    #[inline]
    pub fn info(&self, event: impl AsRef<str>) -> Result<()> {
        self.log(LogLevel::Info, event)
    }

    /// Alias of [`Logger::info`]
    #[inline]
    pub fn print(&self, event: impl AsRef<str>) -> Result<()> {
        self.log(LogLevel::Info, event)
    }

    #[inline]
    pub fn warn(&self, event: impl AsRef<str>) -> Result<()> {
        self.log(LogLevel::Warn, event)
    }

    #[inline]
    pub fn error(&self, event: impl AsRef<str>) -> Result<()> {
        self.log(LogLevel::Error, event)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.config.name)
            .field("timestamps", &self.timestamps())
            .field("fields", &self.fields.format_fields())
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// Defaults: stdout, timestamps on, name `"default"`, no fields.
pub struct LoggerBuilder {
    name: String,
    timestamps: bool,
    appender: Option<Box<dyn Appender>>,
    fields: FieldSet,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            name: DEFAULT_LOGGER_NAME.to_string(),
            timestamps: true,
            appender: None,
            fields: FieldSet::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether lines carry `ts=<epoch-millis>`
    #[must_use = "builder methods return a new value"]
    pub fn timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    /// Set the destination, replacing any earlier one
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(self, appender: A) -> Self {
        self.boxed_appender(Box::new(appender))
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_appender(mut self, appender: Box<dyn Appender>) -> Self {
        self.appender = Some(appender);
        self
    }

    /// Initial field
    #[must_use = "builder methods return a new value"]
    pub fn field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key, value);
        self
    }

    /// Initial fields, merged over any set earlier
    #[must_use = "builder methods return a new value"]
    pub fn fields<I, K, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.extend(fields);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let appender = self
            .appender
            .unwrap_or_else(|| Box::new(ConsoleAppender::stdout()));

        Logger {
            config: Arc::new(LoggerConfig {
                name: self.name,
                formatter: LineFormatter::new(self.timestamps),
                appender: Mutex::new(appender),
                metrics: LoggerMetrics::new(),
            }),
            fields: Arc::new(self.fields),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
