//! Core logger types and traits

pub mod appender;
pub mod default_logger;
pub mod error;
pub mod escape;
pub mod field_set;
pub mod formatter;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod options;
pub mod process_info;

pub use appender::Appender;
pub use default_logger::{default_logger, default_logger_with, reset_default_logger};
pub use error::{LoggerError, Result};
pub use escape::{escape, escape_str};
pub use field_set::{FieldSet, FieldValue};
pub use formatter::{
    format_line, format_line_with, now_millis, LineFormatter, EVENT_KEY, LEVEL_KEY, TIMESTAMP_KEY,
};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, LoggerConfig, DEFAULT_LOGGER_NAME};
pub use metrics::LoggerMetrics;
pub use options::{LoggerOptions, OutputTarget};
pub use process_info::{ProcessInfo, SystemProcessInfo};
