//! # logfmtr
//!
//! Logfmt line formatting and parsing with immutable, field-carrying loggers.
//!
//! ```text
//! level=info ts=1736332245123 rid=7f3a method=GET evt=req-start
//! ```
//!
//! ## Features
//!
//! - **Stable wire format**: selective quoting and escaping that the bundled
//!   [`parse`] reads back
//! - **Derived loggers**: `with_fields` returns a new logger sharing the
//!   destination, never mutating the original
//! - **Default logger**: a process-wide logger whose first configuration wins
//! - **HTTP instrumentation**: request/response lifecycle lines through a
//!   small framework-agnostic trait

pub mod appenders;
pub mod core;
pub mod macros;
pub mod middleware;
pub mod parser;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, MemoryAppender, WriterAppender};
    pub use crate::core::{
        default_logger, default_logger_with, Appender, FieldSet, FieldValue, LogLevel, Logger,
        LoggerBuilder, LoggerError, LoggerMetrics, LoggerOptions, OutputTarget, Result,
    };
    pub use crate::middleware::{instrument, InstrumentedRequest};
    pub use crate::parser::{parse, parse_lines, Record};
}

pub use appenders::{ConsoleAppender, ConsoleTarget, FileAppender, MemoryAppender, WriterAppender};
pub use core::{
    default_logger, default_logger_with, escape, escape_str, format_line, format_line_with,
    reset_default_logger, Appender, FieldSet, FieldValue, LineFormatter, LogLevel, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, LoggerOptions, OutputTarget,
    ProcessInfo, Result, SystemProcessInfo,
};
pub use middleware::{instrument, InstrumentedRequest};
pub use parser::{parse, parse_lines, Record};
