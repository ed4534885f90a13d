//! Logging macros for ergonomic event formatting.
//!
//! The level macros `format!` their arguments into the event, so the line
//! still carries a single `evt=` token. Each expands to the logger call and
//! evaluates to its `Result<()>`.
//!
//! # Examples
//!
//! ```
//! use logfmtr::prelude::*;
//! use logfmtr::{fields, info};
//!
//! let sink = MemoryAppender::new();
//! let logger = Logger::builder().timestamps(false).appender(sink.clone()).build();
//!
//! let port = 8080;
//! info!(logger, "listening on {}", port).unwrap();
//!
//! let req = logger.with_fields(fields! { "rid" => "a1", "port" => port });
//! info!(req, "req-start").unwrap();
//!
//! assert_eq!(sink.lines(), vec![
//!     "level=info evt=\"listening on 8080\"",
//!     "level=info rid=a1 port=8080 evt=req-start",
//! ]);
//! ```

/// Log an event with automatic formatting.
///
/// # Examples
///
/// ```
/// # use logfmtr::prelude::*;
/// # let logger = Logger::builder().appender(MemoryAppender::new()).build();
/// use logfmtr::log;
/// log!(logger, LogLevel::Info, "simple-event").unwrap();
/// log!(logger, LogLevel::Error, "status-{}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a debug-level event.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level event.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warn-level event.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level event.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Build a [`FieldSet`](crate::FieldSet) in the order written.
///
/// ```
/// use logfmtr::fields;
///
/// let set = fields! { "b" => 1, "a" => "x", "b" => 2 };
/// assert_eq!(set.to_string(), "b=2 a=x");
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::FieldSet::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut set = $crate::FieldSet::new();
        $( set.insert($key, $value); )+
        set
    }};
}
