//! Process-wide default logger
//!
//! **The first call wins.** The configuration passed on the first access
//! builds the default logger; every later call returns that same logger and
//! silently ignores its arguments. Callers that need a differently configured
//! logger must build their own with [`Logger::builder`].
//!
//! Construction happens under a mutex, so concurrent first accesses build at
//! most one logger.

use super::logger::{Logger, LoggerBuilder};
use parking_lot::Mutex;

static DEFAULT_LOGGER: Mutex<Option<Logger>> = parking_lot::const_mutex(None);

/// The default logger, built with stdout and timestamps on first access
pub fn default_logger() -> Logger {
    get_or_init(LoggerBuilder::new)
}

/// The default logger, built from `builder` if this is the first access
///
/// If a default logger already exists, `builder` is dropped unused.
///
/// ```
/// use logfmtr::prelude::*;
///
/// # logfmtr::reset_default_logger();
/// let first = default_logger_with(Logger::builder().name("api").timestamps(false));
/// let second = default_logger_with(Logger::builder().name("ignored"));
///
/// assert!(first.ptr_eq(&second));
/// assert_eq!(second.name(), "api");
/// ```
pub fn default_logger_with(builder: LoggerBuilder) -> Logger {
    get_or_init(move || builder)
}

fn get_or_init<F: FnOnce() -> LoggerBuilder>(init: F) -> Logger {
    let mut slot = DEFAULT_LOGGER.lock();
    slot.get_or_insert_with(|| init().build()).clone()
}

/// Forget the default logger so the next access builds a new one
///
/// Meant for test isolation only. Loggers already handed out keep working.
#[doc(hidden)]
pub fn reset_default_logger() {
    DEFAULT_LOGGER.lock().take();
}
