//! HTTP request instrumentation
//!
//! [`instrument`] logs four lines per request through the logger attached to
//! the request:
//!
//! | event       | when                     | fields                                      |
//! |-------------|--------------------------|---------------------------------------------|
//! | `req-start` | immediately              | `ip url method referrer user-agent`, plus   |
//! |             |                          | `content-length` when the header is present |
//! | `res-start` | headers about to be sent | `diff`                                      |
//! | `res-end`   | response finished        | `diff [status]`                             |
//! | `req-end`   | request finished         | `diff`                                      |
//!
//! `diff` is the number of nanoseconds since `instrument` was called. The
//! host framework is reached only through [`InstrumentedRequest`], and the
//! hooks fire in whatever order the framework drives them.

use crate::core::{FieldSet, Logger, Result};
use std::time::Instant;

pub const REQ_START: &str = "req-start";
pub const RES_START: &str = "res-start";
pub const RES_END: &str = "res-end";
pub const REQ_END: &str = "req-end";

/// Hook run once, when response headers are about to be sent
pub type HeadersHook = Box<dyn FnOnce() + Send>;

/// Hook run once, when the response has finished
///
/// Receives the status code if headers were sent.
pub type ResponseFinishedHook = Box<dyn FnOnce(Option<u16>) + Send>;

/// Hook run once, when the request has been fully read
pub type RequestFinishedHook = Box<dyn FnOnce() + Send>;

/// What the instrumentation needs from a host framework's request
pub trait InstrumentedRequest {
    fn method(&self) -> &str;

    /// Original URL including the query string
    fn url(&self) -> &str;

    fn remote_addr(&self) -> Option<&str>;

    /// Case-insensitive header lookup
    fn header(&self, name: &str) -> Option<&str>;

    /// Logger attached to this request, if any
    fn logger(&self) -> Option<&Logger>;

    fn on_headers(&mut self, hook: HeadersHook);
    fn on_response_finished(&mut self, hook: ResponseFinishedHook);
    fn on_request_finished(&mut self, hook: RequestFinishedHook);
}

/// Instrument `req`, then hand it to `next`
///
/// Without an attached logger a warning goes to stderr and `next` runs on
/// the untouched request.
///
/// Failures to write a line are reported on stderr and never reach the
/// framework.
pub fn instrument<R, F, T>(req: &mut R, next: F) -> T
where
    R: InstrumentedRequest + ?Sized,
    F: FnOnce(&mut R) -> T,
{
    let Some(log) = req.logger().cloned() else {
        eprintln!("[LOGFMTR WARNING] instrument() - there is no logger on this request");
        return next(req);
    };

    let start = Instant::now();

    report(log.with_fields(request_fields(req)).info(REQ_START));

    let headers_log = log.clone();
    req.on_headers(Box::new(move || {
        report(headers_log.with_field("diff", elapsed_ns(start)).info(RES_START));
    }));

    let response_log = log.clone();
    req.on_response_finished(Box::new(move |status| {
        let mut fields = FieldSet::new().with_field("diff", elapsed_ns(start));
        if let Some(status) = status {
            fields.insert("status", status);
        }
        report(response_log.with_fields(fields).info(RES_END));
    }));

    req.on_request_finished(Box::new(move || {
        report(log.with_field("diff", elapsed_ns(start)).info(REQ_END));
    }));

    next(req)
}

fn request_fields<R: InstrumentedRequest + ?Sized>(req: &R) -> FieldSet {
    let referrer = req
        .header("referer")
        .or_else(|| req.header("referrer"))
        .unwrap_or("");

    let mut fields = FieldSet::new()
        .with_field("ip", req.remote_addr().unwrap_or(""))
        .with_field("url", req.url())
        .with_field("method", req.method())
        .with_field("referrer", referrer)
        .with_field("user-agent", req.header("user-agent").unwrap_or(""));

    if let Some(length) = req.header("content-length") {
        fields.insert("content-length", length);
    }

    fields
}

fn elapsed_ns(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX)
}

fn report(result: Result<()>) {
    if let Err(e) = result {
        eprintln!("[LOGFMTR ERROR] instrument() - failed to write log line: {}", e);
    }
}
