//! Request instrumentation tests against a stand-in framework request

use logfmtr::middleware::{
    instrument, HeadersHook, InstrumentedRequest, RequestFinishedHook, ResponseFinishedHook,
};
use logfmtr::prelude::*;
use std::collections::HashMap;

#[derive(Default)]
struct MockRequest {
    method: String,
    url: String,
    remote_addr: Option<String>,
    headers: HashMap<String, String>,
    logger: Option<Logger>,
    headers_hook: Option<HeadersHook>,
    response_hook: Option<ResponseFinishedHook>,
    request_hook: Option<RequestFinishedHook>,
}

impl MockRequest {
    fn get(url: &str) -> Self {
        Self {
            method: "GET".to_string(),
            url: url.to_string(),
            remote_addr: Some("10.0.0.7".to_string()),
            ..Default::default()
        }
    }

    fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    fn send_headers(&mut self) {
        if let Some(hook) = self.headers_hook.take() {
            hook();
        }
    }

    fn finish_response(&mut self, status: Option<u16>) {
        if let Some(hook) = self.response_hook.take() {
            hook(status);
        }
    }

    fn finish_request(&mut self) {
        if let Some(hook) = self.request_hook.take() {
            hook();
        }
    }
}

impl InstrumentedRequest for MockRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn remote_addr(&self) -> Option<&str> {
        self.remote_addr.as_deref()
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    fn logger(&self) -> Option<&Logger> {
        self.logger.as_ref()
    }

    fn on_headers(&mut self, hook: HeadersHook) {
        self.headers_hook = Some(hook);
    }

    fn on_response_finished(&mut self, hook: ResponseFinishedHook) {
        self.response_hook = Some(hook);
    }

    fn on_request_finished(&mut self, hook: RequestFinishedHook) {
        self.request_hook = Some(hook);
    }
}

fn request_logger() -> (Logger, MemoryAppender) {
    let sink = MemoryAppender::new();
    let logger = Logger::builder()
        .timestamps(false)
        .appender(sink.clone())
        .build()
        .with_field("rid", "r-1");
    (logger, sink)
}

fn diff(record: &Record) -> u64 {
    record
        .get_str("diff")
        .and_then(|d| d.parse().ok())
        .expect("diff should be a nanosecond count")
}

#[test]
fn test_full_lifecycle() {
    let (logger, sink) = request_logger();
    let mut req = MockRequest::get("/items?page=2")
        .with_header("Referer", "https://example.com/")
        .with_header("User-Agent", "curl/8.5.0")
        .with_logger(logger);

    let reached = instrument(&mut req, |_| true);
    assert!(reached);

    req.send_headers();
    req.finish_response(Some(200));
    req.finish_request();

    let records = parse_lines(&sink.contents());
    let events: Vec<&str> = records.iter().filter_map(|r| r.get_str("evt")).collect();
    assert_eq!(events, vec!["req-start", "res-start", "res-end", "req-end"]);

    let start = &records[0];
    assert_eq!(start.get_str("rid"), Some("r-1"));
    assert_eq!(start.get_str("ip"), Some("10.0.0.7"));
    // an unquoted `=` inside a value does not survive parsing
    assert!(sink.lines()[0].contains(" url=/items?page=2 "));
    assert_eq!(start.get_str("url"), Some("/items?page2"));
    assert_eq!(start.get_str("method"), Some("GET"));
    assert_eq!(start.get_str("referrer"), Some("https://example.com/"));
    assert_eq!(start.get_str("user-agent"), Some("curl/8.5.0"));
    assert!(!start.contains_key("content-length"));
    assert!(!start.contains_key("diff"));

    assert_eq!(records[2].get_str("status"), Some("200"));
    for record in &records[1..] {
        assert_eq!(record.get_str("rid"), Some("r-1"));
        diff(record);
    }
    assert!(diff(&records[1]) <= diff(&records[3]));
}

#[test]
fn test_content_length_and_referrer_spelling() {
    let (logger, sink) = request_logger();
    let mut req = MockRequest::get("/upload")
        .with_header("referrer", "/form")
        .with_header("Content-Length", "512")
        .with_logger(logger);
    req.method = "POST".to_string();

    instrument(&mut req, |_| ());

    let record = parse(&sink.contents());
    assert_eq!(record.get_str("method"), Some("POST"));
    assert_eq!(record.get_str("referrer"), Some("/form"));
    assert_eq!(record.get_str("content-length"), Some("512"));
}

#[test]
fn test_missing_request_details_are_empty() {
    let (logger, sink) = request_logger();
    let mut req = MockRequest::get("/").with_logger(logger);
    req.remote_addr = None;

    instrument(&mut req, |_| ());

    assert_eq!(
        sink.contents(),
        "level=info rid=r-1 ip= url=/ method=GET referrer= user-agent= evt=req-start\n"
    );
    let record = parse(&sink.contents());
    assert_eq!(record.get("ip"), Some(&FieldValue::Null));
}

#[test]
fn test_status_absent_without_headers() {
    let (logger, sink) = request_logger();
    let mut req = MockRequest::get("/aborted").with_logger(logger);

    instrument(&mut req, |_| ());
    req.finish_response(None);

    let records = parse_lines(&sink.contents());
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].get_str("evt"), Some("res-end"));
    assert!(!records[1].contains_key("status"));
    diff(&records[1]);
}

#[test]
fn test_hooks_fire_from_other_threads() {
    let (logger, sink) = request_logger();
    let mut req = MockRequest::get("/slow").with_logger(logger);

    instrument(&mut req, |_| ());

    let headers = req.headers_hook.take().expect("headers hook registered");
    let response = req.response_hook.take().expect("response hook registered");
    let request = req.request_hook.take().expect("request hook registered");

    // the framework may finish the request before the response
    std::thread::spawn(request).join().unwrap();
    std::thread::spawn(headers).join().unwrap();
    std::thread::spawn(move || response(Some(503))).join().unwrap();

    let records = parse_lines(&sink.contents());
    let events: Vec<&str> = records.iter().filter_map(|r| r.get_str("evt")).collect();
    assert_eq!(events, vec!["req-start", "req-end", "res-start", "res-end"]);
    assert_eq!(records[3].get_str("status"), Some("503"));
}

#[test]
fn test_without_logger_passes_through() {
    let mut req = MockRequest::get("/health");

    let url = instrument(&mut req, |r| r.url().to_string());

    assert_eq!(url, "/health");
    assert!(req.headers_hook.is_none());
    assert!(req.response_hook.is_none());
    assert!(req.request_hook.is_none());
}

#[test]
fn test_write_failure_does_not_reach_caller() {
    struct Broken;

    impl Appender for Broken {
        fn append(&mut self, _line: &str) -> Result<()> {
            Err(LoggerError::other("sink closed"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    let logger = Logger::builder().appender(Broken).build();
    let mut req = MockRequest::get("/").with_logger(logger.clone());

    let status = instrument(&mut req, |_| 204);
    req.send_headers();
    req.finish_response(Some(status));
    req.finish_request();

    assert_eq!(status, 204);
    assert_eq!(logger.metrics().write_failures(), 4);
}
