//! Basic logger usage example
//!
//! Demonstrates derived loggers, the level macros and reading lines back.
//!
//! Run with: cargo run --example basic_usage

use logfmtr::prelude::*;
use logfmtr::{fields, info, warn};
use serde_json::json;

fn main() -> Result<()> {
    println!("=== logfmtr - Basic Usage Example ===\n");

    // Lines go to stdout with a millisecond timestamp
    let logger = Logger::builder().name("demo").build();

    println!("1. Logging at different levels:");
    logger.debug("cache-warm")?;
    logger.info("server-ready")?;
    logger.warn("disk-low")?;
    logger.error("upstream-timeout")?;

    println!("\n2. Derived loggers carry their fields:");
    let req = logger.with_fields(fields! {
        "rid" => "7f3a9c",
        "method" => "GET",
        "url" => "/items?page=2",
    });
    req.info("req-start")?;
    req.with_field("status", 200).info("req-end")?;
    info!(req, "served {} items", 25)?;

    println!("\n3. Values that need escaping:");
    logger
        .with_fields(fields! {
            "msg" => "Hello, World!",
            "quote" => "\"Quote\"!",
            "path" => "C:\\temp",
            "obj" => json!({"ok": true}),
            "missing" => FieldValue::Null,
        })
        .info("escaped")?;

    println!("\n4. Reading lines back:");
    let sink = MemoryAppender::new();
    let captured = Logger::builder()
        .timestamps(false)
        .appender(sink.clone())
        .build()
        .with_field("rid", "a1");
    warn!(captured, "retrying in {}ms", 250)?;

    for record in parse_lines(&sink.contents()) {
        for (key, value) in record.iter() {
            println!("   {:<6} {}", key, value);
        }
    }

    println!("\n5. The process-wide default logger:");
    default_logger().with_pid().info("default-ready")?;

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
