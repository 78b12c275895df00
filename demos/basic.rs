//! Basic logger usage
//!
//! Demonstrates leveled logging, structured fields, level thresholds, and
//! switching to JSON output.
//!
//! Run with: cargo run --example basic

use outlog::prelude::*;

fn main() -> Result<()> {
    println!("=== Outlog - Basic Usage ===\n");

    let logger = Logger::builder()
        .min_level(Level::Trace)
        .sink(ConsoleSink::stdout())
        .build();

    println!("1. Logging at different levels:");
    logger.trace("This is a trace message");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.success("This is a success message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");

    println!("\n2. Structured fields:");
    logger
        .with_field("user", 42)
        .with_field("route", "/login")
        .info("Request handled");

    let parse_err = "not-a-number".parse::<i32>().unwrap_err();
    logger.with_error(&parse_err).error("Parsing failed");

    println!("\n3. Raising the minimum level to WARN:");
    logger.set_min_level(Level::Warn);
    logger.info("Info message (hidden)");
    logger.warn("Warning message (visible)");

    println!("\n4. JSON output:");
    logger.set_min_level(Level::Info);
    logger.set_formatter(JsonFormatter::new());
    logger.with_field("latency_ms", 3.4).info("Request handled");

    logger.close()?;
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
