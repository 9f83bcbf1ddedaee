//! Global log stream instances.
//!
//! One stream per execution context, so each ring has a single producer.

use crate::logging::LogStream;

/// Written only from the tick context. Timestamps are tick numbers.
pub static TICK_LOG_STREAM: LogStream = LogStream::new();

/// Written only from the foreground (configuration calls).
/// Timestamps are microseconds since boot.
pub static FG_LOG_STREAM: LogStream = LogStream::new();
