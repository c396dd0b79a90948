use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info, warn};

#[cfg(feature = "aws")]
mod cloudwatch;
#[cfg(feature = "aws")]
pub use cloudwatch::CloudWatchLogSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Info => f.write_str("INFO"),
            LogLevel::Warn => f.write_str("WARNING"),
            LogLevel::Error => f.write_str("ERROR"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationLogEntry {
    pub timestamp_millis: i64,
    pub level: LogLevel,
    pub message: String,
}

impl InvocationLogEntry {
    /// The line shipped to the sink, e.g. `[INFO] Lambda triggered with action: stop`.
    pub fn formatted(&self) -> String {
        format!("[{}] {}", self.level, self.message)
    }
}

#[derive(Error, Debug)]
pub enum LogSinkError {
    #[error("Failed to create log group {log_group}: {message}")]
    CreateLogGroup { log_group: String, message: String },

    #[error("Failed to create log stream {stream_name}: {message}")]
    CreateLogStream { stream_name: String, message: String },

    #[error("Failed to put log events to {stream_name}: {message}")]
    PutLogEvents { stream_name: String, message: String },

    #[error("Invalid log event: {0}")]
    InvalidEvent(String),
}

/// Destination that receives an invocation's log lines once it finishes.
#[async_trait]
pub trait LogSink {
    async fn ship(
        &self,
        stream_name: &str,
        entries: &[InvocationLogEntry],
    ) -> Result<(), LogSinkError>;
}

/// Name of the log stream an invocation writes to.
pub fn stream_name(function_name: &str, request_id: &str) -> String {
    format!("{}-{}", function_name, request_id)
}

struct SinkTarget {
    sink: Arc<dyn LogSink + Send + Sync>,
    stream_name: String,
}

/// Request-scoped structured logger handed to the toggle handler.
///
/// Every line is emitted as a tracing event straight away and kept in memory
/// until [`InvocationLog::flush`] hands it to the sink.
pub struct InvocationLog {
    request_id: String,
    entries: Mutex<Vec<InvocationLogEntry>>,
    target: Option<SinkTarget>,
}

impl InvocationLog {
    /// A log that only emits tracing events.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self { request_id: request_id.into(), entries: Mutex::new(Vec::new()), target: None }
    }

    pub fn with_sink(
        mut self,
        sink: Arc<dyn LogSink + Send + Sync>,
        stream_name: impl Into<String>,
    ) -> Self {
        self.target = Some(SinkTarget { sink, stream_name: stream_name.into() });
        self
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn info(&self, message: impl Into<String>) {
        let message = message.into();
        info!(request_id = %self.request_id, "{}", message);
        self.record(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        let message = message.into();
        warn!(request_id = %self.request_id, "{}", message);
        self.record(LogLevel::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        error!(request_id = %self.request_id, "{}", message);
        self.record(LogLevel::Error, message);
    }

    /// Copy of everything recorded and not yet flushed.
    pub fn entries(&self) -> Vec<InvocationLogEntry> {
        self.lock().clone()
    }

    /// Ships the recorded entries to the sink, if there is one.
    ///
    /// Entries are drained even when shipping fails, so a second flush never
    /// resends them. Failures are reported as warnings and never bubble up.
    pub async fn flush(&self) {
        let entries = std::mem::take(&mut *self.lock());

        let Some(target) = &self.target else {
            return;
        };
        if entries.is_empty() {
            return;
        }

        if let Err(e) = target.sink.ship(&target.stream_name, &entries).await {
            warn!(request_id = %self.request_id, "Failed to ship invocation logs: {}", e);
        }
    }

    fn record(&self, level: LogLevel, message: String) {
        let entry = InvocationLogEntry {
            timestamp_millis: chrono::Utc::now().timestamp_millis(),
            level,
            message,
        };
        self.lock().push(entry);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<InvocationLogEntry>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MemorySink {
        shipped: Mutex<Vec<(String, Vec<InvocationLogEntry>)>>,
        fail: bool,
    }

    #[async_trait]
    impl LogSink for MemorySink {
        async fn ship(
            &self,
            stream_name: &str,
            entries: &[InvocationLogEntry],
        ) -> Result<(), LogSinkError> {
            self.shipped.lock().unwrap().push((stream_name.to_string(), entries.to_vec()));
            if self.fail {
                return Err(LogSinkError::PutLogEvents {
                    stream_name: stream_name.to_string(),
                    message: "throttled".to_string(),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn test_stream_name() {
        assert_eq!(stream_name("staging-toggle", "abc-123"), "staging-toggle-abc-123");
    }

    #[test]
    fn test_entry_formatting() {
        let entry = InvocationLogEntry {
            timestamp_millis: 0,
            level: LogLevel::Error,
            message: "Unknown action: frobnicate".to_string(),
        };
        assert_eq!(entry.formatted(), "[ERROR] Unknown action: frobnicate");
    }

    #[test]
    fn test_entries_recorded_in_order() {
        let log = InvocationLog::new("req-1");
        log.info("first");
        log.warn("second");
        log.error("third");

        let entries = log.entries();
        let levels: Vec<LogLevel> = entries.iter().map(|e| e.level).collect();
        let messages: Vec<&str> = entries.iter().map(|e| e.message.as_str()).collect();

        assert_eq!(levels, vec![LogLevel::Info, LogLevel::Warn, LogLevel::Error]);
        assert_eq!(messages, vec!["first", "second", "third"]);
        assert!(entries.windows(2).all(|w| w[0].timestamp_millis <= w[1].timestamp_millis));
    }

    #[tokio::test]
    async fn test_flush_ships_once() {
        let sink = Arc::new(MemorySink::default());
        let log = InvocationLog::new("req-2").with_sink(sink.clone(), "fn-req-2");
        log.info("hello");

        log.flush().await;
        log.flush().await;

        let shipped = sink.shipped.lock().unwrap();
        assert_eq!(shipped.len(), 1);
        assert_eq!(shipped[0].0, "fn-req-2");
        assert_eq!(shipped[0].1.len(), 1);
        assert!(log.entries().is_empty());
    }

    #[tokio::test]
    async fn test_failing_sink_does_not_panic() {
        let sink = Arc::new(MemorySink { fail: true, ..Default::default() });
        let log = InvocationLog::new("req-3").with_sink(sink.clone(), "fn-req-3");
        log.info("hello");

        log.flush().await;

        assert_eq!(sink.shipped.lock().unwrap().len(), 1);
        assert!(log.entries().is_empty());
    }

    #[tokio::test]
    async fn test_flush_without_sink_drains() {
        let log = InvocationLog::new("req-4");
        log.info("only tracing");
        log.flush().await;
        assert!(log.entries().is_empty());
    }
}
