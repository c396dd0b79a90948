use async_trait::async_trait;
use aws_sdk_cloudwatchlogs::{types::InputLogEvent, Client};
use tracing::debug;

use super::{InvocationLogEntry, LogSink, LogSinkError};

/// PutLogEvents accepts at most this many events per call.
const MAX_EVENTS_PER_BATCH: usize = 10_000;

/// Ships invocation logs to a CloudWatch Logs group, creating the group and
/// stream when they do not exist yet.
#[derive(Debug, Clone)]
pub struct CloudWatchLogSink {
    client: Client,
    log_group: String,
}

impl CloudWatchLogSink {
    pub fn new(shared_config: &aws_config::SdkConfig, log_group: impl Into<String>) -> Self {
        Self { client: Client::new(shared_config), log_group: log_group.into() }
    }

    pub fn log_group(&self) -> &str {
        &self.log_group
    }

    async fn ensure_log_group(&self) -> Result<(), LogSinkError> {
        match self.client.create_log_group().log_group_name(&self.log_group).send().await {
            Ok(_) => {
                debug!("Created log group {}", self.log_group);
                Ok(())
            }
            Err(e) => match e.as_service_error() {
                Some(service_error) if service_error.is_resource_already_exists_exception() => {
                    Ok(())
                }
                _ => Err(LogSinkError::CreateLogGroup {
                    log_group: self.log_group.clone(),
                    message: e.to_string(),
                }),
            },
        }
    }

    async fn ensure_log_stream(&self, stream_name: &str) -> Result<(), LogSinkError> {
        match self
            .client
            .create_log_stream()
            .log_group_name(&self.log_group)
            .log_stream_name(stream_name)
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(e) => match e.as_service_error() {
                Some(service_error) if service_error.is_resource_already_exists_exception() => {
                    Ok(())
                }
                _ => Err(LogSinkError::CreateLogStream {
                    stream_name: stream_name.to_string(),
                    message: e.to_string(),
                }),
            },
        }
    }
}

fn to_input_events(entries: &[InvocationLogEntry]) -> Result<Vec<InputLogEvent>, LogSinkError> {
    let mut sorted: Vec<&InvocationLogEntry> = entries.iter().collect();
    sorted.sort_by_key(|entry| entry.timestamp_millis);

    sorted
        .into_iter()
        .map(|entry| {
            InputLogEvent::builder()
                .timestamp(entry.timestamp_millis)
                .message(entry.formatted())
                .build()
                .map_err(|e| LogSinkError::InvalidEvent(e.to_string()))
        })
        .collect()
}

#[async_trait]
impl LogSink for CloudWatchLogSink {
    async fn ship(
        &self,
        stream_name: &str,
        entries: &[InvocationLogEntry],
    ) -> Result<(), LogSinkError> {
        self.ensure_log_group().await?;
        self.ensure_log_stream(stream_name).await?;

        let events = to_input_events(entries)?;
        for batch in events.chunks(MAX_EVENTS_PER_BATCH) {
            self.client
                .put_log_events()
                .log_group_name(&self.log_group)
                .log_stream_name(stream_name)
                .set_log_events(Some(batch.to_vec()))
                .send()
                .await
                .map_err(|e| LogSinkError::PutLogEvents {
                    stream_name: stream_name.to_string(),
                    message: e.to_string(),
                })?;
        }

        debug!("Shipped {} log events to {}/{}", events.len(), self.log_group, stream_name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_sink::LogLevel;

    #[test]
    fn test_events_sorted_and_formatted() {
        let entries = vec![
            InvocationLogEntry {
                timestamp_millis: 20,
                level: LogLevel::Info,
                message: "second".to_string(),
            },
            InvocationLogEntry {
                timestamp_millis: 10,
                level: LogLevel::Info,
                message: "first".to_string(),
            },
        ];

        let events = to_input_events(&entries).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].timestamp(), 10);
        assert_eq!(events[0].message(), "[INFO] first");
        assert_eq!(events[1].message(), "[INFO] second");
    }
}
