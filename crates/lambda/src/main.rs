use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use staging_toggle_core::{
    flag_from_env, setup_info_logger, EnvironmentTarget, ToggleRequest, ToggleResult,
    ToggleRuntime,
};
use tracing::{error, info};

/// Runs one toggle for the incoming event and ships its log lines before
/// answering, whatever the outcome.
async fn function_handler(
    runtime: &ToggleRuntime,
    event: LambdaEvent<ToggleRequest>,
) -> Result<ToggleResult, Error> {
    let (request, context) = event.into_parts();
    let log = runtime.invocation_log(&context.env_config.function_name, &context.request_id);

    let outcome = runtime.handler().handle(&request, &log).await;
    log.flush().await;

    match outcome {
        Ok(result) => {
            info!("{}", serde_json::to_string(&result)?);
            Ok(result)
        }
        Err(e) => {
            error!(request_id = %context.request_id, "Toggle failed: {}", e);
            Err(e.into())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_info_logger();

    let target = EnvironmentTarget::from_env();
    let runtime = ToggleRuntime::start(target, flag_from_env("SHIP_LOGS", true)).await;
    let runtime = &runtime;

    run(service_fn(move |event: LambdaEvent<ToggleRequest>| async move {
        function_handler(runtime, event).await
    }))
    .await
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use lambda_runtime::Context;
    use serde_json::{json, Value};
    use staging_toggle_core::{
        aws::{ContainerScaler, DatabaseLifecycle, UpstreamError},
        log_sink::{InvocationLogEntry, LogSink, LogSinkError},
        EnvironmentToggleHandler,
    };

    use super::*;

    struct CountingScaler {
        calls: Arc<Mutex<u32>>,
    }

    #[async_trait]
    impl ContainerScaler for CountingScaler {
        async fn update_desired_count(
            &self,
            _cluster: &str,
            _service: &str,
            desired_count: i32,
        ) -> Result<Value, UpstreamError> {
            *self.calls.lock().unwrap() += 1;
            Ok(json!({ "id": "svc-ok", "desiredCount": desired_count }))
        }
    }

    struct CountingDatabase {
        calls: Arc<Mutex<u32>>,
    }

    #[async_trait]
    impl DatabaseLifecycle for CountingDatabase {
        async fn start_instance(&self, _instance_identifier: &str) -> Result<Value, UpstreamError> {
            *self.calls.lock().unwrap() += 1;
            Ok(json!({ "id": "db-ok" }))
        }

        async fn stop_instance(&self, _instance_identifier: &str) -> Result<Value, UpstreamError> {
            *self.calls.lock().unwrap() += 1;
            Ok(json!({ "id": "db-ok" }))
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        shipped: Mutex<Vec<(String, Vec<InvocationLogEntry>)>>,
    }

    #[async_trait]
    impl LogSink for RecordingSink {
        async fn ship(
            &self,
            stream_name: &str,
            entries: &[InvocationLogEntry],
        ) -> Result<(), LogSinkError> {
            self.shipped.lock().unwrap().push((stream_name.to_string(), entries.to_vec()));
            Ok(())
        }
    }

    fn runtime() -> (ToggleRuntime, Arc<RecordingSink>, Arc<Mutex<u32>>) {
        let calls = Arc::new(Mutex::new(0));
        let sink = Arc::new(RecordingSink::default());
        let handler = EnvironmentToggleHandler::new(
            Arc::new(CountingScaler { calls: calls.clone() }),
            Arc::new(CountingDatabase { calls: calls.clone() }),
            EnvironmentTarget::default(),
        );
        (ToggleRuntime::new(handler, Some(sink.clone())), sink, calls)
    }

    fn event(payload: Value, request_id: &str) -> LambdaEvent<ToggleRequest> {
        let mut context = Context::default();
        context.request_id = request_id.to_string();
        LambdaEvent::new(serde_json::from_value(payload).unwrap(), context)
    }

    fn shipped_messages(sink: &RecordingSink) -> Vec<(String, Vec<String>)> {
        sink.shipped
            .lock()
            .unwrap()
            .iter()
            .map(|(stream, entries)| {
                (stream.clone(), entries.iter().map(|e| e.formatted()).collect())
            })
            .collect()
    }

    #[tokio::test]
    async fn test_success_ships_logs_and_returns_result() {
        let (runtime, sink, calls) = runtime();

        let result =
            function_handler(&runtime, event(json!({ "action": "start" }), "req-ok")).await.unwrap();

        assert_eq!(result.status, "start executed successfully");
        assert_eq!(result.ecs_desired_count, 1);
        assert_eq!(result.db_instance, "staging-db");
        assert_eq!(*calls.lock().unwrap(), 2);

        let shipped = shipped_messages(&sink);
        assert_eq!(shipped.len(), 1);
        assert!(shipped[0].0.ends_with("-req-ok"));
        assert_eq!(shipped[0].1.first().unwrap(), "[INFO] Lambda triggered with action: start");
        assert_eq!(shipped[0].1.last().unwrap(), "[INFO] Action 'start' executed successfully");
    }

    #[tokio::test]
    async fn test_invalid_action_ships_logs_and_returns_error() {
        let (runtime, sink, calls) = runtime();

        let err = function_handler(&runtime, event(json!({ "action": "frobnicate" }), "req-bad"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Unknown action: frobnicate");
        assert_eq!(*calls.lock().unwrap(), 0);

        let shipped = shipped_messages(&sink);
        assert_eq!(shipped.len(), 1);
        assert!(shipped[0].0.ends_with("-req-bad"));
        assert_eq!(
            shipped[0].1,
            vec![
                "[INFO] Lambda triggered with action: frobnicate".to_string(),
                "[ERROR] Unknown action: frobnicate".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_null_action_is_rejected_not_defaulted() {
        let (runtime, sink, calls) = runtime();

        let err =
            function_handler(&runtime, event(json!({ "action": null }), "req-null")).await.unwrap_err();

        assert_eq!(err.to_string(), "Unknown action: null");
        assert_eq!(*calls.lock().unwrap(), 0);
        assert_eq!(shipped_messages(&sink).len(), 1);
    }
}
