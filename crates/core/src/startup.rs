use std::sync::Arc;

use tracing::info;

use crate::{
    aws::{build_aws_config, EcsServiceScaler, RdsInstanceController},
    environment::EnvironmentTarget,
    log_sink::{stream_name, CloudWatchLogSink, InvocationLog, LogSink},
    toggle::EnvironmentToggleHandler,
};

/// Everything an invocation needs, built once when the process starts.
#[derive(Clone)]
pub struct ToggleRuntime {
    handler: EnvironmentToggleHandler,
    log_sink: Option<Arc<dyn LogSink + Send + Sync>>,
}

impl ToggleRuntime {
    /// Assembles a runtime from an already built handler and optional sink.
    pub fn new(
        handler: EnvironmentToggleHandler,
        log_sink: Option<Arc<dyn LogSink + Send + Sync>>,
    ) -> Self {
        Self { handler, log_sink }
    }

    /// Loads the AWS configuration for `target` and creates the ECS, RDS and
    /// (when `ship_logs` is set) CloudWatch Logs clients.
    pub async fn start(target: EnvironmentTarget, ship_logs: bool) -> Self {
        info!(
            "Toggle target: cluster '{}', service '{}', database '{}' in {}",
            target.cluster_name, target.service_name, target.db_instance_identifier, target.region
        );

        let shared_config = build_aws_config(&target).await;

        let log_sink: Option<Arc<dyn LogSink + Send + Sync>> = if ship_logs {
            info!("Shipping invocation logs to {}", target.log_group);
            Some(Arc::new(CloudWatchLogSink::new(&shared_config, target.log_group.clone())))
        } else {
            None
        };

        let handler = EnvironmentToggleHandler::new(
            Arc::new(EcsServiceScaler::new(&shared_config)),
            Arc::new(RdsInstanceController::new(&shared_config)),
            target,
        );

        Self::new(handler, log_sink)
    }

    pub fn handler(&self) -> &EnvironmentToggleHandler {
        &self.handler
    }

    /// A log for one invocation, writing to `{function_name}-{request_id}`.
    pub fn invocation_log(&self, function_name: &str, request_id: &str) -> InvocationLog {
        let log = InvocationLog::new(request_id);
        match &self.log_sink {
            Some(sink) => log.with_sink(sink.clone(), stream_name(function_name, request_id)),
            None => log,
        }
    }
}
