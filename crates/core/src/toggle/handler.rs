use std::sync::Arc;

use crate::{
    action::Action,
    aws::{ContainerScaler, DatabaseLifecycle},
    environment::EnvironmentTarget,
    log_sink::InvocationLog,
    toggle::types::{ToggleError, ToggleRequest, ToggleResult},
};

/// Scales the staged container service and starts or stops its database.
///
/// Every invocation is independent: the handler only holds the collaborators
/// and the immutable target. The two calls are not transactional, so a failed
/// database call leaves the scaling already applied.
#[derive(Clone)]
pub struct EnvironmentToggleHandler {
    scaler: Arc<dyn ContainerScaler + Send + Sync>,
    database: Arc<dyn DatabaseLifecycle + Send + Sync>,
    target: Arc<EnvironmentTarget>,
}

impl EnvironmentToggleHandler {
    pub fn new(
        scaler: Arc<dyn ContainerScaler + Send + Sync>,
        database: Arc<dyn DatabaseLifecycle + Send + Sync>,
        target: EnvironmentTarget,
    ) -> Self {
        Self { scaler, database, target: Arc::new(target) }
    }

    pub fn target(&self) -> &EnvironmentTarget {
        &self.target
    }

    pub async fn handle(
        &self,
        request: &ToggleRequest,
        log: &InvocationLog,
    ) -> Result<ToggleResult, ToggleError> {
        log.info(format!("Lambda triggered with action: {}", request.action_token()));

        let action = match request.directive() {
            Ok(action) => action,
            Err(e) => {
                log.error(e.to_string());
                return Err(ToggleError::InvalidAction(e.0));
            }
        };

        let desired_count = action.desired_count();
        let target = &self.target;

        log.info(format!(
            "Updating ECS service '{}' in cluster '{}' to desired count: {}",
            target.service_name, target.cluster_name, desired_count
        ));
        let ecs_response = self
            .scaler
            .update_desired_count(&target.cluster_name, &target.service_name, desired_count)
            .await
            .map_err(|e| {
                log.error(format!("ECS update failed: {}", e));
                ToggleError::ContainerScaling(e)
            })?;
        log.info(format!("ECS response: {}", ecs_response));

        let rds_response = match action {
            Action::Stop => {
                log.info(format!("Stopping RDS instance '{}'", target.db_instance_identifier));
                self.database.stop_instance(&target.db_instance_identifier).await
            }
            Action::Start => {
                log.info(format!("Starting RDS instance '{}'", target.db_instance_identifier));
                self.database.start_instance(&target.db_instance_identifier).await
            }
        }
        .map_err(|e| {
            log.error(format!("RDS {} failed: {}", action, e));
            ToggleError::DatabaseLifecycle(e)
        })?;
        log.info(format!("RDS response: {}", rds_response));

        log.info(format!("Action '{}' executed successfully", action));

        Ok(ToggleResult {
            status: format!("{} executed successfully", action),
            ecs_desired_count: desired_count,
            db_instance: target.db_instance_identifier.clone(),
            ecs_response,
            rds_response,
        })
    }
}
