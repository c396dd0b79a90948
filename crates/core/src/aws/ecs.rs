use async_trait::async_trait;
use aws_sdk_ecs::{
    operation::RequestId,
    types::{Deployment, Service, ServiceEvent},
    Client,
};
use serde_json::{json, Value};

use super::{ContainerScaler, UpstreamError};

/// ECS keeps up to 100 service events; the newest ones come first.
const MAX_SERVICE_EVENTS: usize = 5;

#[derive(Debug, Clone)]
pub struct EcsServiceScaler {
    client: Client,
}

impl EcsServiceScaler {
    pub fn new(shared_config: &aws_config::SdkConfig) -> Self {
        Self { client: Client::new(shared_config) }
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

fn deployment_document(deployment: &Deployment) -> Value {
    json!({
        "id": deployment.id(),
        "status": deployment.status(),
        "taskDefinition": deployment.task_definition(),
        "desiredCount": deployment.desired_count(),
        "runningCount": deployment.running_count(),
        "pendingCount": deployment.pending_count(),
        "failedTasks": deployment.failed_tasks(),
        "rolloutState": deployment.rollout_state().map(|state| state.as_str()),
        "rolloutStateReason": deployment.rollout_state_reason(),
    })
}

fn event_document(event: &ServiceEvent) -> Value {
    json!({
        "id": event.id(),
        "createdAt": event.created_at().map(|created_at| created_at.to_string()),
        "message": event.message(),
    })
}

fn service_document(service: Option<&Service>, request_id: Option<&str>) -> Value {
    let service = service.map(|service| {
        json!({
            "serviceName": service.service_name(),
            "serviceArn": service.service_arn(),
            "clusterArn": service.cluster_arn(),
            "status": service.status(),
            "desiredCount": service.desired_count(),
            "runningCount": service.running_count(),
            "pendingCount": service.pending_count(),
            "launchType": service.launch_type().map(|launch_type| launch_type.as_str()),
            "taskDefinition": service.task_definition(),
            "deployments": service.deployments().iter().map(deployment_document).collect::<Vec<_>>(),
            "events": service
                .events()
                .iter()
                .take(MAX_SERVICE_EVENTS)
                .map(event_document)
                .collect::<Vec<_>>(),
        })
    });

    json!({
        "service": service,
        "ResponseMetadata": { "RequestId": request_id },
    })
}

#[async_trait]
impl ContainerScaler for EcsServiceScaler {
    async fn update_desired_count(
        &self,
        cluster: &str,
        service: &str,
        desired_count: i32,
    ) -> Result<Value, UpstreamError> {
        let output = self
            .client
            .update_service()
            .cluster(cluster)
            .service(service)
            .desired_count(desired_count)
            .send()
            .await?;

        Ok(service_document(output.service(), output.request_id()))
    }
}
