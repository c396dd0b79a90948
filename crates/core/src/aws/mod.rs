use async_trait::async_trait;
use serde_json::Value;

#[cfg(feature = "aws")]
mod config;
#[cfg(feature = "aws")]
pub use config::build_aws_config;
#[cfg(feature = "aws")]
mod ecs;
#[cfg(feature = "aws")]
pub use ecs::EcsServiceScaler;
#[cfg(feature = "aws")]
mod rds;
#[cfg(feature = "aws")]
pub use rds::RdsInstanceController;

/// Whatever a control plane call failed with, passed through untouched.
pub type UpstreamError = Box<dyn std::error::Error + Send + Sync>;

/// Control plane for the container service.
///
/// The call only issues the scaling directive; it does not wait for the
/// service to reach the desired count.
#[async_trait]
pub trait ContainerScaler {
    async fn update_desired_count(
        &self,
        cluster: &str,
        service: &str,
        desired_count: i32,
    ) -> Result<Value, UpstreamError>;
}

/// Control plane for the managed database instance.
#[async_trait]
pub trait DatabaseLifecycle {
    async fn start_instance(&self, instance_identifier: &str) -> Result<Value, UpstreamError>;

    async fn stop_instance(&self, instance_identifier: &str) -> Result<Value, UpstreamError>;
}
