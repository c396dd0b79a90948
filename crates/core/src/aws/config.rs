use aws_config::{BehaviorVersion, Region};

use crate::environment::EnvironmentTarget;

/// Loads the shared SDK configuration for the target's region, honouring the
/// endpoint override when one is set.
pub async fn build_aws_config(target: &EnvironmentTarget) -> aws_config::SdkConfig {
    let mut config_loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(target.region.clone()));

    if let Some(endpoint_url) = &target.endpoint_url {
        config_loader = config_loader.endpoint_url(endpoint_url);
    }

    config_loader.load().await
}
