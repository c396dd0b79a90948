use async_trait::async_trait;
use aws_sdk_rds::{operation::RequestId, types::DbInstance, Client};
use serde_json::{json, Value};

use super::{DatabaseLifecycle, UpstreamError};

#[derive(Debug, Clone)]
pub struct RdsInstanceController {
    client: Client,
}

impl RdsInstanceController {
    pub fn new(shared_config: &aws_config::SdkConfig) -> Self {
        Self { client: Client::new(shared_config) }
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

fn instance_document(instance: Option<&DbInstance>, request_id: Option<&str>) -> Value {
    let instance = instance.map(|instance| {
        json!({
            "dbInstanceIdentifier": instance.db_instance_identifier(),
            "dbInstanceArn": instance.db_instance_arn(),
            "dbInstanceStatus": instance.db_instance_status(),
            "dbInstanceClass": instance.db_instance_class(),
            "engine": instance.engine(),
            "engineVersion": instance.engine_version(),
            "availabilityZone": instance.availability_zone(),
            "multiAZ": instance.multi_az(),
        })
    });

    json!({
        "dbInstance": instance,
        "ResponseMetadata": { "RequestId": request_id },
    })
}

#[async_trait]
impl DatabaseLifecycle for RdsInstanceController {
    async fn start_instance(&self, instance_identifier: &str) -> Result<Value, UpstreamError> {
        let output =
            self.client.start_db_instance().db_instance_identifier(instance_identifier).send().await?;

        Ok(instance_document(output.db_instance(), output.request_id()))
    }

    async fn stop_instance(&self, instance_identifier: &str) -> Result<Value, UpstreamError> {
        let output =
            self.client.stop_db_instance().db_instance_identifier(instance_identifier).send().await?;

        Ok(instance_document(output.db_instance(), output.request_id()))
    }
}
