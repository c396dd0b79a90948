use staging_toggle_core::EnvironmentTarget;

use crate::console::print_table;

pub fn handle_config(target: &EnvironmentTarget) {
    let rows = vec![
        vec!["CLUSTER_NAME".to_string(), target.cluster_name.clone()],
        vec!["SERVICE_NAME".to_string(), target.service_name.clone()],
        vec!["DB_INSTANCE_IDENTIFIER".to_string(), target.db_instance_identifier.clone()],
        vec!["AWS_REGION".to_string(), target.region.clone()],
        vec!["LOG_GROUP".to_string(), target.log_group.clone()],
        vec![
            "AWS_ENDPOINT_URL".to_string(),
            target.endpoint_url.clone().unwrap_or_else(|| "(default)".to_string()),
        ],
    ];

    print_table(vec!["Setting", "Value"], rows, Some("Staging environment target"));
}
