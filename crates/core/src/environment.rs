use std::{env, path::Path};

use dotenvy::{dotenv, from_path};

pub const DEFAULT_CLUSTER_NAME: &str = "staging-cluster";
pub const DEFAULT_SERVICE_NAME: &str = "staging-service";
pub const DEFAULT_DB_INSTANCE_IDENTIFIER: &str = "staging-db";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_LOG_GROUP: &str = "/custom/staging-cost-saver";

/// Loads environment variables from a .env file in the project directory.
///
/// First attempts to load a .env file from the specified project path.
/// If that fails (file doesn't exist or cannot be read), falls back to
/// loading from the current working directory or system environment.
///
/// # Arguments
/// * `project_path` - Path to the project directory to search for .env file
pub fn load_env_from_project_path(project_path: &Path) {
    if from_path(project_path.join(".env")).is_err() {
        dotenv().ok();
    }
}

/// The resources a toggle acts on, resolved once when the process starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentTarget {
    pub cluster_name: String,
    pub service_name: String,
    pub db_instance_identifier: String,
    pub region: String,
    pub log_group: String,
    /// Overrides the AWS endpoints, e.g. for LocalStack.
    pub endpoint_url: Option<String>,
}

impl Default for EnvironmentTarget {
    fn default() -> Self {
        Self {
            cluster_name: DEFAULT_CLUSTER_NAME.to_string(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            db_instance_identifier: DEFAULT_DB_INSTANCE_IDENTIFIER.to_string(),
            region: DEFAULT_REGION.to_string(),
            log_group: DEFAULT_LOG_GROUP.to_string(),
            endpoint_url: None,
        }
    }
}

impl EnvironmentTarget {
    /// Resolves the target from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves the target through `lookup`; missing or empty values fall back
    /// to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Self {
            cluster_name: read("CLUSTER_NAME").unwrap_or(defaults.cluster_name),
            service_name: read("SERVICE_NAME").unwrap_or(defaults.service_name),
            db_instance_identifier: read("DB_INSTANCE_IDENTIFIER")
                .unwrap_or(defaults.db_instance_identifier),
            region: read("AWS_REGION").unwrap_or(defaults.region),
            log_group: read("LOG_GROUP").unwrap_or(defaults.log_group),
            endpoint_url: read("AWS_ENDPOINT_URL"),
        }
    }
}

/// Reads a boolean flag such as `SHIP_LOGS`; anything other than a recognised
/// falsy value keeps `default`.
pub fn flag_from_env(key: &str, default: bool) -> bool {
    parse_flag(env::var(key).ok().as_deref(), default)
}

fn parse_flag(value: Option<&str>, default: bool) -> bool {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("0" | "false" | "no" | "off") => false,
        Some("1" | "true" | "yes" | "on") => true,
        _ => default,
    }
}
