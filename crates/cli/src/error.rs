use thiserror::Error;

/// Top-level CLI error
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Toggle failed: {0}")]
    Toggle(#[from] staging_toggle_core::ToggleError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid path: {0}")]
    Path(String),
}
