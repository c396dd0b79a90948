mod action;
pub use action::{Action, UnknownActionError, DEFAULT_ACTION};
pub mod aws;
mod environment;
pub use environment::{flag_from_env, load_env_from_project_path, EnvironmentTarget};
pub mod log_sink;
pub use log_sink::{InvocationLog, LogSink};
mod logger;
pub use logger::{setup_info_logger, setup_logger};
#[cfg(feature = "aws")]
mod startup;
#[cfg(feature = "aws")]
pub use startup::ToggleRuntime;
mod toggle;
pub use toggle::{EnvironmentToggleHandler, ToggleError, ToggleRequest, ToggleResult};
