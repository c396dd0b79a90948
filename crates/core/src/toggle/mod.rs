mod handler;
mod types;

pub use handler::EnvironmentToggleHandler;
pub use types::{ToggleError, ToggleRequest, ToggleResult};
