use staging_toggle_core::{Action, EnvironmentTarget, ToggleRequest, ToggleRuntime};

use crate::{
    console::{print_error_message, print_success_message},
    error::CliError,
};

/// Function name used for the log stream when running outside Lambda.
const LOCAL_FUNCTION_NAME: &str = "staging-toggle-cli";

fn local_request_id() -> String {
    format!("local-{}", chrono::Utc::now().format("%Y%m%dT%H%M%S%.3fZ"))
}

pub async fn handle_toggle(
    action: Action,
    target: EnvironmentTarget,
    ship_logs: bool,
) -> Result<(), CliError> {
    let runtime = ToggleRuntime::start(target, ship_logs).await;
    let log = runtime.invocation_log(LOCAL_FUNCTION_NAME, &local_request_id());

    let outcome = runtime.handler().handle(&ToggleRequest::new(action.as_str()), &log).await;
    log.flush().await;

    match outcome {
        Ok(result) => {
            print_success_message(&serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(e) => {
            print_error_message(&format!("{} failed: {}", action, e));
            Err(e.into())
        }
    }
}
