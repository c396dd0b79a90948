use std::{env, path::PathBuf, process::ExitCode, str::FromStr};

use clap::Parser;
use staging_toggle_core::{load_env_from_project_path, setup_info_logger, Action, EnvironmentTarget};

use crate::{
    cli_interface::{Cli, Commands},
    commands::{config, toggle},
    console::print_error_message,
    error::CliError,
};

mod cli_interface;
mod commands;
mod console;
mod error;

fn resolve_path(override_path: &Option<String>) -> Result<PathBuf, CliError> {
    let path = match override_path {
        Some(path) => PathBuf::from_str(path)
            .map_err(|_| CliError::Path(format!("Invalid path provided: '{}'", path)))?,
        None => env::current_dir()
            .map_err(|_| CliError::Path("Failed to get current directory.".to_string()))?,
    };

    path.canonicalize()
        .map_err(|e| CliError::Path(format!("Failed to resolve path '{}': {}", path.display(), e)))
}

fn load_target(path: &Option<String>) -> Result<EnvironmentTarget, CliError> {
    let resolved_path = resolve_path(path)?;
    load_env_from_project_path(&resolved_path);
    Ok(EnvironmentTarget::from_env())
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Start { path, ship_logs } => {
            toggle::handle_toggle(Action::Start, load_target(&path)?, ship_logs).await
        }
        Commands::Stop { path, ship_logs } => {
            toggle::handle_toggle(Action::Stop, load_target(&path)?, ship_logs).await
        }
        Commands::Config { path } => {
            config::handle_config(&load_target(&path)?);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_info_logger();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Toggle(_)) => ExitCode::FAILURE,
        Err(e) => {
            print_error_message(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
