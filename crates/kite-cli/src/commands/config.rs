//! `kite config`: inspect the project configuration and CLI settings.

use kite_core::{
    application::ApplicationError,
    domain::{PROJECT_FILE_JSON, PROJECT_FILE_TOML},
};

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    commands::config_loader,
    config::AppSettings,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: &GlobalArgs,
    settings: &AppSettings,
    output: &OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Show => {
            let config = config_loader(global)?.load()?;
            output.json(&config)?;
        }

        ConfigCommands::Path { settings: true } => {
            let path = global
                .config
                .clone()
                .unwrap_or_else(AppSettings::config_path);
            output.raw(&path.display().to_string())?;
        }

        ConfigCommands::Path { settings: false } => {
            let loader = config_loader(global)?;
            let path = loader.config_path().ok_or_else(|| {
                CliError::from(kite_core::error::KiteError::from(
                    ApplicationError::MissingConfiguration {
                        path: loader.project_dir().join(PROJECT_FILE_JSON),
                        reason: format!("neither {PROJECT_FILE_JSON} nor {PROJECT_FILE_TOML} found"),
                    },
                ))
            })?;
            output.raw(&path.display().to_string())?;
        }

        ConfigCommands::Settings => {
            output.raw(&render_settings(settings)?)?;
        }
    }

    Ok(())
}

fn render_settings(settings: &AppSettings) -> CliResult<String> {
    toml::to_string_pretty(settings).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise settings: {e}"),
        source: Some(Box::new(e)),
    })
}
