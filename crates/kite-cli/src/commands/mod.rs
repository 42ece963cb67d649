//! Command handlers, one module per subcommand.

pub mod completions;
pub mod config;
pub mod init;
pub mod module;

use std::path::PathBuf;

use kite_adapters::{BuiltinTemplates, ProjectConfigLoader};

use crate::{
    cli::GlobalArgs,
    config::AppSettings,
    error::{CliResult, IntoCli},
};

/// Absolute project directory: `-C DIR` if given, else the working directory.
pub(crate) fn project_dir(global: &GlobalArgs) -> CliResult<PathBuf> {
    let dir = match &global.project_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()
            .with_cli_context(|| "cannot determine the current directory")?,
    };
    std::path::absolute(&dir)
        .with_cli_context(|| format!("cannot resolve project directory {}", dir.display()))
}

/// Loader for `--project-config FILE` if given, else for the configuration
/// files in [`project_dir`].
///
/// A relative FILE is resolved from the working directory, not from `-C`.
pub(crate) fn config_loader(global: &GlobalArgs) -> CliResult<ProjectConfigLoader> {
    match &global.project_config {
        Some(file) => {
            let file = std::path::absolute(file)
                .with_cli_context(|| format!("cannot resolve {}", file.display()))?;
            Ok(ProjectConfigLoader::from_file(file))
        }
        None => Ok(ProjectConfigLoader::new(project_dir(global)?)),
    }
}

/// Template provider honouring `templates.dir`, then `$KITE_TEMPLATES_DIR`.
pub(crate) fn templates(settings: &AppSettings) -> BuiltinTemplates {
    match &settings.templates.dir {
        Some(dir) => BuiltinTemplates::new().with_dir(dir),
        None => BuiltinTemplates::from_env(),
    }
}
