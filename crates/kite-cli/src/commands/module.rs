//! `kite controller|model|service <NAME>`.
//!
//! Translates the arguments into a [`ModuleRequest`], runs the module service
//! against the project's configuration and prints one status line.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, instrument};

use kite_adapters::LocalFilesystem;
use kite_core::{
    application::{GenerateOptions, GeneratedModule, ModuleService},
    domain::{ModuleKind, ModuleOutcome, ModuleRequest, NameGrammar},
};

use crate::{
    cli::{GlobalArgs, ModuleArgs},
    commands::{config_loader, templates},
    config::AppSettings,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute a module generator for `kind`.
#[instrument(skip_all, fields(kind = %kind, name = %args.name))]
pub fn execute(
    kind: ModuleKind,
    args: ModuleArgs,
    global: &GlobalArgs,
    settings: &AppSettings,
    output: &OutputManager,
) -> CliResult<()> {
    let mut config = config_loader(global)?.load()?;
    if let Some(grammar) = args.grammar {
        config = config.with_grammar(NameGrammar::from(grammar));
    }

    let mut options = GenerateOptions::default().dry_run(args.dry_run);
    if let Some(path) = &args.template {
        options = options.with_template(read_template(path)?);
    }

    let service = ModuleService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(templates(settings)),
    );
    let generated = service.generate(&ModuleRequest::new(&args.name, kind), &config, &options)?;
    debug!(outcome = %generated.module.outcome, written = generated.written, "module generated");

    report(&generated, config.project_dir(), output)?;

    match generated.module.outcome {
        ModuleOutcome::InvalidName { reason } => Err(CliError::InvalidModuleName {
            kind,
            name: args.name,
            reason,
            grammar: config.grammar(),
        }),
        ModuleOutcome::WouldCreate | ModuleOutcome::AlreadyExists => Ok(()),
    }
}

fn read_template(path: &Path) -> CliResult<String> {
    match fs::read_to_string(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(CliError::TemplateNotFound {
            path: path.to_path_buf(),
        }),
        other => other.with_cli_context(|| format!("reading template {}", path.display())),
    }
}

fn report(generated: &GeneratedModule, project_dir: &Path, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(generated)?;
        return Ok(());
    }

    let shown = generated.module.display_path(project_dir);
    match &generated.module.outcome {
        ModuleOutcome::WouldCreate if generated.written => {
            output.success(&format!("create {shown}"))?;
        }
        ModuleOutcome::WouldCreate => {
            output.info(&format!("would create {shown}"))?;
            if let Some(content) = &generated.content {
                output.print("")?;
                output.raw(content)?;
            }
        }
        ModuleOutcome::AlreadyExists => {
            output.warning(&format!("{shown} already exists"))?;
        }
        // Reported through the returned error.
        ModuleOutcome::InvalidName { .. } => {}
    }

    Ok(())
}
