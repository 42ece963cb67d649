//! Module Service - resolves, renders and writes one module stub.
//!
//! The workflow for `kite controller greeting`:
//! 1. Pick the folder the module lands in and derive the file path
//! 2. Validate the name and fold it into a PascalCase identifier
//! 3. Probe for an existing file
//! 4. Render the kind's template and write it (create-new)
//!
//! Steps 1-3 are [`ModuleService::resolve`] and never write anything.

use std::ffi::OsString;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateProvider},
    },
    domain::{
        DomainValidator as validator, KindConfig, ModuleKind, ModuleOutcome, ModuleRequest,
        ProjectConfig, ResolvedModule, naming, paths, render, rewrite_root_imports,
    },
    error::KiteResult,
};

/// Knobs for a single `generate` call.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Resolve and render, but leave the filesystem untouched.
    pub dry_run: bool,
    /// Template text that replaces both the configured and the built-in one.
    pub template_override: Option<String>,
}

impl GenerateOptions {
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template_override = Some(template.into());
        self
    }
}

/// What `generate` did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedModule {
    #[serde(flatten)]
    pub module: ResolvedModule,
    /// Rendered text; `None` unless the outcome was `WouldCreate`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub written: bool,
}

impl GeneratedModule {
    fn untouched(module: ResolvedModule) -> Self {
        Self {
            module,
            content: None,
            written: false,
        }
    }
}

/// Resolves module names to files and materializes them.
pub struct ModuleService {
    filesystem: Box<dyn Filesystem>,
    templates: Box<dyn TemplateProvider>,
}

impl ModuleService {
    pub fn new(filesystem: Box<dyn Filesystem>, templates: Box<dyn TemplateProvider>) -> Self {
        Self {
            filesystem,
            templates,
        }
    }

    /// Decide where `request` lands and whether it can be created.
    ///
    /// Read-only: the only filesystem calls are the folder probe and, for
    /// valid names, the file-existence probe. Calling it twice on an
    /// unchanged tree gives the same answer.
    #[instrument(
        skip_all,
        fields(kind = %request.kind(), name = %request.raw_name())
    )]
    pub fn resolve(
        &self,
        request: &ModuleRequest,
        config: &ProjectConfig,
    ) -> KiteResult<ResolvedModule> {
        let kind = request.kind();
        let kind_config = config.kind(kind)?;

        let kind_folder = config.kind_folder(kind)?;
        let default_folder = if self.filesystem.dir_exists(&kind_folder)? {
            kind_folder
        } else {
            debug!(folder = %kind_folder.display(), "Kind folder missing, using source root");
            config.root_dir().to_path_buf()
        };

        let raw = request.raw_name().trim();
        let relative = relative_target(raw, config.project_dir(), &default_folder);
        let target = default_folder.join(&relative);

        let Some(file_name) = relative.file_name().and_then(|n| n.to_str()) else {
            return Ok(invalid(kind, target, "name can not be empty"));
        };

        let (path, stem) = split_extension(&target, file_name, kind_config);

        if let Err(reason) = validator::validate_module_name(&stem, config.grammar()) {
            debug!(%reason, "Module name rejected");
            return Ok(invalid(kind, path, reason));
        }

        let identifier = naming::to_pascal_case(&stem);
        if identifier.is_empty() {
            return Ok(invalid(
                kind,
                path,
                "name must contain at least one letter or digit",
            ));
        }

        let outcome = if self.filesystem.file_exists(&path)? {
            ModuleOutcome::AlreadyExists
        } else {
            ModuleOutcome::WouldCreate
        };

        debug!(path = %path.display(), %identifier, %outcome, "Module resolved");

        Ok(ResolvedModule {
            kind,
            path,
            identifier,
            outcome,
        })
    }

    /// Produce the file text for a resolved module.
    ///
    /// `template_override` wins over the configured template, which wins over
    /// the built-in one.
    pub fn render(
        &self,
        module: &ResolvedModule,
        config: &ProjectConfig,
        template_override: Option<&str>,
    ) -> KiteResult<String> {
        if module.identifier.is_empty() {
            return Err(ApplicationError::ValidationFailed(format!(
                "cannot render {} without an identifier",
                module.path.display()
            ))
            .into());
        }

        let template = match template_override {
            Some(text) => text.to_string(),
            None => self.template_for(module, config)?,
        };

        let text = render(&template, &module.identifier);

        let file_dir = module.path.parent().unwrap_or(config.root_dir());
        let prefix = paths::import_prefix(file_dir, config.root_dir());

        Ok(rewrite_root_imports(&text, &prefix))
    }

    /// Resolve, render and write one module.
    ///
    /// `AlreadyExists` and `InvalidName` are returned as-is with nothing
    /// written; only I/O and configuration problems are errors.
    #[instrument(
        skip_all,
        fields(kind = %request.kind(), name = %request.raw_name(), dry_run = options.dry_run)
    )]
    pub fn generate(
        &self,
        request: &ModuleRequest,
        config: &ProjectConfig,
        options: &GenerateOptions,
    ) -> KiteResult<GeneratedModule> {
        validator::validate_project_config(config)?;

        let module = self.resolve(request, config)?;

        match &module.outcome {
            ModuleOutcome::WouldCreate => {}
            ModuleOutcome::AlreadyExists => {
                info!(path = %module.path.display(), "Module already exists, skipping");
                return Ok(GeneratedModule::untouched(module));
            }
            ModuleOutcome::InvalidName { reason } => {
                warn!(%reason, "Invalid module name");
                return Ok(GeneratedModule::untouched(module));
            }
        }

        let content = self.render(&module, config, options.template_override.as_deref())?;

        if options.dry_run {
            info!(path = %module.path.display(), "Dry run, not writing");
            return Ok(GeneratedModule {
                module,
                content: Some(content),
                written: false,
            });
        }

        if let Some(parent) = module.path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_new(&module.path, &content)?;

        info!(path = %module.path.display(), "Module created");

        Ok(GeneratedModule {
            module,
            content: Some(content),
            written: true,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn template_for(&self, module: &ResolvedModule, config: &ProjectConfig) -> KiteResult<String> {
        let kind_config = config.kind(module.kind)?;
        if kind_config.has_template() {
            return Ok(kind_config.template.clone());
        }

        warn!(kind = %module.kind, "No template configured, using built-in");
        let text = self.templates.module_template(module.kind)?;
        if text.trim().is_empty() {
            return Err(ApplicationError::TemplateUnavailable {
                kind: module.kind.to_string(),
            }
            .into());
        }
        Ok(text)
    }
}

/// Path of the module relative to `default_folder`.
///
/// Names with a separator are resolved against the project directory first;
/// anything that does not land under `default_folder` is re-rooted there.
fn relative_target(raw: &str, project_dir: &Path, default_folder: &Path) -> PathBuf {
    let raw_path = Path::new(raw);

    if raw.contains('/') || raw.contains(MAIN_SEPARATOR) {
        let absolute = paths::normalize(&project_dir.join(raw_path));
        if let Ok(inside) = absolute.strip_prefix(default_folder) {
            return inside.to_path_buf();
        }
    }

    paths::confine(raw_path)
}

/// Split `file_name` into the final path and the stem used for the identifier.
fn split_extension(target: &Path, file_name: &str, kind: &KindConfig) -> (PathBuf, String) {
    match file_name.strip_suffix(&kind.dotted_extension()) {
        Some(stem) => (target.to_path_buf(), stem.to_string()),
        None => {
            let mut path = OsString::from(target.as_os_str());
            path.push(kind.file_ending());
            (PathBuf::from(path), file_name.to_string())
        }
    }
}

fn invalid(
    kind: ModuleKind,
    path: PathBuf,
    reason: impl Into<String>,
) -> ResolvedModule {
    ResolvedModule {
        kind,
        path,
        identifier: String::new(),
        outcome: ModuleOutcome::InvalidName {
            reason: reason.into(),
        },
    }
}
