//! Built-in template text.
//!
//! The stubs that ship with Kite are compiled into the binary from
//! `templates/`. A directory named by `$KITE_TEMPLATES_DIR` (or passed to
//! [`BuiltinTemplates::with_dir`]) can shadow any of them file by file:
//!
//! ```text
//! templates/
//! ├── controller.ts
//! ├── model.ts
//! ├── service.ts
//! ├── errors.ts
//! ├── kite.config.ts
//! └── app.server.ts
//! ```
//!
//! Files missing from the override directory fall back to the embedded copy.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use kite_core::{
    application::{ApplicationError, ports::TemplateProvider},
    domain::{Boilerplate, ModuleKind},
    error::KiteResult,
};

/// Environment variable naming a directory of template overrides.
pub const TEMPLATES_DIR_ENV: &str = "KITE_TEMPLATES_DIR";

const CONTROLLER: &str = include_str!("../templates/controller.ts");
const MODEL: &str = include_str!("../templates/model.ts");
const SERVICE: &str = include_str!("../templates/service.ts");
const ERRORS: &str = include_str!("../templates/errors.ts");
const KITE_CONFIG: &str = include_str!("../templates/kite.config.ts");
const APP: &str = include_str!("../templates/app.server.ts");

/// Template provider backed by the embedded stubs.
#[derive(Debug, Clone, Default)]
pub struct BuiltinTemplates {
    override_dir: Option<PathBuf>,
}

impl BuiltinTemplates {
    /// Embedded templates only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Embedded templates, shadowed by `$KITE_TEMPLATES_DIR` when it is set.
    pub fn from_env() -> Self {
        match std::env::var_os(TEMPLATES_DIR_ENV) {
            Some(dir) if !dir.is_empty() => {
                debug!(path = ?dir, "template overrides from ${TEMPLATES_DIR_ENV}");
                Self::new().with_dir(dir)
            }
            _ => Self::new(),
        }
    }

    /// Shadow the embedded templates with files from `dir`.
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.override_dir = Some(dir.into());
        self
    }

    pub fn override_dir(&self) -> Option<&Path> {
        self.override_dir.as_deref()
    }

    /// Embedded text for `kind`.
    pub fn embedded_module(kind: ModuleKind) -> &'static str {
        match kind {
            ModuleKind::Controller => CONTROLLER,
            ModuleKind::Model => MODEL,
            ModuleKind::Service => SERVICE,
        }
    }

    /// Embedded text for `file`.
    pub fn embedded_boilerplate(file: Boilerplate) -> &'static str {
        match file {
            Boilerplate::Errors => ERRORS,
            Boilerplate::KiteConfig => KITE_CONFIG,
            Boilerplate::App => APP,
        }
    }

    fn lookup(&self, file_name: &str, embedded: &'static str) -> KiteResult<String> {
        let Some(dir) = &self.override_dir else {
            return Ok(embedded.to_string());
        };

        let path = dir.join(file_name);
        match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => {
                warn!(path = %path.display(), "template override is empty, using built-in");
                Ok(embedded.to_string())
            }
            Ok(text) => {
                debug!(path = %path.display(), "using template override");
                Ok(text)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(embedded.to_string()),
            Err(e) => Err(ApplicationError::FilesystemError {
                path,
                reason: format!("Failed to read template: {e}"),
            }
            .into()),
        }
    }
}

impl TemplateProvider for BuiltinTemplates {
    fn module_template(&self, kind: ModuleKind) -> KiteResult<String> {
        self.lookup(&format!("{kind}.ts"), Self::embedded_module(kind))
    }

    fn boilerplate(&self, file: Boilerplate) -> KiteResult<String> {
        let name = match file {
            Boilerplate::Errors => "errors.ts",
            Boilerplate::KiteConfig => "kite.config.ts",
            Boilerplate::App => "app.server.ts",
        };
        self.lookup(name, Self::embedded_boilerplate(file))
    }
}
