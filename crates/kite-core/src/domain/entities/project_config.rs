use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{
    error::DomainError,
    paths::normalize,
    value_objects::{ModuleKind, NameGrammar},
};

/// Source extension every built-in kind produces.
pub const DEFAULT_EXTENSION: &str = "ts";

/// Per-kind layout: where files go, what they start from, how they are named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KindConfig {
    /// Folder relative to the project directory (e.g. `src/controllers`).
    pub folder: PathBuf,
    /// Template text with `$NAME$` placeholders. Empty means "use the built-in".
    pub template: String,
    /// Inserted before the extension: `greeting.controller.ts`. May be empty.
    pub file_suffix: String,
    /// Source extension without the dot.
    pub extension: String,
}

impl KindConfig {
    /// Built-in layout for `kind` under the source folder `src_dir`.
    pub fn builtin(kind: ModuleKind, src_dir: impl AsRef<Path>) -> Self {
        Self {
            folder: src_dir.as_ref().join(kind.default_folder()),
            template: String::new(),
            file_suffix: kind.default_suffix().to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.file_suffix = suffix.into();
        self
    }

    /// `.<extension>` as it appears at the end of a file name.
    pub fn dotted_extension(&self) -> String {
        format!(".{}", self.extension)
    }

    /// Ending appended to a bare module name: `.controller.ts` or `.ts`.
    pub fn file_ending(&self) -> String {
        if self.file_suffix.is_empty() {
            self.dotted_extension()
        } else {
            format!(".{}.{}", self.file_suffix, self.extension)
        }
    }

    pub fn has_template(&self) -> bool {
        !self.template.trim().is_empty()
    }
}

/// Immutable snapshot of a project's folder layout.
///
/// Produced once by a loader and passed by reference to the services; the
/// resolver never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    project_dir: PathBuf,
    root_dir: PathBuf,
    grammar: NameGrammar,
    kinds: BTreeMap<ModuleKind, KindConfig>,
}

impl ProjectConfig {
    /// Layout with the three built-in kinds under `src_dir`.
    ///
    /// `src_dir` is taken relative to `project_dir` unless it is absolute.
    pub fn new(project_dir: impl Into<PathBuf>, src_dir: impl AsRef<Path>) -> Self {
        let project_dir = normalize(&project_dir.into());
        let src_dir = src_dir.as_ref();
        let root_dir = normalize(&project_dir.join(src_dir));

        let kinds = ModuleKind::ALL
            .into_iter()
            .map(|kind| (kind, KindConfig::builtin(kind, src_dir)))
            .collect();

        Self {
            project_dir,
            root_dir,
            grammar: NameGrammar::default(),
            kinds,
        }
    }

    pub fn with_kind(mut self, kind: ModuleKind, config: KindConfig) -> Self {
        self.kinds.insert(kind, config);
        self
    }

    pub fn with_grammar(mut self, grammar: NameGrammar) -> Self {
        self.grammar = grammar;
        self
    }

    // Getters

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Absolute source root.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn grammar(&self) -> NameGrammar {
        self.grammar
    }

    pub fn kind(&self, kind: ModuleKind) -> Result<&KindConfig, DomainError> {
        self.kinds.get(&kind).ok_or_else(|| DomainError::MissingKind {
            kind: kind.to_string(),
        })
    }

    pub fn kinds(&self) -> impl Iterator<Item = (&ModuleKind, &KindConfig)> {
        self.kinds.iter()
    }

    /// Absolute folder for `kind`.
    pub fn kind_folder(&self, kind: ModuleKind) -> Result<PathBuf, DomainError> {
        let config = self.kind(kind)?;
        Ok(normalize(&self.project_dir.join(&config.folder)))
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.project_dir.is_absolute() {
            return Err(DomainError::InvalidConfig(format!(
                "project directory must be absolute: {}",
                self.project_dir.display()
            )));
        }

        if !self.root_dir.starts_with(&self.project_dir) {
            return Err(DomainError::InvalidConfig(format!(
                "source root {} is outside the project directory",
                self.root_dir.display()
            )));
        }

        for (kind, config) in &self.kinds {
            if config.folder.is_absolute() {
                return Err(DomainError::InvalidConfig(format!(
                    "{kind}: folder must be relative to the project directory, got {}",
                    config.folder.display()
                )));
            }
            if !normalize(&self.project_dir.join(&config.folder)).starts_with(&self.project_dir) {
                return Err(DomainError::InvalidConfig(format!(
                    "{kind}: folder {} is outside the project directory",
                    config.folder.display()
                )));
            }
            if config.extension.is_empty() || config.extension.contains('.') {
                return Err(DomainError::InvalidConfig(format!(
                    "{kind}: extension must be a bare name like \"ts\", got \"{}\"",
                    config.extension
                )));
            }
            if config.file_suffix.contains(['/', '\\']) {
                return Err(DomainError::InvalidConfig(format!(
                    "{kind}: file suffix cannot contain path separators"
                )));
            }
        }

        Ok(())
    }
}
