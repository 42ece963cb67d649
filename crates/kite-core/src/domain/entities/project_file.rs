//! On-disk shape of `kite-cli.json` / `kite-cli.toml`.
//!
//! Every field is optional so that a hand-trimmed file still loads; whatever
//! is missing falls back to the built-in layout.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::project_config::{KindConfig, ProjectConfig},
    value_objects::{ModuleKind, NameGrammar},
};

/// File `kite init` writes and every module command reads.
pub const PROJECT_FILE_JSON: &str = "kite-cli.json";

/// Hand-written alternative, read when no JSON file is present.
pub const PROJECT_FILE_TOML: &str = "kite-cli.toml";

/// TypeScript compiler settings; `compilerOptions.rootDir` is the fallback source root.
pub const TSCONFIG_FILE: &str = "tsconfig.json";

/// Project configuration file as written by `kite init`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    /// Version of the CLI that wrote the file.
    #[serde(default)]
    pub cli_version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_grammar: Option<NameGrammar>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<KindEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<KindEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<KindEntry>,
}

/// One kind's section. Absent keys keep the built-in value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_suffix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

impl From<&KindConfig> for KindEntry {
    fn from(config: &KindConfig) -> Self {
        Self {
            folder: Some(config.folder.clone()),
            template: Some(config.template.clone()),
            file_suffix: Some(config.file_suffix.clone()),
            extension: Some(config.extension.clone()),
        }
    }
}

impl ProjectFile {
    /// Snapshot `config` into the persisted shape.
    ///
    /// `src_dir` is stored as given so the file stays relative to the project.
    pub fn from_config(
        config: &ProjectConfig,
        src_dir: impl Into<PathBuf>,
        cli_version: impl Into<String>,
    ) -> Self {
        let mut file = Self {
            cli_version: cli_version.into(),
            src_dir: Some(src_dir.into()),
            name_grammar: Some(config.grammar()),
            ..Self::default()
        };

        for (kind, kind_config) in config.kinds() {
            *file.entry_mut(*kind) = Some(KindEntry::from(kind_config));
        }

        file
    }

    pub fn entry(&self, kind: ModuleKind) -> Option<&KindEntry> {
        match kind {
            ModuleKind::Controller => self.controller.as_ref(),
            ModuleKind::Model => self.model.as_ref(),
            ModuleKind::Service => self.service.as_ref(),
        }
    }

    fn entry_mut(&mut self, kind: ModuleKind) -> &mut Option<KindEntry> {
        match kind {
            ModuleKind::Controller => &mut self.controller,
            ModuleKind::Model => &mut self.model,
            ModuleKind::Service => &mut self.service,
        }
    }

    /// Build the layout for `project_dir`.
    ///
    /// The source root is `srcDir` if the file sets it, else `fallback_src`
    /// (typically tsconfig's `rootDir`), else the project directory itself.
    pub fn into_config(self, project_dir: &Path, fallback_src: Option<PathBuf>) -> ProjectConfig {
        let src_dir = self
            .src_dir
            .clone()
            .or(fallback_src)
            .unwrap_or_else(|| PathBuf::from("."));

        let mut config = ProjectConfig::new(project_dir, &src_dir)
            .with_grammar(self.name_grammar.unwrap_or_default());

        for kind in ModuleKind::ALL {
            let Some(entry) = self.entry(kind) else {
                continue;
            };

            let mut kind_config = KindConfig::builtin(kind, &src_dir);
            if let Some(folder) = &entry.folder {
                kind_config.folder = folder.clone();
            }
            if let Some(template) = &entry.template {
                kind_config.template = template.clone();
            }
            if let Some(suffix) = &entry.file_suffix {
                kind_config.file_suffix = suffix.clone();
            }
            if let Some(extension) = &entry.extension {
                kind_config.extension = extension.clone();
            }

            config = config.with_kind(kind, kind_config);
        }

        config
    }
}
