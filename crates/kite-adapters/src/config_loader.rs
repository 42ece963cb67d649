//! Project configuration loader.
//!
//! Reads `kite-cli.json` (or `kite-cli.toml`) from a project directory and
//! turns it into the [`ProjectConfig`] the services work with.
//!
//! # Source root resolution
//!
//! 1. `srcDir` from the configuration file.
//! 2. `compilerOptions.rootDir` from `tsconfig.json`.
//! 3. The project directory itself.
//!
//! # `kite-cli.json` format
//!
//! ```json
//! {
//!     "cliVersion": "0.1.0",
//!     "srcDir": "src",
//!     "nameGrammar": "extended",
//!     "controller": {
//!         "folder": "src/controllers",
//!         "template": "...",
//!         "fileSuffix": "controller",
//!         "extension": "ts"
//!     },
//!     "model": { "folder": "src/models" },
//!     "service": { "folder": "src/services" }
//! }
//! ```
//!
//! The TOML variant uses the same keys, with `[controller]`-style tables.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use kite_core::{
    application::ApplicationError,
    domain::{PROJECT_FILE_JSON, PROJECT_FILE_TOML, ProjectConfig, ProjectFile, TSCONFIG_FILE},
    error::{KiteError, KiteResult},
};

/// Loads the project configuration for one project directory.
#[derive(Debug, Clone)]
pub struct ProjectConfigLoader {
    project_dir: PathBuf,
    explicit_file: Option<PathBuf>,
}

impl ProjectConfigLoader {
    /// Loader that looks for `kite-cli.json`, then `kite-cli.toml`, in `project_dir`.
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            explicit_file: None,
        }
    }

    /// Loader for a specific file; its directory becomes the project directory.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let project_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            project_dir,
            explicit_file: Some(path),
        }
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// The file `load` would read, if any.
    pub fn config_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.explicit_file {
            return Some(path.clone());
        }

        [PROJECT_FILE_JSON, PROJECT_FILE_TOML]
            .into_iter()
            .map(|name| self.project_dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Read and parse the configuration file, without resolving the layout.
    pub fn read_file(&self) -> KiteResult<(PathBuf, ProjectFile)> {
        let path = self.config_path().ok_or_else(|| {
            missing(
                &self.project_dir.join(PROJECT_FILE_JSON),
                format!("neither {PROJECT_FILE_JSON} nor {PROJECT_FILE_TOML} found"),
            )
        })?;

        let text = fs::read_to_string(&path).map_err(|e| missing(&path, e.to_string()))?;
        let file = parse(&path, &text)?;
        Ok((path, file))
    }

    /// Load the layout for this project.
    #[instrument(skip_all, fields(project_dir = %self.project_dir.display()))]
    pub fn load(&self) -> KiteResult<ProjectConfig> {
        let project_dir = std::path::absolute(&self.project_dir).map_err(|e| {
            missing(&self.project_dir, format!("cannot resolve project directory: {e}"))
        })?;

        let (path, file) = self.read_file()?;
        debug!(path = %path.display(), "project configuration read");

        let fallback_src = match file.src_dir {
            Some(_) => None,
            None => tsconfig_root_dir(&project_dir),
        };

        let config = file.into_config(&project_dir, fallback_src);
        config.validate()?;

        debug!(root_dir = %config.root_dir().display(), "project configuration loaded");
        Ok(config)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TsConfig {
    #[serde(default)]
    compiler_options: CompilerOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompilerOptions {
    root_dir: Option<PathBuf>,
}

/// `compilerOptions.rootDir` from `tsconfig.json`, if it can be read.
pub fn tsconfig_root_dir(project_dir: &Path) -> Option<PathBuf> {
    let path = project_dir.join(TSCONFIG_FILE);
    let text = fs::read_to_string(&path).ok()?;

    match serde_json::from_str::<TsConfig>(&text) {
        Ok(tsconfig) => tsconfig.compiler_options.root_dir,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unparseable tsconfig.json");
            None
        }
    }
}

fn parse(path: &Path, text: &str) -> KiteResult<ProjectFile> {
    let is_toml = path.extension().is_some_and(|ext| ext == "toml");

    if is_toml {
        toml::from_str(text).map_err(|e| missing(path, format!("invalid TOML: {e}")))
    } else {
        serde_json::from_str(text).map_err(|e| missing(path, format!("invalid JSON: {e}")))
    }
}

fn missing(path: &Path, reason: impl Into<String>) -> KiteError {
    ApplicationError::MissingConfiguration {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kite_core::domain::{ModuleKind, NameGrammar};
    use kite_core::error::ErrorCategory;
    use tempfile::TempDir;

    fn project(files: &[(&str, &str)]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(tmp.path().join(name), content).unwrap();
        }
        tmp
    }

    #[test]
    fn missing_file_is_configuration_error() {
        let tmp = project(&[]);
        let err = ProjectConfigLoader::new(tmp.path()).load().unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.suggestions().iter().any(|s| s.contains("kite init")));
    }

    #[test]
    fn malformed_json_is_configuration_error() {
        let tmp = project(&[("kite-cli.json", "{ not json")]);
        let err = ProjectConfigLoader::new(tmp.path()).load().unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn src_dir_from_file() {
        let tmp = project(&[("kite-cli.json", r#"{ "srcDir": "app" }"#)]);
        let config = ProjectConfigLoader::new(tmp.path()).load().unwrap();
        assert_eq!(config.root_dir(), tmp.path().join("app"));
        assert_eq!(
            config.kind_folder(ModuleKind::Controller).unwrap(),
            tmp.path().join("app/controllers")
        );
    }

    #[test]
    fn src_dir_falls_back_to_tsconfig() {
        let tmp = project(&[
            ("kite-cli.json", "{}"),
            ("tsconfig.json", r#"{ "compilerOptions": { "rootDir": "lib" } }"#),
        ]);
        let config = ProjectConfigLoader::new(tmp.path()).load().unwrap();
        assert_eq!(config.root_dir(), tmp.path().join("lib"));
    }

    #[test]
    fn src_dir_defaults_to_project_dir() {
        let tmp = project(&[("kite-cli.json", "{}")]);
        let config = ProjectConfigLoader::new(tmp.path()).load().unwrap();
        assert_eq!(config.root_dir(), tmp.path());
    }

    #[test]
    fn toml_is_read_when_json_is_absent() {
        let tmp = project(&[(
            "kite-cli.toml",
            r#"
srcDir = "src"
nameGrammar = "simple"

[service]
fileSuffix = ""
"#,
        )]);
        let config = ProjectConfigLoader::new(tmp.path()).load().unwrap();
        assert_eq!(config.grammar(), NameGrammar::Simple);
        assert_eq!(config.kind(ModuleKind::Service).unwrap().file_suffix, "");
    }

    #[test]
    fn json_wins_over_toml() {
        let tmp = project(&[
            ("kite-cli.json", r#"{ "srcDir": "from-json" }"#),
            ("kite-cli.toml", r#"srcDir = "from-toml""#),
        ]);
        let loader = ProjectConfigLoader::new(tmp.path());
        assert_eq!(loader.config_path(), Some(tmp.path().join("kite-cli.json")));
        assert_eq!(loader.load().unwrap().root_dir(), tmp.path().join("from-json"));
    }

    #[test]
    fn invalid_extension_is_rejected() {
        let tmp = project(&[("kite-cli.json", r#"{ "model": { "extension": ".ts" } }"#)]);
        let err = ProjectConfigLoader::new(tmp.path()).load().unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn folder_escaping_project_is_rejected() {
        for file in [
            r#"{ "controller": { "folder": "../../outside" } }"#,
            r#"{ "model": { "folder": "/etc" } }"#,
        ] {
            let tmp = project(&[("kite-cli.json", file)]);
            let err = ProjectConfigLoader::new(tmp.path()).load().unwrap_err();
            assert_eq!(err.category(), ErrorCategory::Configuration, "{file}");
            assert!(err.to_string().contains("folder"), "{file}");
        }
    }

    #[test]
    fn from_file_uses_parent_as_project_dir() {
        let tmp = project(&[("custom.json", r#"{ "srcDir": "src" }"#)]);
        let loader = ProjectConfigLoader::from_file(tmp.path().join("custom.json"));
        assert_eq!(loader.project_dir(), tmp.path());
        assert_eq!(loader.load().unwrap().root_dir(), tmp.path().join("src"));
    }

    #[test]
    fn unparseable_tsconfig_is_ignored() {
        let tmp = project(&[("tsconfig.json", "{ // comment\n }")]);
        assert_eq!(tsconfig_root_dir(tmp.path()), None);
    }
}
