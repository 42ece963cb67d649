//! CLI settings.
//!
//! [`AppSettings`] is loaded once at startup and passed down by reference.
//! It holds personal defaults for `kite init` and output preferences; the
//! per-project layout lives in `kite-cli.json` and is read by the adapters.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied at the call-site, see [`AppSettings::init_options`])
//! 2. `KITE__*` environment variables, e.g. `KITE__INIT__PORT=8080`
//! 3. Settings file (`--config FILE`, else the platform config dir)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use kite_core::application::InitOptions;
use kite_core::domain::NameGrammar;

use crate::cli::{InitArgs, OutputFormat};

/// Environment prefix for settings overrides.
const ENV_PREFIX: &str = "KITE";

/// CLI settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Defaults for `kite init`.
    pub init: InitDefaults,
    /// Output settings.
    pub output: OutputSettings,
    /// Template settings.
    pub templates: TemplateSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InitDefaults {
    pub src_dir: PathBuf,
    pub out_dir: PathBuf,
    pub source_map: bool,
    pub hostname: String,
    pub port: u16,
    pub entry_point: String,
    pub errors_file: String,
    pub grammar: NameGrammar,
}

impl Default for InitDefaults {
    fn default() -> Self {
        let options = InitOptions::default();
        Self {
            src_dir: options.src_dir,
            out_dir: options.out_dir,
            source_map: options.source_map,
            hostname: options.hostname,
            port: options.port,
            entry_point: options.entry_point,
            errors_file: options.errors_file,
            grammar: options.grammar,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub no_color: bool,
    /// Used when `--output-format` is left at `auto`.
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Directory whose files shadow the built-in templates. Takes precedence
    /// over `$KITE_TEMPLATES_DIR`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl AppSettings {
    /// Load settings from defaults, the settings file and the environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::config_path(), false),
        };
        tracing::debug!(path = %path.display(), required, "loading settings");

        Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::from(path.as_path()).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("reading settings from {}", path.display()))?
            .try_deserialize()
            .context("invalid settings")
    }

    /// Path to the default settings file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.kite.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "kite", "kite")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".kite.toml"))
    }

    /// Merge `kite init` flags over the configured defaults.
    pub fn init_options(&self, args: &InitArgs) -> InitOptions {
        let defaults = &self.init;
        InitOptions {
            src_dir: args.src.clone().unwrap_or_else(|| defaults.src_dir.clone()),
            out_dir: args.out.clone().unwrap_or_else(|| defaults.out_dir.clone()),
            source_map: defaults.source_map && !args.no_source_map,
            hostname: args
                .host
                .clone()
                .unwrap_or_else(|| defaults.hostname.clone()),
            port: args.port.unwrap_or(defaults.port),
            entry_point: args
                .entry
                .clone()
                .unwrap_or_else(|| defaults.entry_point.clone()),
            errors_file: args
                .errors
                .clone()
                .unwrap_or_else(|| defaults.errors_file.clone()),
            grammar: args.grammar.map(NameGrammar::from).unwrap_or(defaults.grammar),
            ..InitOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::GrammarArg;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_init_options() {
        let settings = AppSettings::default();
        assert_eq!(settings.init.port, 4000);
        assert_eq!(settings.init.hostname, "127.0.0.1");
        assert_eq!(settings.init.src_dir, PathBuf::from("src"));
        assert!(settings.init.source_map);
        assert_eq!(settings.output.format, OutputFormat::Auto);
    }

    #[test]
    fn init_options_without_flags_are_defaults() {
        let options = AppSettings::default().init_options(&InitArgs::default());
        assert_eq!(options, InitOptions::default());
    }

    #[test]
    fn flags_override_defaults() {
        let args = InitArgs {
            src: Some(PathBuf::from("app")),
            port: Some(8080),
            no_source_map: true,
            grammar: Some(GrammarArg::Simple),
            ..InitArgs::default()
        };
        let options = AppSettings::default().init_options(&args);
        assert_eq!(options.src_dir, PathBuf::from("app"));
        assert_eq!(options.port, 8080);
        assert!(!options.source_map);
        assert_eq!(options.grammar, NameGrammar::Simple);
        assert_eq!(options.out_dir, PathBuf::from("dist"));
    }

    #[test]
    fn settings_file_is_layered_over_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        fs::write(
            &path,
            r#"
[init]
port = 9000
grammar = "simple"

[output]
format = "plain"
"#,
        )
        .unwrap();

        let settings = AppSettings::load(Some(&path)).unwrap();
        assert_eq!(settings.init.port, 9000);
        assert_eq!(settings.init.grammar, NameGrammar::Simple);
        assert_eq!(settings.init.hostname, "127.0.0.1");
        assert_eq!(settings.output.format, OutputFormat::Plain);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(AppSettings::load(Some(&tmp.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        fs::write(&path, "[init\nport = ").unwrap();
        assert!(AppSettings::load(Some(&path)).is_err());
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppSettings::config_path().as_os_str().is_empty());
    }
}
