//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use kite_core::domain::NameGrammar;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "kite",
    bin_name = "kite",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffolding for Kite applications",
    long_about = "Kite lays out new Kite (TypeScript) projects and generates \
                  controllers, models and services inside them.",
    after_help = "EXAMPLES:\n\
        \x20 kite init\n\
        \x20 kite controller user\n\
        \x20 kite model admin/user-profile\n\
        \x20 kite completions bash > /usr/share/bash-completion/completions/kite",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Lay out a new Kite project in an existing npm package.
    #[command(
        about = "Initialise a Kite project",
        after_help = "EXAMPLES:\n\
            \x20 kite init\n\
            \x20 kite init --src app --port 8080\n\
            \x20 kite -C ../api init --no-source-map"
    )]
    Init(InitArgs),

    /// Generate a controller.
    #[command(
        visible_aliases = ["api", "c"],
        about = "Generate a controller",
        after_help = "EXAMPLES:\n\
            \x20 kite controller greeting\n\
            \x20 kite api admin/user --dry-run"
    )]
    Controller(ModuleArgs),

    /// Generate a model.
    #[command(
        visible_alias = "m",
        about = "Generate a model",
        after_help = "EXAMPLES:\n\
            \x20 kite model user-profile\n\
            \x20 kite m order.line --grammar extended"
    )]
    Model(ModuleArgs),

    /// Generate a service.
    #[command(
        visible_alias = "s",
        about = "Generate a service",
        after_help = "EXAMPLES:\n\
            \x20 kite service mailer\n\
            \x20 kite s billing/invoice --template ./stubs/service.ts"
    )]
    Service(ModuleArgs),

    /// Inspect the project configuration.
    #[command(
        about = "Project configuration",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 kite config show\n\
            \x20 kite config path\n\
            \x20 kite config settings"
    )]
    Config(ConfigCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 kite completions bash > ~/.local/share/bash-completion/completions/kite\n\
            \x20 kite completions zsh  > ~/.zfunc/_kite\n\
            \x20 kite completions fish > ~/.config/fish/completions/kite.fish"
    )]
    Completions(CompletionsArgs),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `kite init`.
///
/// Unset flags fall back to the `[init]` table of the CLI settings.
#[derive(Debug, Default, Args)]
pub struct InitArgs {
    /// Source root, relative to the project directory.
    #[arg(long = "src", value_name = "DIR", help = "Source directory [default: src]")]
    pub src: Option<PathBuf>,

    /// Compiler output directory.
    #[arg(long = "out", value_name = "DIR", help = "Output directory [default: dist]")]
    pub out: Option<PathBuf>,

    /// Turn off `sourceMap` in `tsconfig.json`.
    #[arg(long = "no-source-map", help = "Disable source maps")]
    pub no_source_map: bool,

    #[arg(long = "host", value_name = "HOST", help = "Server hostname [default: 127.0.0.1]")]
    pub host: Option<String>,

    #[arg(long = "port", value_name = "PORT", help = "Server port [default: 4000]")]
    pub port: Option<u16>,

    /// Entry point file name inside the source directory.
    #[arg(
        long = "entry",
        value_name = "FILE",
        help = "Entry point file [default: app.server.ts]"
    )]
    pub entry: Option<String>,

    /// Error table file name inside the source directory.
    #[arg(
        long = "errors",
        value_name = "FILE",
        help = "Error table file [default: errors.ts]"
    )]
    pub errors: Option<String>,

    /// Grammar recorded in `kite-cli.json`.
    #[arg(long = "grammar", value_enum, help = "Module name grammar")]
    pub grammar: Option<GrammarArg>,
}

// ── controller / model / service ──────────────────────────────────────────────

/// Arguments shared by the module generators.
#[derive(Debug, Args)]
pub struct ModuleArgs {
    /// Module name, optionally with sub-folders (`admin/user`).
    #[arg(value_name = "NAME", help = "Module name or path")]
    pub name: String,

    /// Resolve and render without writing.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    /// Override the project's name grammar for this call.
    #[arg(long = "grammar", value_enum, help = "Module name grammar")]
    pub grammar: Option<GrammarArg>,

    /// Template file used instead of the configured one.
    #[arg(long = "template", value_name = "FILE", help = "Template file to render")]
    pub template: Option<PathBuf>,
}

/// Name grammar as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GrammarArg {
    /// Plain identifiers only.
    #[value(alias = "strict")]
    Simple,
    /// Dots and hyphens allowed, folded to PascalCase.
    Extended,
}

impl From<GrammarArg> for NameGrammar {
    fn from(arg: GrammarArg) -> Self {
        match arg {
            GrammarArg::Simple => NameGrammar::Simple,
            GrammarArg::Extended => NameGrammar::Extended,
        }
    }
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `kite completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `kite config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the resolved project configuration as JSON.
    Show,
    /// Print the path of the project configuration file.
    Path {
        /// Print the CLI settings file path instead.
        #[arg(long = "settings")]
        settings: bool,
    },
    /// Print the effective CLI settings as TOML.
    Settings,
}

// ── tests ─────────────────────────────────────────────────────────────────────
