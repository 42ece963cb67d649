//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppSettings;

/// Manages CLI output based on flags and settings.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded settings.
    ///
    /// An explicit `--output-format` wins over `output.format` in the
    /// settings; `auto` resolves to Human on a TTY and Plain otherwise.
    pub fn new(args: &GlobalArgs, settings: &AppSettings) -> Self {
        let requested = if args.output_format == OutputFormat::Auto {
            settings.output.format
        } else {
            args.output_format
        };
        let resolved_format = resolve_format(requested, io::stdout().is_terminal());

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || settings.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Pretty JSON document on stdout. Written even in quiet mode, since a
    /// script asked for it.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    /// Raw text, e.g. a rendered template or a file path, unaffected by quiet.
    pub fn raw(&self, text: &str) -> io::Result<()> {
        self.term.write_line(text.trim_end_matches('\n'))
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn is_colored(&self) -> bool {
        !self.no_color
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }
}

fn resolve_format(requested: OutputFormat, stdout_is_tty: bool) -> OutputFormat {
    match requested {
        OutputFormat::Auto if stdout_is_tty => OutputFormat::Human,
        OutputFormat::Auto => OutputFormat::Plain,
        other => other,
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager(quiet: bool, no_color: bool, format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            project_dir: None,
            config: None,
            project_config: None,
            output_format: format,
        };
        OutputManager::new(&args, &AppSettings::default())
    }

    #[test]
    fn auto_resolves_by_terminal() {
        assert_eq!(resolve_format(OutputFormat::Auto, true), OutputFormat::Human);
        assert_eq!(resolve_format(OutputFormat::Auto, false), OutputFormat::Plain);
        assert_eq!(resolve_format(OutputFormat::Json, true), OutputFormat::Json);
    }

    #[test]
    fn quiet_print_is_ok() {
        let out = make_manager(true, true, OutputFormat::Plain);
        assert!(out.print("hello").is_ok());
    }

    #[test]
    fn color_only_for_human_format() {
        assert!(make_manager(false, false, OutputFormat::Human).is_colored());
        assert!(!make_manager(false, true, OutputFormat::Human).is_colored());
        assert!(!make_manager(false, false, OutputFormat::Plain).is_colored());
        assert!(!make_manager(false, false, OutputFormat::Json).is_colored());
    }

    #[test]
    fn settings_format_applies_when_flag_is_auto() {
        let mut settings = AppSettings::default();
        settings.output.format = OutputFormat::Json;
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            project_dir: None,
            config: None,
            project_config: None,
            output_format: OutputFormat::Auto,
        };
        assert!(OutputManager::new(&args, &settings).is_json());
    }

    #[test]
    fn explicit_flag_beats_settings() {
        let mut settings = AppSettings::default();
        settings.output.format = OutputFormat::Json;
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            project_dir: None,
            config: None,
            project_config: None,
            output_format: OutputFormat::Plain,
        };
        assert_eq!(OutputManager::new(&args, &settings).format(), OutputFormat::Plain);
    }
}
