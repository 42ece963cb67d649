//! Domain value objects: ModuleKind, NameGrammar, Boilerplate.
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! This file defines the types, their string representations, their
//! built-in defaults and their `FromStr` parsers.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ModuleKind ───────────────────────────────────────────────────────────────

/// The kind of module to scaffold. Determines target folder and template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    Controller,
    Model,
    Service,
}

impl ModuleKind {
    /// All built-in kinds, in the order they appear in `kite-cli.json`.
    pub const ALL: [ModuleKind; 3] = [Self::Controller, Self::Model, Self::Service];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Controller => "controller",
            Self::Model => "model",
            Self::Service => "service",
        }
    }

    /// Folder name under the source root, e.g. `controllers`.
    pub const fn default_folder(&self) -> &'static str {
        match self {
            Self::Controller => "controllers",
            Self::Model => "models",
            Self::Service => "services",
        }
    }

    /// Suffix inserted before the extension, e.g. `greeting.controller.ts`.
    pub const fn default_suffix(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "controller" | "api" | "ctrl" => Ok(Self::Controller),
            "model" => Ok(Self::Model),
            "service" => Ok(Self::Service),
            other => Err(DomainError::UnknownKind(other.to_string())),
        }
    }
}

// ── NameGrammar ──────────────────────────────────────────────────────────────

/// Which identifier grammar a module name must satisfy.
///
/// `Simple` accepts plain identifiers (`[A-Za-z_][A-Za-z_$0-9]*`).
/// `Extended` accepts dotted and hyphenated names such as `user-profile.extra`,
/// which are folded into PascalCase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameGrammar {
    #[serde(alias = "strict")]
    Simple,
    #[default]
    Extended,
}

impl NameGrammar {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Extended => "extended",
        }
    }
}

impl fmt::Display for NameGrammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NameGrammar {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simple" | "strict" => Ok(Self::Simple),
            "extended" => Ok(Self::Extended),
            other => Err(DomainError::UnknownGrammar(other.to_string())),
        }
    }
}

// ── Boilerplate ──────────────────────────────────────────────────────────────

/// Project-level files written once by `init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Boilerplate {
    /// Custom error table (`errors.ts`).
    Errors,
    /// `kite.config.ts` with `$errors$`, `$hostname$`, `$port$` placeholders.
    KiteConfig,
    /// Application entry point.
    App,
}

impl Boilerplate {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Errors => "errors",
            Self::KiteConfig => "kite-config",
            Self::App => "app",
        }
    }
}

impl fmt::Display for Boilerplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
