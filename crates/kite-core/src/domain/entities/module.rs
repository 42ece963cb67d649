use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::value_objects::ModuleKind;

/// A request to scaffold one module, built fresh from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRequest {
    raw_name: String,
    kind: ModuleKind,
}

impl ModuleRequest {
    pub fn new(raw_name: impl Into<String>, kind: ModuleKind) -> Self {
        Self {
            raw_name: raw_name.into(),
            kind,
        }
    }

    /// The name as typed; may be a path fragment like `admin/user`.
    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    pub fn kind(&self) -> ModuleKind {
        self.kind
    }
}

/// What the resolver decided for a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ModuleOutcome {
    /// The file does not exist yet and may be written.
    WouldCreate,
    /// The file exists; nothing will be written.
    AlreadyExists,
    /// The derived name failed the identifier grammar.
    InvalidName { reason: String },
}

impl fmt::Display for ModuleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WouldCreate => f.write_str("would-create"),
            Self::AlreadyExists => f.write_str("already-exists"),
            Self::InvalidName { reason } => write!(f, "invalid-name ({reason})"),
        }
    }
}

/// Resolver output, consumed by the module writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedModule {
    pub kind: ModuleKind,
    /// Absolute destination file.
    pub path: PathBuf,
    /// PascalCase identifier substituted for `$NAME$`. Empty for invalid names.
    pub identifier: String,
    pub outcome: ModuleOutcome,
}

impl ResolvedModule {
    pub fn is_creatable(&self) -> bool {
        self.outcome == ModuleOutcome::WouldCreate
    }

    /// Destination shown relative to `base` when possible.
    pub fn display_path(&self, base: &Path) -> String {
        self.path
            .strip_prefix(base)
            .unwrap_or(&self.path)
            .display()
            .to_string()
    }
}
