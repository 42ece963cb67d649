//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not naming or
//! layout rules. Those are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The project configuration file is absent or unreadable.
    #[error("Failed to load project configuration {path}: {reason}")]
    MissingConfiguration { path: PathBuf, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The writer found a file where the resolver saw none.
    #[error("Refusing to overwrite existing file {path}")]
    FileExists { path: PathBuf },

    /// No template text is available for a module kind.
    #[error("No template available for {kind}")]
    TemplateUnavailable { kind: String },

    /// In-memory adapter lock was poisoned.
    #[error("Filesystem adapter lock poisoned")]
    LockError,

    /// Validation failed (application-level, not domain).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingConfiguration { path, .. } => vec![
                format!("Could not read: {}", path.display()),
                "Run \"kite init\" to initialize your project first".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::FileExists { path } => vec![
                format!("{} appeared while generating", path.display()),
                "Another process may be writing to the project; re-run the command".into(),
            ],
            Self::TemplateUnavailable { kind } => vec![
                format!("Set a \"template\" for \"{kind}\" in kite-cli.json"),
                "Or pass --template <FILE>".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingConfiguration { .. } => ErrorCategory::Configuration,
            Self::FilesystemError { .. } | Self::FileExists { .. } => ErrorCategory::Io,
            Self::TemplateUnavailable { .. } => ErrorCategory::NotFound,
            Self::LockError => ErrorCategory::Internal,
            Self::ValidationFailed(_) => ErrorCategory::Validation,
        }
    }
}
