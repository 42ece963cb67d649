use thiserror::Error;

/// Root domain error type.
///
/// Domain errors describe invariants of the project layout and of module
/// names. They never carry I/O details; those belong to the application layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("invalid {kind} name '{name}': {reason}")]
    InvalidName {
        kind: String,
        name: String,
        reason: String,
    },

    #[error("unknown module kind: {0}")]
    UnknownKind(String),

    #[error("unknown name grammar: {0}")]
    UnknownGrammar(String),

    #[error("Duplicate path in project structure: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Project structure is empty")]
    EmptyStructure,

    // ========================================================================
    // Layout Errors
    // ========================================================================
    #[error("no configuration for module kind '{kind}'")]
    MissingKind { kind: String },

    #[error("invalid project configuration: {0}")]
    InvalidConfig(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidName { kind, .. } => vec![
                format!("A {kind} name must start with a letter"),
                "Use letters, digits, '-', '_' and '.' (e.g. user-profile, admin.user)".into(),
            ],
            Self::UnknownKind(kind) => vec![
                format!("'{kind}' is not a module kind"),
                "Supported kinds: controller (api), model, service".into(),
            ],
            Self::UnknownGrammar(_) => vec!["Supported grammars: simple, extended".into()],
            Self::MissingKind { kind } => vec![
                format!("Add a \"{kind}\" section to kite-cli.json"),
                "Or re-run: kite init".into(),
            ],
            Self::InvalidConfig(msg) => vec![
                "Check kite-cli.json in the project directory".into(),
                format!("Details: {msg}"),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidName { .. } | Self::UnknownKind(_) | Self::UnknownGrammar(_) => {
                ErrorCategory::Validation
            }
            Self::MissingKind { .. } | Self::InvalidConfig(_) => ErrorCategory::Configuration,
            _ => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_name_is_validation() {
        let err = DomainError::InvalidName {
            kind: "model".into(),
            name: "9lives".into(),
            reason: "must start with a letter".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.to_string().contains("9lives"));
    }

    #[test]
    fn missing_kind_suggests_init() {
        let err = DomainError::MissingKind {
            kind: "service".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.suggestions().iter().any(|s| s.contains("kite init")));
    }
}
