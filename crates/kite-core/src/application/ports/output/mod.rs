//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `kite-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{Boilerplate, ModuleKind};
use crate::error::KiteResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `kite_adapters::filesystem::LocalFilesystem` (production)
/// - `kite_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - The probes return `Ok(false)` for a missing path and `Err` only when the
///   path could not be inspected at all (permissions, broken mounts).
/// - `write_new` never replaces an existing file.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Whether `path` is an existing directory.
    fn dir_exists(&self, path: &Path) -> KiteResult<bool>;

    /// Whether anything exists at `path`.
    fn file_exists(&self, path: &Path) -> KiteResult<bool>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> KiteResult<()>;

    /// Create `path` with `content`; fails with `FileExists` if it is already there.
    fn write_new(&self, path: &Path, content: &str) -> KiteResult<()>;
}

/// Port for built-in template text.
///
/// Implemented by:
/// - `kite_adapters::builtin_templates::BuiltinTemplates` (embedded in the binary)
pub trait TemplateProvider: Send + Sync {
    /// Default template for a module kind, with `$NAME$` placeholders.
    fn module_template(&self, kind: ModuleKind) -> KiteResult<String>;

    /// Text of a project-level boilerplate file.
    fn boilerplate(&self, file: Boilerplate) -> KiteResult<String>;
}
