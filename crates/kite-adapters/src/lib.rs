//! Infrastructure adapters for Kite.
//!
//! This crate implements the ports defined in `kite-core::application::ports`
//! and owns every read of the project directory: the `kite-cli.json` loader
//! and the `package.json` probe used by `init`.

pub mod builtin_templates;
pub mod config_loader;
pub mod filesystem;
pub mod package_manifest;

// Re-export commonly used adapters
pub use builtin_templates::BuiltinTemplates;
pub use config_loader::ProjectConfigLoader;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use package_manifest::{FRAMEWORK_PACKAGE, PACKAGE_JSON, PackageManifest};
