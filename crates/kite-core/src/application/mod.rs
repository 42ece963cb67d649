//! Application layer for Kite.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ModuleService, ProjectService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer. Naming and layout
//! rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    GenerateOptions, GeneratedModule, InitOptions, InitReport, ModuleService, ProjectService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, TemplateProvider};

pub use error::ApplicationError;
