//! Core domain layer for Kite.
//!
//! This module contains pure logic: module kinds, the project layout value,
//! name grammar and casing, placeholder rendering and lexical path handling.
//! All I/O is handled via ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable entities**: All domain objects are Clone + PartialEq

// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod naming;
pub mod paths;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    module::{ModuleOutcome, ModuleRequest, ResolvedModule},
    project_config::{DEFAULT_EXTENSION, KindConfig, ProjectConfig},
    project_file::{KindEntry, PROJECT_FILE_JSON, PROJECT_FILE_TOML, ProjectFile, TSCONFIG_FILE},
    project_structure::{DirectoryToCreate, FileToWrite, FsEntry, ProjectStructure},
    render_context::{NAME_KEY, ROOT_MARKER, RenderContext, render, rewrite_root_imports},
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{Boilerplate, ModuleKind, NameGrammar};

pub use validation::DomainValidator;
