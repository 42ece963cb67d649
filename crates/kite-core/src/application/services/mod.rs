//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate a controller" or "initialize a project".

pub mod module_service;
pub mod project_service;

pub use module_service::{GenerateOptions, GeneratedModule, ModuleService};
pub use project_service::{InitOptions, InitReport, ProjectService};
