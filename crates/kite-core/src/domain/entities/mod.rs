pub mod module;
pub mod project_config;
pub mod project_file;
pub mod project_structure;
pub mod render_context;

pub use crate::domain::DomainError;
pub use module::{ModuleOutcome, ModuleRequest, ResolvedModule};
pub use project_config::{KindConfig, ProjectConfig};
pub use project_file::{
    KindEntry, PROJECT_FILE_JSON, PROJECT_FILE_TOML, ProjectFile, TSCONFIG_FILE,
};
pub use project_structure::ProjectStructure;
pub use render_context::RenderContext;
