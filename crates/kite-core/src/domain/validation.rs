use crate::domain::{
    entities::{ProjectConfig, ProjectStructure},
    error::DomainError,
    naming,
    value_objects::NameGrammar,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_project_config(config: &ProjectConfig) -> Result<(), DomainError> {
        config.validate()
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }

    pub fn validate_module_name(name: &str, grammar: NameGrammar) -> Result<(), String> {
        naming::validate_name(name, grammar)
    }
}
