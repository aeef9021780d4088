//! Domain error kinds

use scaffold_core::error::{errors_clause, wrap_clause};
use scaffold_core::{BaseError, ValidationErrors};
use serde_json::Value;
use thiserror::Error;

/// Errors raised by domain entities
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Entity \"{entity}\" with provided data {}already exists.", wrap_clause(.data.as_ref(), "", " "))]
    EntityAlreadyExists { entity: String, data: Option<Value> },

    #[error("Entity \"{entity}\" was not found{}.", wrap_clause(.params.as_ref(), " by params ", " "))]
    EntityNotFound { entity: String, params: Option<Value> },

    #[error("Invalid input data for entity \"{entity}\".\nInput data: {data}.{}", errors_clause(.errors.as_ref()))]
    EntityValidation {
        entity: String,
        data: Value,
        errors: Option<ValidationErrors>,
    },
}

impl DomainError {
    /// Build an already-exists error, optionally naming the clashing data
    pub fn entity_already_exists(entity: impl Into<String>, data: Option<Value>) -> Self {
        Self::EntityAlreadyExists {
            entity: entity.into(),
            data,
        }
    }

    /// Build a not-found error, optionally naming the lookup params
    pub fn entity_not_found(entity: impl Into<String>, params: Option<Value>) -> Self {
        Self::EntityNotFound {
            entity: entity.into(),
            params,
        }
    }

    /// Build a validation error for rejected input
    pub fn entity_validation(
        entity: impl Into<String>,
        data: Value,
        errors: Option<ValidationErrors>,
    ) -> Self {
        Self::EntityValidation {
            entity: entity.into(),
            data,
            errors,
        }
    }

    /// Per-field validation messages, for validation errors
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::EntityValidation { errors, .. } => errors.as_ref(),
            _ => None,
        }
    }
}

impl BaseError for DomainError {
    fn name(&self) -> &'static str {
        match self {
            Self::EntityAlreadyExists { .. } => "EntityAlreadyExistsDomainError",
            Self::EntityNotFound { .. } => "EntityNotFoundDomainError",
            Self::EntityValidation { .. } => "EntityValidationDomainError",
        }
    }
}
