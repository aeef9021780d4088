//! Application error kinds

use scaffold_core::error::{errors_clause, wrap_clause};
use scaffold_core::{BaseError, ValidationErrors};
use serde_json::Value;
use thiserror::Error;

/// Errors raised by use cases
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApplicationError {
    #[error("Action forbidden{}", action_clause(.action))]
    ActionForbidden { action: Option<String> },

    #[error("Entity \"{entity}\" with provided data {}already exists.", wrap_clause(.data.as_ref(), "", " "))]
    EntityAlreadyExists { entity: String, data: Option<Value> },

    #[error("Entity \"{entity}\" was not found{}.", wrap_clause(.params.as_ref(), " by params ", " "))]
    EntityNotFound { entity: String, params: Option<Value> },

    #[error("Invalid input data for dto \"{dto}\".\nInput data: {data}.{}", errors_clause(.errors.as_ref()))]
    DtoValidation {
        dto: String,
        data: Value,
        errors: Option<ValidationErrors>,
    },
}

impl ApplicationError {
    /// Build a forbidden-action error, optionally naming the action
    pub fn action_forbidden(action: Option<impl Into<String>>) -> Self {
        Self::ActionForbidden {
            action: action.map(Into::into),
        }
    }

    /// Build an already-exists error
    pub fn entity_already_exists(entity: impl Into<String>, data: Option<Value>) -> Self {
        Self::EntityAlreadyExists {
            entity: entity.into(),
            data,
        }
    }

    /// Build a not-found error
    pub fn entity_not_found(entity: impl Into<String>, params: Option<Value>) -> Self {
        Self::EntityNotFound {
            entity: entity.into(),
            params,
        }
    }

    /// Build a DTO validation error
    pub fn dto_validation(
        dto: impl Into<String>,
        data: Value,
        errors: Option<ValidationErrors>,
    ) -> Self {
        Self::DtoValidation {
            dto: dto.into(),
            data,
            errors,
        }
    }
}

fn action_clause(action: &Option<String>) -> String {
    action.as_ref().map(|a| format!(" - {a}")).unwrap_or_default()
}

impl BaseError for ApplicationError {
    fn name(&self) -> &'static str {
        match self {
            Self::ActionForbidden { .. } => "ActionForbiddenApplicationError",
            Self::EntityAlreadyExists { .. } => "EntityAlreadyExistsApplicationError",
            Self::EntityNotFound { .. } => "EntityNotFoundApplicationError",
            Self::DtoValidation { .. } => "DtoValidationApplicationError",
        }
    }
}
