//! Infrastructure error kinds

use scaffold_core::BaseError;
use scaffold_core::error::wrap_clause;
use serde_json::Value;
use thiserror::Error;

/// Errors raised by gateways, repositories, and servers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InfraError {
    #[error("Data \"{data_name}\" was not found by gateway \"{gateway}\"{}.", wrap_clause(.params.as_ref(), " by params ", ""))]
    DataNotFoundGateway {
        gateway: String,
        data_name: String,
        params: Option<Value>,
    },

    #[error("Entity \"{entity}\" was not found in repository{}.", wrap_clause(.params.as_ref(), " by params ", ""))]
    EntityNotFoundRepository { entity: String, params: Option<Value> },

    #[error("Was not able to retrieve data from gateway \"{gateway}\".{}", wrap_clause(.error.as_ref(), "\n", ""))]
    GatewayNotAvailable { gateway: String, error: Option<Value> },

    #[error("Gateway \"{gateway}\" not found for ref \"{reference}\".")]
    GatewayNotFound { gateway: String, reference: String },

    #[error("Internal server error")]
    Server { stack: Option<String> },
}

impl InfraError {
    /// Gateway answered but had no matching data
    pub fn data_not_found_gateway(
        gateway: impl Into<String>,
        data_name: impl Into<String>,
        params: Option<Value>,
    ) -> Self {
        Self::DataNotFoundGateway {
            gateway: gateway.into(),
            data_name: data_name.into(),
            params,
        }
    }

    /// Repository has no matching entity
    pub fn entity_not_found_repository(entity: impl Into<String>, params: Option<Value>) -> Self {
        Self::EntityNotFoundRepository {
            entity: entity.into(),
            params,
        }
    }

    /// Gateway could not be reached
    pub fn gateway_not_available(gateway: impl Into<String>, error: Option<Value>) -> Self {
        Self::GatewayNotAvailable {
            gateway: gateway.into(),
            error,
        }
    }

    /// No gateway is registered for `reference`
    pub fn gateway_not_found(gateway: impl Into<String>, reference: impl Into<String>) -> Self {
        Self::GatewayNotFound {
            gateway: gateway.into(),
            reference: reference.into(),
        }
    }

    /// Unexpected server-side failure, optionally with its origin trace
    pub fn server(stack: Option<String>) -> Self {
        Self::Server { stack }
    }

    /// True for failures that mean the upstream could not serve the data
    pub fn is_gateway_availability_or_data(&self) -> bool {
        matches!(
            self,
            Self::GatewayNotAvailable { .. } | Self::DataNotFoundGateway { .. }
        )
    }
}

impl BaseError for InfraError {
    fn name(&self) -> &'static str {
        match self {
            Self::DataNotFoundGateway { .. } => "DataNotFoundGatewayError",
            Self::EntityNotFoundRepository { .. } => "EntityNotFoundRepositoryError",
            Self::GatewayNotAvailable { .. } => "GatewayNotAvailableError",
            Self::GatewayNotFound { .. } => "GatewayNotFoundError",
            Self::Server { .. } => "ServerError",
        }
    }

    fn stack(&self) -> Option<&str> {
        match self {
            Self::Server { stack } => stack.as_deref(),
            _ => None,
        }
    }
}
