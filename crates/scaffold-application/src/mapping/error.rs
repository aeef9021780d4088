//! Mapping failure

use scaffold_core::BaseError;
use serde_json::Value;
use thiserror::Error;

use super::scheme::MappingScheme;

/// Reason reported when data or scheme is missing
pub const NO_DATA_OR_SCHEME: &str = "No data or scheme is provided.";

/// Reason reported when an element is not a JSON object
pub const NOT_AN_OBJECT: &str = "Data is not an object or array of objects and cannot be mapped.";

/// Why a mapping failed, with the offending data and the scheme in play
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Failed to map data. Reason: '{reason}'\nData: {data}\nScheme: {}", .scheme.as_deref().unwrap_or("-"))]
pub struct MappingError {
    reason: String,
    data: Value,
    scheme: Option<String>,
}

impl MappingError {
    /// Failure raised while applying `scheme` to `data`
    pub fn new(reason: impl Into<String>, data: Value, scheme: &MappingScheme) -> Self {
        Self {
            reason: reason.into(),
            data,
            scheme: Some(scheme.to_string()),
        }
    }

    /// Failure raised by a field transform, where no scheme is at hand
    pub fn for_value(reason: impl Into<String>, data: Value) -> Self {
        Self {
            reason: reason.into(),
            data,
            scheme: None,
        }
    }

    /// Human-readable reason
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Raw data that could not be mapped
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Summary of the scheme in play, if any
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }
}

impl BaseError for MappingError {
    fn name(&self) -> &'static str {
        "MappingError"
    }
}
