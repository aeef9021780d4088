//! Base error contract shared by every layer

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field name -> list of validation messages for that field
pub type ValidationErrors = BTreeMap<String, Vec<String>>;

/// Common shape of every scaffold error: a stable name plus a message.
pub trait BaseError: std::error::Error {
    /// Stable error name, e.g. `EntityNotFoundDomainError`
    fn name(&self) -> &'static str;

    /// Human-readable message
    fn message(&self) -> String {
        self.to_string()
    }

    /// Captured stack or origin trace, when one was recorded
    fn stack(&self) -> Option<&str> {
        None
    }

    /// Serializable snapshot of this error
    fn info(&self) -> ErrorInfo {
        ErrorInfo {
            name: self.name().to_string(),
            message: self.message(),
            stack: self.stack().map(str::to_string),
        }
    }
}

/// Plain data view of a [`BaseError`], suitable for response bodies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl std::fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

/// Render an optional JSON payload the way error messages embed it.
///
/// Absent values render as `None` so callers can skip the clause.
pub fn json_clause(value: Option<&serde_json::Value>) -> Option<String> {
    match value {
        None | Some(serde_json::Value::Null) => None,
        Some(v) => Some(v.to_string()),
    }
}

/// Wrap an optional JSON payload in `prefix`/`suffix`, or render nothing when absent
pub fn wrap_clause(value: Option<&serde_json::Value>, prefix: &str, suffix: &str) -> String {
    json_clause(value)
        .map(|json| format!("{prefix}{json}{suffix}"))
        .unwrap_or_default()
}

/// Render validation errors as an `\nErrors: {...}` clause, or nothing when absent
pub fn errors_clause(errors: Option<&ValidationErrors>) -> String {
    errors
        .and_then(|e| serde_json::to_string(e).ok())
        .map(|e| format!("\nErrors: {e}"))
        .unwrap_or_default()
}
