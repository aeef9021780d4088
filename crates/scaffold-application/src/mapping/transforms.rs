//! Built-in field transforms
//!
//! Ready-made [`MappingFunction`]s for common field conversions, plus a
//! registry so schemes loaded from files can refer to functions by name.

use scaffold_core::{failure, success};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

use super::error::MappingError;
use super::scheme::{MappingFunction, MappingOutcome};

/// Apply `op` to string-like values; absent and `null` values pass through.
fn string_transform(name: &'static str, op: fn(&str) -> String) -> MappingFunction {
    MappingFunction::new(move |data| match data.value {
        None => success(None),
        Some(Value::Null) => success(Some(Value::Null)),
        Some(Value::String(s)) => success(Some(Value::String(op(s)))),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => {
            success(Some(Value::String(op(&v.to_string()))))
        }
        Some(other) => failure(MappingError::for_value(
            format!("Cannot apply {name} to a non-scalar value"),
            other.clone(),
        )),
    })
}

/// Upper-case string values
pub fn uppercase() -> MappingFunction {
    string_transform("uppercase", str::to_uppercase)
}

/// Lower-case string values
pub fn lowercase() -> MappingFunction {
    string_transform("lowercase", str::to_lowercase)
}

/// Trim surrounding whitespace
pub fn trim() -> MappingFunction {
    string_transform("trim", |s| s.trim().to_string())
}

/// Render scalars as strings and composites as JSON text
pub fn to_string() -> MappingFunction {
    MappingFunction::new(|data| match data.value {
        None => success(None),
        Some(Value::Null) => success(Some(Value::Null)),
        Some(Value::String(s)) => success(Some(Value::String(s.clone()))),
        Some(other) => success(Some(Value::String(other.to_string()))),
    })
}

/// Fail when the value is absent or `null`
pub fn required() -> MappingFunction {
    MappingFunction::new(|data| match data.value {
        None | Some(Value::Null) => failure(MappingError::for_value(
            "Value is required",
            Value::Object(data.source.clone()),
        )),
        Some(v) => success(Some(v.clone())),
    })
}

/// Substitute `fallback` for absent or `null` values
pub fn default_value(fallback: Value) -> MappingFunction {
    MappingFunction::new(move |data| match data.value {
        None | Some(Value::Null) => success(Some(fallback.clone())),
        Some(v) => success(Some(v.clone())),
    })
}

/// Always emit `value`, whatever the source holds
pub fn constant(value: Value) -> MappingFunction {
    MappingFunction::new(move |_| success(Some(value.clone())))
}

/// Emit the value of a sibling field of the source object
pub fn copy_from(field: impl Into<String>) -> MappingFunction {
    let field = field.into();
    MappingFunction::new(move |data| success(data.source.get(&field).cloned()))
}

/// Run transforms in order, each receiving the previous output.
///
/// Stops at the first failure; an absent output is handed on as absent.
pub fn chain(steps: Vec<MappingFunction>) -> MappingFunction {
    MappingFunction::new(move |data| {
        let mut current = data.value.cloned();
        for step in &steps {
            let mut next = data;
            next.value = current.as_ref();
            current = match step.call(next).into_result() {
                Ok(value) => value,
                Err(err) => return failure(err),
            };
        }
        MappingOutcome::Success(current)
    })
}

/// Named mapping functions available to scheme definitions
#[derive(Debug, Clone, Default)]
pub struct TransformRegistry {
    functions: HashMap<String, MappingFunction>,
}

impl TransformRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the parameterless built-ins
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry
            .register("uppercase", uppercase())
            .register("lowercase", lowercase())
            .register("trim", trim())
            .register("to_string", to_string())
            .register("required", required());
        registry
    }

    /// Register a function, replacing any previous one with the same name
    pub fn register(&mut self, name: impl Into<String>, func: MappingFunction) -> &mut Self {
        let name = name.into();
        debug!(transform = %name, "Registered transform");
        self.functions.insert(name, func);
        self
    }

    /// Look up a function by name
    pub fn get(&self, name: &str) -> Option<&MappingFunction> {
        self.functions.get(name)
    }

    /// Check whether a function is registered
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
