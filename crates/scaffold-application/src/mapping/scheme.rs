//! Mapping scheme model
//!
//! A scheme maps output field names to rules describing how each field is
//! derived. Every rule carries an explicit variant, so a nested scheme can
//! never be mistaken for rename parameters.

use scaffold_core::Either;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::error::MappingError;

/// Input handed to a [`MappingFunction`]
#[derive(Debug, Clone, Copy)]
pub struct MappingFunctionData<'a> {
    /// Source field value, `None` when the field is missing
    pub value: Option<&'a Value>,

    /// The whole source object the field belongs to
    pub source: &'a Map<String, Value>,
}

/// Outcome of a mapping function; `Success(None)` omits the output field
pub type MappingOutcome = Either<MappingError, Option<Value>>;

type MappingFn = dyn Fn(MappingFunctionData<'_>) -> MappingOutcome + Send + Sync;

/// Caller-supplied field transform
#[derive(Clone)]
pub struct MappingFunction(Arc<MappingFn>);

impl MappingFunction {
    /// Wrap a closure as a mapping function
    pub fn new(func: impl Fn(MappingFunctionData<'_>) -> MappingOutcome + Send + Sync + 'static) -> Self {
        Self(Arc::new(func))
    }

    /// Invoke the transform
    pub fn call(&self, data: MappingFunctionData<'_>) -> MappingOutcome {
        (self.0)(data)
    }
}

impl fmt::Debug for MappingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<function>")
    }
}

/// How a field value is transformed
#[derive(Debug, Clone)]
pub enum FieldMapping {
    /// Apply a function to the field value
    Function(MappingFunction),

    /// Map the field value (an object) with a nested scheme
    Scheme(MappingScheme),

    /// Map every element of the field value (an array) with a nested scheme
    List(MappingScheme),
}

/// Rename the output field, optionally transforming its value
#[derive(Debug, Clone)]
pub struct MappingParams {
    /// Output field name
    pub field_name: String,

    /// Transform applied to the value; `None` copies it unchanged
    pub mapping: Option<FieldMapping>,
}

/// Rule attached to one scheme key
#[derive(Debug, Clone)]
pub enum SchemeEntry {
    /// Drop the field from the output
    Ignore,

    /// Keep the field name and transform its value
    Map(FieldMapping),

    /// Emit under another field name
    Rename(MappingParams),
}

/// Output field name -> rule.
///
/// Keys without an entry are copied verbatim by the mapper.
#[derive(Debug, Clone, Default)]
pub struct MappingScheme {
    entries: BTreeMap<String, SchemeEntry>,
}

impl MappingScheme {
    /// Create an empty scheme
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the rule for `key`
    pub fn insert(&mut self, key: impl Into<String>, entry: SchemeEntry) -> &mut Self {
        self.entries.insert(key.into(), entry);
        self
    }

    /// Builder form of [`insert`](Self::insert)
    #[must_use]
    pub fn entry(mut self, key: impl Into<String>, entry: SchemeEntry) -> Self {
        self.insert(key, entry);
        self
    }

    /// Drop `key` from the output
    #[must_use]
    pub fn ignore(self, key: impl Into<String>) -> Self {
        self.entry(key, SchemeEntry::Ignore)
    }

    /// Transform `key` with a function
    #[must_use]
    pub fn function(
        self,
        key: impl Into<String>,
        func: impl Fn(MappingFunctionData<'_>) -> MappingOutcome + Send + Sync + 'static,
    ) -> Self {
        self.entry(key, SchemeEntry::Map(FieldMapping::Function(MappingFunction::new(func))))
    }

    /// Map the object under `key` with `scheme`
    #[must_use]
    pub fn nested(self, key: impl Into<String>, scheme: MappingScheme) -> Self {
        self.entry(key, SchemeEntry::Map(FieldMapping::Scheme(scheme)))
    }

    /// Map every element of the array under `key` with `scheme`
    #[must_use]
    pub fn list(self, key: impl Into<String>, scheme: MappingScheme) -> Self {
        self.entry(key, SchemeEntry::Map(FieldMapping::List(scheme)))
    }

    /// Emit `key` unchanged under `field_name`
    #[must_use]
    pub fn rename(self, key: impl Into<String>, field_name: impl Into<String>) -> Self {
        self.entry(
            key,
            SchemeEntry::Rename(MappingParams {
                field_name: field_name.into(),
                mapping: None,
            }),
        )
    }

    /// Emit `key` under `field_name` after applying `mapping`
    #[must_use]
    pub fn rename_with(
        self,
        key: impl Into<String>,
        field_name: impl Into<String>,
        mapping: FieldMapping,
    ) -> Self {
        self.entry(
            key,
            SchemeEntry::Rename(MappingParams {
                field_name: field_name.into(),
                mapping: Some(mapping),
            }),
        )
    }

    /// Rule for `key`, if declared
    pub fn get(&self, key: &str) -> Option<&SchemeEntry> {
        self.entries.get(key)
    }

    /// Declared keys
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Declared keys with their rules
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemeEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of declared keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no keys are declared
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, SchemeEntry)> for MappingScheme {
    fn from_iter<I: IntoIterator<Item = (String, SchemeEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for FieldMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldMapping::Function(_) => f.write_str("<function>"),
            FieldMapping::Scheme(scheme) => write!(f, "{scheme}"),
            FieldMapping::List(scheme) => write!(f, "[{scheme}]"),
        }
    }
}

impl fmt::Display for SchemeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemeEntry::Ignore => f.write_str("ignore"),
            SchemeEntry::Map(mapping) => write!(f, "{mapping}"),
            SchemeEntry::Rename(params) => {
                write!(f, "{{fieldName: {:?}", params.field_name)?;
                if let Some(mapping) = &params.mapping {
                    write!(f, ", mapping: {mapping}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Compact textual summary used in error messages
impl fmt::Display for MappingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, entry)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key:?}: {entry}")?;
        }
        f.write_str("}")
    }
}
