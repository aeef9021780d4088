//! Scheme definitions
//!
//! Serializable description of a [`MappingScheme`], so schemes can live in
//! YAML or JSON files. Every entry names its kind with a `type` tag and
//! transforms name their operation with an `op` tag.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use super::scheme::{FieldMapping, MappingFunction, MappingParams, MappingScheme, SchemeEntry};
use super::transforms::{self, TransformRegistry};

/// Errors raised while loading or compiling a scheme definition
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DefinitionError {
    #[error("Failed to parse scheme definition: {message}{}", location(.line, .column))]
    Parse {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },

    #[error("Failed to read scheme definition: {0}")]
    Io(String),

    #[error("Failed to serialize scheme definition: {0}")]
    Serialize(String),

    #[error("Unknown transform '{name}' for field '{field}'")]
    UnknownTransform { field: String, name: String },
}

fn location(line: &Option<usize>, column: &Option<usize>) -> String {
    match (line, column) {
        (Some(line), Some(column)) => format!(" at line {line}, column {column}"),
        _ => String::new(),
    }
}

/// Declarative form of a whole scheme: field name -> entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemeDefinition {
    pub fields: BTreeMap<String, EntryDefinition>,
}

/// Declarative form of one scheme entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryDefinition {
    /// Drop the field
    Ignore,

    /// Map the field's object with a nested scheme
    Nested { scheme: SchemeDefinition },

    /// Map every element of the field's array with a nested scheme
    List { scheme: SchemeDefinition },

    /// Apply a transform to the field
    Transform { transform: TransformDefinition },

    /// Emit under another name
    Rename {
        field_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mapping: Option<MappingDefinition>,
    },
}

/// Value mapping used by a rename entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MappingDefinition {
    Nested { scheme: SchemeDefinition },
    List { scheme: SchemeDefinition },
    Transform { transform: TransformDefinition },
}

/// Transform operation applied to a field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TransformDefinition {
    Uppercase,
    Lowercase,
    Trim,
    ToString,
    Required,

    /// Substitute a value when the field is absent or null
    Default { value: Value },

    /// Always emit a fixed value
    Constant { value: Value },

    /// Emit a sibling field's value
    CopyFrom { field: String },

    /// Function looked up in a [`TransformRegistry`]
    Named { name: String },

    /// Run transforms in sequence
    Chain { transforms: Vec<TransformDefinition> },
}

impl SchemeDefinition {
    /// Parse a definition from YAML (JSON is accepted as well)
    ///
    /// # Errors
    ///
    /// Returns an error when the document is not a valid definition.
    pub fn parse(yaml: &str) -> Result<Self, DefinitionError> {
        serde_yaml::from_str(yaml).map_err(|e| DefinitionError::Parse {
            message: e.to_string(),
            line: e.location().map(|l| l.line()),
            column: e.location().map(|l| l.column()),
        })
    }

    /// Parse a definition from a file
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn parse_file(path: &Path) -> Result<Self, DefinitionError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DefinitionError::Io(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), "Loaded scheme definition");
        Self::parse(&content)
    }

    /// Serialize the definition to YAML
    ///
    /// # Errors
    ///
    /// Returns an error when serialization fails.
    pub fn to_yaml(&self) -> Result<String, DefinitionError> {
        serde_yaml::to_string(self).map_err(|e| DefinitionError::Serialize(e.to_string()))
    }

    /// Build the runtime scheme, resolving named transforms in `registry`
    ///
    /// # Errors
    ///
    /// Returns an error when a named transform is not registered.
    pub fn compile(&self, registry: &TransformRegistry) -> Result<MappingScheme, DefinitionError> {
        let mut scheme = MappingScheme::new();
        for (field, entry) in &self.fields {
            scheme.insert(field.clone(), entry.compile(field, registry)?);
        }
        Ok(scheme)
    }
}

impl EntryDefinition {
    fn compile(&self, field: &str, registry: &TransformRegistry) -> Result<SchemeEntry, DefinitionError> {
        Ok(match self {
            EntryDefinition::Ignore => SchemeEntry::Ignore,
            EntryDefinition::Nested { scheme } => {
                SchemeEntry::Map(FieldMapping::Scheme(scheme.compile(registry)?))
            }
            EntryDefinition::List { scheme } => {
                SchemeEntry::Map(FieldMapping::List(scheme.compile(registry)?))
            }
            EntryDefinition::Transform { transform } => {
                SchemeEntry::Map(FieldMapping::Function(transform.compile(field, registry)?))
            }
            EntryDefinition::Rename {
                field_name,
                mapping,
            } => SchemeEntry::Rename(MappingParams {
                field_name: field_name.clone(),
                mapping: mapping
                    .as_ref()
                    .map(|m| m.compile(field, registry))
                    .transpose()?,
            }),
        })
    }
}

impl MappingDefinition {
    fn compile(&self, field: &str, registry: &TransformRegistry) -> Result<FieldMapping, DefinitionError> {
        Ok(match self {
            MappingDefinition::Nested { scheme } => FieldMapping::Scheme(scheme.compile(registry)?),
            MappingDefinition::List { scheme } => FieldMapping::List(scheme.compile(registry)?),
            MappingDefinition::Transform { transform } => {
                FieldMapping::Function(transform.compile(field, registry)?)
            }
        })
    }
}

impl TransformDefinition {
    fn compile(
        &self,
        field: &str,
        registry: &TransformRegistry,
    ) -> Result<MappingFunction, DefinitionError> {
        Ok(match self {
            TransformDefinition::Uppercase => transforms::uppercase(),
            TransformDefinition::Lowercase => transforms::lowercase(),
            TransformDefinition::Trim => transforms::trim(),
            TransformDefinition::ToString => transforms::to_string(),
            TransformDefinition::Required => transforms::required(),
            TransformDefinition::Default { value } => transforms::default_value(value.clone()),
            TransformDefinition::Constant { value } => transforms::constant(value.clone()),
            TransformDefinition::CopyFrom { field } => transforms::copy_from(field.clone()),
            TransformDefinition::Named { name } => {
                registry
                    .get(name)
                    .cloned()
                    .ok_or_else(|| DefinitionError::UnknownTransform {
                        field: field.to_string(),
                        name: name.clone(),
                    })?
            }
            TransformDefinition::Chain { transforms: steps } => transforms::chain(
                steps
                    .iter()
                    .map(|step| step.compile(field, registry))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        })
    }
}
