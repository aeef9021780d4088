//! Scheme-driven mapping engine
//!
//! Maps a JSON object, or an array of objects, into a new value following a
//! [`MappingScheme`]. The first failure anywhere in the tree aborts the whole
//! call and is returned unchanged.

use scaffold_core::Either;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use tracing::debug;

use super::error::{MappingError, NO_DATA_OR_SCHEME, NOT_AN_OBJECT};
use super::scheme::{FieldMapping, MappingFunctionData, MappingScheme, SchemeEntry};

/// Declarative object mapper
pub struct Mapper;

impl Mapper {
    /// Map `data` with `scheme`.
    ///
    /// Arrays are mapped element by element into an array; any other value is
    /// mapped as a single object. `null` data or an empty scheme fail
    /// immediately. Nested and list entries whose source field is missing
    /// or `null` are left out of the output.
    pub fn map(data: &Value, scheme: &MappingScheme) -> Either<MappingError, Value> {
        debug!(fields = scheme.len(), "Mapping data");
        map_value(data, scheme).inspect_err(log_failure).into()
    }

    /// Typed form of [`map`](Self::map): serialize `data`, map it, and
    /// deserialize the result as `R`.
    pub fn map_as<R, D>(data: &D, scheme: &MappingScheme) -> Either<MappingError, R>
    where
        R: DeserializeOwned,
        D: Serialize + ?Sized,
    {
        debug!(fields = scheme.len(), "Mapping typed data");
        map_typed(data, scheme).inspect_err(log_failure).into()
    }
}

fn log_failure(err: &MappingError) {
    debug!(reason = err.reason(), "Mapping failed");
}

fn map_typed<R, D>(data: &D, scheme: &MappingScheme) -> Result<R, MappingError>
where
    R: DeserializeOwned,
    D: Serialize + ?Sized,
{
    let value = serde_json::to_value(data).map_err(|e| {
        MappingError::new(format!("Data cannot be serialized: {e}"), Value::Null, scheme)
    })?;
    let mapped = map_value(&value, scheme)?;
    serde_json::from_value(mapped.clone()).map_err(|e| {
        MappingError::new(format!("Mapped data does not fit the target type: {e}"), mapped, scheme)
    })
}

fn map_value(data: &Value, scheme: &MappingScheme) -> Result<Value, MappingError> {
    if data.is_null() || scheme.is_empty() {
        return Err(MappingError::new(NO_DATA_OR_SCHEME, data.clone(), scheme));
    }
    match data {
        Value::Array(items) => items
            .iter()
            .map(|item| map_object(item, data, scheme))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        single => map_object(single, data, scheme),
    }
}

fn map_object(item: &Value, data: &Value, scheme: &MappingScheme) -> Result<Value, MappingError> {
    let Value::Object(source) = item else {
        return Err(MappingError::new(NOT_AN_OBJECT, data.clone(), scheme));
    };

    let mut keys: Vec<&str> = source.keys().map(String::as_str).collect();
    keys.extend(scheme.keys().filter(|key| !source.contains_key(*key)));
    keys.sort_by(|a, b| locale_compare(a, b));

    let mut mapped = Map::new();
    for key in keys {
        let (target, mapping) = match scheme.get(key) {
            Some(SchemeEntry::Ignore) => continue,
            Some(SchemeEntry::Rename(params)) => (params.field_name.as_str(), params.mapping.as_ref()),
            Some(SchemeEntry::Map(mapping)) => (key, Some(mapping)),
            None => (key, None),
        };

        let value = source.get(key);
        let output = match mapping {
            None => value.cloned(),
            Some(FieldMapping::Function(func)) => func
                .call(MappingFunctionData { value, source })
                .into_result()?,
            Some(FieldMapping::Scheme(nested) | FieldMapping::List(nested)) => match value {
                None | Some(Value::Null) => None,
                Some(value) => Some(map_value(value, nested)?),
            },
        };

        match output {
            Some(value) => {
                mapped.insert(target.to_string(), value);
            }
            None => {
                mapped.remove(target);
            }
        }
    }
    Ok(Value::Object(mapped))
}

/// Dictionary-style key order: case-insensitive, lower case first on ties.
fn locale_compare(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(collation_key(b))
        .then_with(|| b.cmp(a))
}

/// Punctuation and whitespace sort before digits, digits before letters.
/// Within a class characters compare by code point.
fn collation_key(s: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    s.chars().flat_map(char::to_lowercase).map(|c| {
        let class = if c.is_numeric() {
            1
        } else if c.is_alphabetic() {
            2
        } else {
            0
        };
        (class, c)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::scheme::{MappingFunction, MappingOutcome};
    use scaffold_core::{failure, success};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_locale_compare() {
        let mut keys = vec!["b", "B", "a", "C", "A"];
        keys.sort_by(|a, b| locale_compare(a, b));
        assert_eq!(keys, vec!["a", "A", "b", "B", "C"]);
    }

    #[test]
    fn test_locale_compare_punctuation_before_digits() {
        let mut keys = vec!["ab", "a1", "a_b", "A1"];
        keys.sort_by(|a, b| locale_compare(a, b));
        assert_eq!(keys, vec!["a_b", "a1", "A1", "ab"]);
    }

    #[test]
    fn test_keys_are_processed_in_sorted_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let record = |name: &'static str| {
            let seen = Arc::clone(&seen);
            move |data: MappingFunctionData<'_>| -> MappingOutcome {
                seen.lock().unwrap().push(name);
                success(data.value.cloned())
            }
        };
        let scheme = MappingScheme::new()
            .function("zeta", record("zeta"))
            .function("Alpha", record("Alpha"))
            .function("beta", record("beta"));

        let result = Mapper::map(&json!({"zeta": 1, "beta": 2}), &scheme);
        assert!(result.is_success());
        assert_eq!(*seen.lock().unwrap(), vec!["Alpha", "beta", "zeta"]);
    }

    #[test]
    fn test_first_failure_in_key_order_wins() {
        let scheme = MappingScheme::new()
            .function("b", |_| failure(MappingError::for_value("b failed", json!(null))))
            .function("a", |_| failure(MappingError::for_value("a failed", json!(null))));

        let result = Mapper::map(&json!({"a": 1, "b": 2}), &scheme);
        assert_eq!(result.failure_value().unwrap().reason(), "a failed");
    }

    #[test]
    fn test_function_sees_whole_source() {
        let scheme = MappingScheme::new().function("full", |data| {
            let first = data.source.get("first").and_then(Value::as_str).unwrap_or_default();
            let last = data.source.get("last").and_then(Value::as_str).unwrap_or_default();
            success(Some(json!(format!("{first} {last}"))))
        });

        let result = Mapper::map(&json!({"first": "Ada", "last": "Lovelace"}), &scheme);
        assert_eq!(
            result.success_value(),
            Some(&json!({"first": "Ada", "last": "Lovelace", "full": "Ada Lovelace"}))
        );
    }

    #[test]
    fn test_undefined_rename_removes_earlier_value() {
        let scheme = MappingScheme::new()
            .rename("a", "out")
            .rename_with(
                "b",
                "out",
                FieldMapping::Function(MappingFunction::new(|_| success(None))),
            );

        let result = Mapper::map(&json!({"a": 1, "b": 2}), &scheme);
        assert_eq!(result.success_value(), Some(&json!({})));
    }

    #[test]
    fn test_map_as_reports_shape_mismatch() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Target {
            id: u32,
        }

        let scheme = MappingScheme::new().ignore("id");
        let result: Either<MappingError, Target> = Mapper::map_as(&json!({"id": 1}), &scheme);
        let err = result.failure_value().unwrap();
        assert!(err.reason().starts_with("Mapped data does not fit the target type"));
        assert_eq!(err.data(), &json!({}));
    }
}
