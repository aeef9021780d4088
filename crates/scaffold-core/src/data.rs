//! JSON data helpers

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::date_time::parse_object_dates;

/// Deep-copy a value through its JSON form, normalizing date strings on the way.
///
/// # Errors
///
/// Returns an error if the value cannot round-trip through JSON.
pub fn clone_json<T>(data: &T) -> crate::Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let mut value = serde_json::to_value(data)?;
    parse_object_dates(&mut value);
    Ok(serde_json::from_value(value)?)
}

/// List the named fields that hold equal values in both objects.
///
/// Non-object inputs or an empty field list yield an empty list.
pub fn equal_fields(first: &Value, second: &Value, fields: &[&str]) -> Vec<String> {
    let (Some(first), Some(second)) = (first.as_object(), second.as_object()) else {
        return Vec::new();
    };
    fields
        .iter()
        .filter(|field| first.get(**field) == second.get(**field))
        .map(|field| (*field).to_string())
        .collect()
}
