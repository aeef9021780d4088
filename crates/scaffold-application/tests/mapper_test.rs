//! Integration tests for the declarative mapper.

use scaffold_application::mapping::error::{NO_DATA_OR_SCHEME, NOT_AN_OBJECT};
use scaffold_application::mapping::transforms;
use scaffold_application::{FieldMapping, Mapper, MappingError, MappingScheme};
use scaffold_core::{BaseError, Either, failure, success};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

fn mapped(result: Either<MappingError, Value>) -> Value {
    match result {
        Either::Success(value) => value,
        Either::Failure(err) => panic!("expected success, got: {err}"),
    }
}

fn failed(result: Either<MappingError, Value>) -> MappingError {
    match result {
        Either::Failure(err) => err,
        Either::Success(value) => panic!("expected failure, got: {value}"),
    }
}

fn identity_scheme(value: &Value) -> MappingScheme {
    value
        .as_object()
        .expect("object")
        .keys()
        .fold(MappingScheme::new(), |scheme, key| scheme.rename(key.clone(), key.clone()))
}

#[test]
fn passes_through_unlisted_and_renamed_fields() {
    let data = json!({"id": "usr_1", "name": "Ada", "age": 36});
    let scheme = MappingScheme::new().rename("id", "userId");

    let output = mapped(Mapper::map(&data, &scheme));

    assert_eq!(output, json!({"userId": "usr_1", "name": "Ada", "age": 36}));
}

#[test]
fn missing_data_fails() {
    let scheme = MappingScheme::new().ignore("a");
    let err = failed(Mapper::map(&Value::Null, &scheme));

    assert_eq!(err.reason(), NO_DATA_OR_SCHEME);
    assert_eq!(err.name(), "MappingError");
}

#[test]
fn empty_scheme_fails() {
    let err = failed(Mapper::map(&json!({"a": 1}), &MappingScheme::new()));

    assert_eq!(err.reason(), NO_DATA_OR_SCHEME);
    assert_eq!(err.data(), &json!({"a": 1}));
}

#[test]
fn maps_arrays_in_order() {
    let data = json!([{"id": 1, "secret": "x"}, {"id": 2, "secret": "y"}]);
    let scheme = MappingScheme::new().ignore("secret");

    let output = mapped(Mapper::map(&data, &scheme));

    assert_eq!(output, json!([{"id": 1}, {"id": 2}]));
}

#[test]
fn failing_element_fails_whole_array() {
    let data = json!([{"id": 1}, {"id": -2}, {"id": 3}]);
    let scheme = MappingScheme::new().function("id", |data| match data.value.and_then(Value::as_i64) {
        Some(id) if id < 0 => failure(MappingError::for_value("negative id", json!(id))),
        _ => success(data.value.cloned()),
    });

    let err = failed(Mapper::map(&data, &scheme));

    assert_eq!(err.reason(), "negative id");
    assert_eq!(err.data(), &json!(-2));
}

#[test]
fn non_object_elements_fail() {
    let scheme = MappingScheme::new().ignore("a");

    let scalar = failed(Mapper::map(&json!(42), &scheme));
    assert_eq!(scalar.reason(), NOT_AN_OBJECT);

    let nested_array = failed(Mapper::map(&json!([{"a": 1}, [1, 2]]), &scheme));
    assert_eq!(nested_array.reason(), NOT_AN_OBJECT);
    assert_eq!(nested_array.data(), &json!([{"a": 1}, [1, 2]]));
}

#[test]
fn ignored_fields_are_dropped() {
    let data = json!({"login": "ada", "password": "hunter2"});
    let scheme = MappingScheme::new().ignore("password");

    assert_eq!(mapped(Mapper::map(&data, &scheme)), json!({"login": "ada"}));
}

#[test]
fn ignoring_an_absent_field_is_harmless() {
    let data = json!({"login": "ada"});
    let scheme = MappingScheme::new().ignore("password");

    assert_eq!(mapped(Mapper::map(&data, &scheme)), json!({"login": "ada"}));
}

#[test]
fn nested_scheme_maps_sub_object() {
    let data = json!({"a": {"b": 1}});
    let scheme = MappingScheme::new().nested("a", MappingScheme::new().ignore("b"));

    assert_eq!(mapped(Mapper::map(&data, &scheme)), json!({"a": {}}));
}

#[test]
fn list_scheme_maps_each_element() {
    let data = json!({"sessions": [{"id": "uss_1", "token": "t1"}, {"id": "uss_2", "token": "t2"}]});
    let scheme = MappingScheme::new().list("sessions", MappingScheme::new().ignore("token"));

    assert_eq!(
        mapped(Mapper::map(&data, &scheme)),
        json!({"sessions": [{"id": "uss_1"}, {"id": "uss_2"}]})
    );
}

#[test]
fn nested_scheme_on_missing_field_omits_it() {
    let data = json!({"id": 1});
    let scheme = MappingScheme::new().nested("profile", MappingScheme::new().rename("bio", "about"));

    assert_eq!(mapped(Mapper::map(&data, &scheme)), json!({"id": 1}));
}

#[test]
fn nested_and_list_schemes_on_null_fields_omit_them() {
    let data = json!({"id": 1, "profile": null, "tags": null});
    let scheme = MappingScheme::new()
        .nested("profile", MappingScheme::new().rename("bio", "about"))
        .rename_with(
            "tags",
            "labels",
            FieldMapping::List(MappingScheme::new().ignore("internal")),
        );

    assert_eq!(mapped(Mapper::map(&data, &scheme)), json!({"id": 1}));
}

#[test]
fn rename_only_scheme_always_succeeds_on_objects() {
    let scheme = MappingScheme::new()
        .rename("id", "userId")
        .nested("profile", MappingScheme::new().rename("bio", "about"))
        .list("sessions", MappingScheme::new().rename("id", "sessionId"));

    for data in [
        json!({}),
        json!({"id": 1}),
        json!({"profile": null, "sessions": []}),
        json!({"id": 2, "profile": {"bio": "hi"}, "sessions": [{"id": "uss_1"}]}),
    ] {
        let result = Mapper::map(&data, &scheme);
        assert!(result.is_success(), "{data} should map: {:?}", result.failure_value());
    }
}

#[test]
fn nested_scheme_on_non_object_field_fails() {
    let data = json!({"id": 1, "profile": 5});
    let scheme = MappingScheme::new().nested("profile", MappingScheme::new().ignore("avatar"));

    let err = failed(Mapper::map(&data, &scheme));

    assert_eq!(err.reason(), NOT_AN_OBJECT);
    assert_eq!(err.data(), &json!(5));
}

#[test]
fn deep_function_failure_propagates_unchanged() {
    let original = MappingError::for_value("bad street", json!("???"));
    let expected = original.clone();
    let street = MappingScheme::new().function("street", move |_| failure(original.clone()));
    let scheme = MappingScheme::new().nested(
        "user",
        MappingScheme::new().nested("address", street),
    );
    let data = json!({"user": {"address": {"street": "???"}}, "other": 1});

    let err = failed(Mapper::map(&data, &scheme));

    assert_eq!(err, expected);
}

#[test]
fn scheme_only_fields_are_derived() {
    let data = json!({"first": "Ada", "last": "Lovelace"});
    let scheme = MappingScheme::new()
        .function("fullName", |data| {
            let part = |key: &str| data.source.get(key).and_then(Value::as_str).unwrap_or_default().to_string();
            success(Some(json!(format!("{} {}", part("first"), part("last")))))
        })
        .entry(
            "kind",
            scaffold_application::SchemeEntry::Map(FieldMapping::Function(transforms::constant(
                json!("person"),
            ))),
        );

    assert_eq!(
        mapped(Mapper::map(&data, &scheme)),
        json!({"first": "Ada", "last": "Lovelace", "fullName": "Ada Lovelace", "kind": "person"})
    );
}

#[test]
fn undefined_outputs_are_omitted_but_null_is_kept() {
    let data = json!({"a": null, "b": 1});
    let scheme = MappingScheme::new()
        .function("b", |_| success(None))
        .rename("missing", "stillMissing");

    assert_eq!(mapped(Mapper::map(&data, &scheme)), json!({"a": null}));
}

#[test]
fn rename_with_nested_scheme() {
    let data = json!({"profile": {"avatar": "a.png", "bio": "hi"}});
    let scheme = MappingScheme::new().rename_with(
        "profile",
        "about",
        FieldMapping::Scheme(MappingScheme::new().ignore("avatar")),
    );

    assert_eq!(mapped(Mapper::map(&data, &scheme)), json!({"about": {"bio": "hi"}}));
}

#[test]
fn mapping_identity_scheme_is_idempotent() {
    let data = json!({"id": "usr_1", "profile": {"bio": "hi"}, "tags": ["a", "b"], "age": 36});
    let scheme = MappingScheme::new().ignore("age");
    let once = mapped(Mapper::map(&data, &scheme));

    let twice = mapped(Mapper::map(&once, &identity_scheme(&once)));

    assert_eq!(once, twice);
}

#[test]
fn input_is_left_untouched() {
    let data = json!({"id": 1, "secret": "x"});
    let before = data.clone();
    let scheme = MappingScheme::new().ignore("secret").rename("id", "key");

    let _ = Mapper::map(&data, &scheme);

    assert_eq!(data, before);
}

#[derive(Debug, Serialize)]
struct UserRecord {
    id: String,
    email: String,
    password_hash: String,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    user_id: String,
    email: String,
}

#[test]
fn maps_typed_records_into_dtos() {
    let records = vec![
        UserRecord {
            id: "usr_1".into(),
            email: "ADA@EXAMPLE.COM".into(),
            password_hash: "x".into(),
        },
        UserRecord {
            id: "usr_2".into(),
            email: "bob@example.com".into(),
            password_hash: "y".into(),
        },
    ];
    let scheme = MappingScheme::new()
        .ignore("password_hash")
        .rename("id", "userId")
        .entry(
            "email",
            scaffold_application::SchemeEntry::Map(FieldMapping::Function(transforms::lowercase())),
        );

    let dtos: Vec<UserDto> = Mapper::map_as(&records, &scheme)
        .into_result()
        .expect("records map into DTOs");

    assert_eq!(
        dtos,
        vec![
            UserDto {
                user_id: "usr_1".into(),
                email: "ada@example.com".into()
            },
            UserDto {
                user_id: "usr_2".into(),
                email: "bob@example.com".into()
            },
        ]
    );
}
