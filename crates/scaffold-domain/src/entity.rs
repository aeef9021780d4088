//! Base behaviour for domain entities
//!
//! Entities validate their input before they are built or changed. The
//! validation itself is supplied by each entity as a plain function; this
//! module only wires its verdict into a [`DomainError`].

use scaffold_core::{Either, ValidationErrors, failure, success};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::DomainError;
use crate::id::generate_entity_id;

/// Verdict of an entity validation function
pub type Validation = Either<ValidationErrors, ()>;

/// Common contract of domain entities
pub trait DomainEntity: Sized {
    /// Entity name used in error messages
    const NAME: &'static str;

    /// Prefix of generated ids
    const PREFIX: &'static str;

    /// Entity identifier
    fn id(&self) -> &str;

    /// Use `id` when given, otherwise generate a new one under [`Self::PREFIX`]
    fn resolve_id(id: Option<String>) -> String {
        id.unwrap_or_else(|| generate_entity_id(Self::PREFIX))
    }

    /// Validate `props` and build the entity with `factory` when they pass.
    fn create_validated<P, V, B>(props: P, validate: V, factory: B) -> Either<DomainError, Self>
    where
        P: Serialize,
        V: FnOnce(&P) -> Validation,
        B: FnOnce(P) -> Self,
    {
        if let Either::Failure(errors) = validate(&props) {
            debug!(entity = Self::NAME, "Rejected entity creation");
            return failure(validation_error::<Self, _>(&props, errors));
        }
        success(factory(props))
    }

    /// Validate `data` and apply it to `self` when it passes.
    ///
    /// The entity is left untouched on failure.
    fn update_validated<D, V, A>(&mut self, data: D, validate: V, apply: A) -> Either<DomainError, ()>
    where
        D: Serialize,
        V: FnOnce(&D) -> Validation,
        A: FnOnce(&mut Self, D),
    {
        if let Either::Failure(errors) = validate(&data) {
            debug!(entity = Self::NAME, id = self.id(), "Rejected entity update");
            return failure(validation_error::<Self, _>(&data, errors));
        }
        apply(self, data);
        success(())
    }
}

fn validation_error<E: DomainEntity, T: Serialize>(data: &T, errors: ValidationErrors) -> DomainError {
    let data = serde_json::to_value(data).unwrap_or_else(|err| {
        warn!(entity = E::NAME, error = %err, "Rejected input could not be serialized");
        Value::Null
    });
    DomainError::entity_validation(E::NAME, data, Some(errors))
}

/// Collects per-field messages while validating input
#[derive(Debug, Default)]
pub struct ValidationCollector {
    errors: ValidationErrors,
}

impl ValidationCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` against `field` unless `ok` holds
    pub fn check(&mut self, ok: bool, field: &str, message: impl Into<String>) -> &mut Self {
        if !ok {
            self.errors
                .entry(field.to_string())
                .or_default()
                .push(message.into());
        }
        self
    }

    /// Finish: success when nothing was recorded
    pub fn finish(self) -> Validation {
        if self.errors.is_empty() {
            success(())
        } else {
            failure(self.errors)
        }
    }
}
