//! Declarative object mapping
//!
//! A [`MappingScheme`] describes, per output field, whether the field is
//! dropped, renamed, transformed by a function, or mapped recursively with a
//! nested scheme. [`Mapper::map`] applies it to JSON data and reports the
//! outcome as an [`Either`](scaffold_core::Either).

pub mod definition;
pub mod error;
pub mod mapper;
pub mod scheme;
pub mod transforms;

pub use definition::{DefinitionError, SchemeDefinition};
pub use error::MappingError;
pub use mapper::Mapper;
pub use scheme::{
    FieldMapping, MappingFunction, MappingFunctionData, MappingOutcome, MappingParams,
    MappingScheme, SchemeEntry,
};
pub use transforms::TransformRegistry;
