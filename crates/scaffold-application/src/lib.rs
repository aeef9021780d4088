//! # scaffold-application
//!
//! Application layer building blocks.
//!
//! The centrepiece is the declarative [`Mapper`], which turns persistence
//! records into API-facing DTOs following a [`MappingScheme`]. The crate also
//! carries the application error kinds and the paged list DTOs.

pub mod errors;
pub mod list;
pub mod mapping;

pub use errors::ApplicationError;
pub use list::{DataList, ListResponse, PageInfo};
pub use mapping::{
    DefinitionError, FieldMapping, Mapper, MappingError, MappingFunction, MappingFunctionData,
    MappingParams, MappingScheme, SchemeDefinition, SchemeEntry, TransformRegistry,
};
