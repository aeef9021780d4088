//! # scaffold-domain
//!
//! Domain layer building blocks: entity identifiers, validated entity
//! creation and update, and the domain error kinds.

pub mod entity;
pub mod errors;
pub mod id;

pub use entity::{DomainEntity, Validation, ValidationCollector};
pub use errors::DomainError;
pub use id::{entity_id, generate_entity_id};
