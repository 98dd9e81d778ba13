//! Core contracts for songfix.
//!
//! This crate defines the registry schema model, the field definition types
//! consumed by the generator, and the catalog used to select a schema by name
//! and version.

pub mod catalog;
pub mod error;
pub mod schema;
pub mod types;

pub use catalog::SchemaCatalog;
pub use error::{Error, Result};
pub use schema::{Field, Schema, SchemaOptions, SchemaPage};
pub use types::{FieldDefinition, FieldType};
