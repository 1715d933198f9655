//! # acme-schema
//!
//! Runtime validation, schema registry, and OpenAPI export for the contracts
//! in `acme-core`.
//!
//! This crate provides:
//! - [`Schema<T>`]: parse and safe-parse of untyped JSON into a contract type,
//!   with defaults applied before validation and every violation reported
//! - [`paginated`]: wraps any item schema in the paginated envelope
//! - [`SchemaRegistry`]: named schemas for lookup, validation, and export
//! - [`openapi`]: OpenAPI 3.0 document assembly from registered schemas
//! - [`tickets_api`]: the tickets REST surface definition
//!
//! ## Architecture
//!
//! Contract types derive `JsonSchema` in `acme-core`. This crate generates
//! their documents with schemars, compiles them with `jsonschema`, and feeds
//! the same documents to the OpenAPI exporter.

mod field_path;
mod normalize;

pub mod error;
pub mod openapi;
pub mod registry;
pub mod schema;
pub mod tickets_api;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
pub use schema::{CompiledSchema, SafeParse, Schema, paginated};
