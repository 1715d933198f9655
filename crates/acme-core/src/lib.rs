//! # acme-core
//!
//! Shared data contracts for the Acme API surface.
//!
//! Every request and response payload is a plain value type deriving
//! `Serialize`, `Deserialize`, and `JsonSchema`. The JSON Schema generated from
//! each type is the single description of its shape: `acme-schema` validates
//! untyped input against it and exports it into OpenAPI documents.
//!
//! - [`base`]: entity identifier and timestamps shared by every domain entity
//! - [`auth`]: signup, login, token refresh, and user payloads
//! - [`tickets`]: ticket entity and its create/update requests
//! - [`errors`]: error codes and error envelopes
//! - [`pagination`]: paging queries, metadata, and the generic paginated envelope
//!
//! Field names are `camelCase` on the wire. Constraints (formats, lengths,
//! ranges) are declared with `#[schemars(...)]` attributes and defaults with
//! `#[serde(default = ...)]`, so both end up in the generated schema.

pub mod auth;
pub mod base;
pub mod errors;
pub mod pagination;
pub mod tickets;
