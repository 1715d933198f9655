//! Named registry of compiled contract schemas.
//!
//! The registry is an explicit value: callers build one, register the schemas
//! they want to expose, and pass it around. There is no process-wide registry.
//! [`SchemaRegistry::catalog`] builds the registry holding every contract in
//! `acme-core`.

use std::collections::BTreeMap;

use acme_core::auth::{
    AuthResponse, LoginRequest, RefreshTokenRequest, SignupRequest, UserResponse,
};
use acme_core::base::{BaseEntity, Priority, Status, Timestamps};
use acme_core::errors::{ErrorCode, ErrorResponse, FieldError, ValidationErrorResponse};
use acme_core::pagination::{
    CursorPaginationQuery, PaginatedResponse, PaginationMeta, PaginationQuery, SortOrder,
};
use acme_core::tickets::{CreateTicketRequest, Ticket, TicketStatus, UpdateTicketRequest};
use schemars::JsonSchema;
use serde_json::Value;

use crate::error::SchemaError;
use crate::schema::{CompiledSchema, SafeParse};

/// Schemas keyed by name, iterated in name order.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, CompiledSchema>,
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry containing every contract schema.
    ///
    /// # Errors
    ///
    /// Returns a `SchemaError` if any schema fails to generate or compile.
    pub fn catalog() -> Result<Self, SchemaError> {
        let mut registry = Self::new();

        // --- base ---
        registry.register::<BaseEntity>("BaseEntity")?;
        registry.register::<Timestamps>("Timestamps")?;
        registry.register::<Status>("Status")?;
        registry.register::<Priority>("Priority")?;

        // --- auth ---
        registry.register::<SignupRequest>("SignupRequest")?;
        registry.register::<LoginRequest>("LoginRequest")?;
        registry.register::<RefreshTokenRequest>("RefreshTokenRequest")?;
        registry.register::<AuthResponse>("AuthResponse")?;
        registry.register::<UserResponse>("UserResponse")?;

        // --- tickets ---
        registry.register::<Ticket>("Ticket")?;
        registry.register::<TicketStatus>("TicketStatus")?;
        registry.register::<CreateTicketRequest>("CreateTicketRequest")?;
        registry.register::<UpdateTicketRequest>("UpdateTicketRequest")?;
        registry.register::<PaginatedResponse<Ticket>>("PaginatedTickets")?;

        // --- errors ---
        registry.register::<ErrorCode>("ErrorCode")?;
        registry.register::<ErrorResponse>("ErrorResponse")?;
        registry.register::<FieldError>("FieldError")?;
        registry.register::<ValidationErrorResponse>("ValidationErrorResponse")?;

        // --- pagination ---
        registry.register::<PaginationQuery>("PaginationQuery")?;
        registry.register::<PaginationMeta>("PaginationMeta")?;
        registry.register::<SortOrder>("SortOrder")?;
        registry.register::<CursorPaginationQuery>("CursorPaginationQuery")?;

        Ok(registry)
    }

    /// Generate, compile, and register the schema for `T` under `name`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Duplicate` if `name` is taken, or a generation
    /// error from compiling the schema.
    pub fn register<T: JsonSchema>(&mut self, name: &str) -> Result<(), SchemaError> {
        if self.schemas.contains_key(name) {
            return Err(SchemaError::Duplicate(name.to_string()));
        }
        self.insert(CompiledSchema::for_type_named::<T>(name)?)
    }

    /// Register an already compiled schema under its own name.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Duplicate` if the name is taken.
    pub fn insert(&mut self, schema: CompiledSchema) -> Result<(), SchemaError> {
        let name = schema.name().to_string();
        if self.schemas.contains_key(&name) {
            return Err(SchemaError::Duplicate(name));
        }
        tracing::debug!(schema = %name, "registered schema");
        self.schemas.insert(name, schema);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CompiledSchema> {
        self.schemas.get(name)
    }

    /// JSON Schema document for `name`.
    #[must_use]
    pub fn document(&self, name: &str) -> Option<&Value> {
        self.get(name).map(CompiledSchema::document)
    }

    /// Safe-parse `instance` against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown.
    pub fn safe_parse(&self, name: &str, instance: &Value) -> Result<SafeParse<Value>, SchemaError> {
        self.lookup(name)
            .map(|schema| schema.safe_parse_value(instance))
    }

    /// Validate `instance` against a named schema, returning the defaulted value.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &Value) -> Result<Value, SchemaError> {
        self.lookup(name)?.parse_value(instance)
    }

    fn lookup(&self, name: &str) -> Result<&CompiledSchema, SchemaError> {
        self.get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CompiledSchema)> {
        self.schemas
            .iter()
            .map(|(name, schema)| (name.as_str(), schema))
    }

    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
