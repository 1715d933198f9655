//! OpenAPI 3.0 document assembly.
//!
//! Component schemas come straight from the registry's validation documents;
//! nothing here describes a shape independently. Output maps are ordered, so
//! the same registry and paths always produce the same document.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{Map, Value, json};

use super::convert::{COMPONENTS_PREFIX, convert_document};
use super::path::{ApiPath, SchemaRef};
use crate::error::SchemaError;
use crate::registry::SchemaRegistry;

pub const OPENAPI_VERSION: &str = "3.0.0";
const JSON_MEDIA_TYPE: &str = "application/json";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Info {
    pub title: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Server {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Builds an OpenAPI document from a registry plus operation definitions.
#[derive(Debug)]
pub struct DocumentBuilder<'r> {
    registry: &'r SchemaRegistry,
    info: Info,
    servers: Vec<Server>,
    paths: Vec<ApiPath>,
}

impl<'r> DocumentBuilder<'r> {
    #[must_use]
    pub const fn new(registry: &'r SchemaRegistry, info: Info) -> Self {
        Self {
            registry,
            info,
            servers: Vec::new(),
            paths: Vec::new(),
        }
    }

    #[must_use]
    pub fn server(mut self, server: Server) -> Self {
        self.servers.push(server);
        self
    }

    #[must_use]
    pub fn servers(mut self, servers: impl IntoIterator<Item = Server>) -> Self {
        self.servers.extend(servers);
        self
    }

    #[must_use]
    pub fn path(mut self, path: ApiPath) -> Self {
        self.paths.push(path);
        self
    }

    /// Assemble the document.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` when an operation references a
    /// component that is not registered (or a `$ref` ends up dangling),
    /// `SchemaError::Duplicate` when a method/path pair is declared twice, and
    /// `SchemaError::Generation` when query or path parameters are not
    /// described by an object schema.
    pub fn build(self) -> Result<Value, SchemaError> {
        let Self {
            registry,
            info,
            servers,
            paths,
        } = self;

        let mut components = Map::new();
        let mut hoisted = Map::new();
        for (name, schema) in registry.iter() {
            let converted = convert_document(schema.document());
            components.insert(name.to_string(), converted.body);
            merge_definitions(&mut hoisted, converted.definitions);
        }

        let mut resolver = Resolver {
            registry,
            hoisted: &mut hoisted,
        };
        let mut path_items = Map::new();
        for api in paths {
            let label = api.label();
            let method = api.method.as_str();
            let operation = resolver.operation(&api)?;

            let item = path_items
                .entry(api.path.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            let Some(item) = item.as_object_mut() else {
                return Err(SchemaError::Generation(format!("path item for {label} is not an object")));
            };
            if item.contains_key(method) {
                return Err(SchemaError::Duplicate(label));
            }
            tracing::debug!(operation = %label, "documented operation");
            item.insert(method.to_string(), operation);
        }

        for (name, schema) in hoisted {
            components.entry(name).or_insert(schema);
        }

        let document = json!({
            "openapi": OPENAPI_VERSION,
            "info": info,
            "servers": servers,
            "components": { "schemas": components },
            "paths": path_items,
        });
        check_references(&document, &components_of(&document))?;
        Ok(document)
    }
}

fn merge_definitions(into: &mut Map<String, Value>, definitions: Map<String, Value>) {
    for (name, schema) in definitions {
        into.entry(name).or_insert(schema);
    }
}

/// Resolves `SchemaRef`s while collecting `$defs` of inline schemas.
struct Resolver<'a> {
    registry: &'a SchemaRegistry,
    hoisted: &'a mut Map<String, Value>,
}

impl Resolver<'_> {
    fn operation(&mut self, api: &ApiPath) -> Result<Value, SchemaError> {
        let mut operation = Map::new();
        if let Some(summary) = &api.summary {
            operation.insert("summary".into(), json!(summary));
        }
        if !api.tags.is_empty() {
            operation.insert("tags".into(), json!(api.tags));
        }

        let mut parameters = Vec::new();
        if let Some(params) = &api.params {
            parameters.extend(self.parameters(params, "path")?);
        }
        if let Some(query) = &api.query {
            parameters.extend(self.parameters(query, "query")?);
        }
        if !parameters.is_empty() {
            operation.insert("parameters".into(), Value::Array(parameters));
        }

        if let Some(body) = &api.body {
            operation.insert(
                "requestBody".into(),
                json!({ "content": { JSON_MEDIA_TYPE: { "schema": self.schema(body)? } } }),
            );
        }

        let mut responses = Map::new();
        for response in &api.responses {
            let mut entry = Map::new();
            entry.insert("description".into(), json!(response.description));
            if let Some(body) = &response.body {
                entry.insert(
                    "content".into(),
                    json!({ JSON_MEDIA_TYPE: { "schema": self.schema(body)? } }),
                );
            }
            responses.insert(response.status.to_string(), Value::Object(entry));
        }
        operation.insert("responses".into(), Value::Object(responses));

        Ok(Value::Object(operation))
    }

    /// Schema object for a body: a `$ref` for components, the converted
    /// document for inline schemas.
    fn schema(&mut self, schema: &SchemaRef) -> Result<Value, SchemaError> {
        match schema {
            SchemaRef::Component(name) => {
                self.component(name)?;
                Ok(json!({ "$ref": format!("{COMPONENTS_PREFIX}{name}") }))
            }
            SchemaRef::Inline(compiled) => Ok(self.expand(compiled.document())),
        }
    }

    /// Fully expanded object schema, used to derive parameters.
    fn expanded(&mut self, schema: &SchemaRef) -> Result<Value, SchemaError> {
        match schema {
            SchemaRef::Component(name) => {
                let document = self.component(name)?.clone();
                Ok(self.expand(&document))
            }
            SchemaRef::Inline(compiled) => Ok(self.expand(compiled.document())),
        }
    }

    fn component(&self, name: &str) -> Result<&Value, SchemaError> {
        self.registry
            .document(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))
    }

    fn expand(&mut self, document: &Value) -> Value {
        let converted = convert_document(document);
        merge_definitions(self.hoisted, converted.definitions);
        converted.body
    }

    fn parameters(&mut self, schema: &SchemaRef, location: &str) -> Result<Vec<Value>, SchemaError> {
        let body = self.expanded(schema)?;
        let Some(properties) = body.get("properties").and_then(Value::as_object) else {
            return Err(SchemaError::Generation(format!(
                "{location} parameters must be described by an object schema"
            )));
        };
        let required: BTreeSet<&str> = body
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let mut parameters = Vec::with_capacity(properties.len());
        for (name, property) in properties {
            let mut property = property.clone();
            let description = property
                .as_object_mut()
                .and_then(|object| {
                    object.remove("nullable");
                    object.remove("description")
                });

            let mut parameter = Map::new();
            parameter.insert("name".into(), json!(name));
            parameter.insert("in".into(), json!(location));
            parameter.insert(
                "required".into(),
                json!(location == "path" || required.contains(name.as_str())),
            );
            if let Some(description) = description {
                parameter.insert("description".into(), description);
            }
            parameter.insert("schema".into(), property);
            parameters.push(Value::Object(parameter));
        }
        Ok(parameters)
    }
}

fn components_of(document: &Value) -> BTreeSet<String> {
    document
        .pointer("/components/schemas")
        .and_then(Value::as_object)
        .map(|schemas| schemas.keys().cloned().collect())
        .unwrap_or_default()
}

/// Every `$ref` in the document must name an existing component.
fn check_references(value: &Value, components: &BTreeSet<String>) -> Result<(), SchemaError> {
    match value {
        Value::Object(object) => {
            if let Some(reference) = object.get("$ref").and_then(Value::as_str) {
                let known = reference
                    .strip_prefix(COMPONENTS_PREFIX)
                    .is_some_and(|name| components.contains(name));
                if !known {
                    return Err(SchemaError::NotFound(reference.to_string()));
                }
            }
            object
                .values()
                .try_for_each(|child| check_references(child, components))
        }
        Value::Array(items) => items
            .iter()
            .try_for_each(|child| check_references(child, components)),
        _ => Ok(()),
    }
}
