//! HTTP operation definitions consumed by the document builder.

use std::fmt;

use schemars::JsonSchema;

use crate::error::SchemaError;
use crate::schema::CompiledSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Lowercase form used as the OpenAPI path-item key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

/// Where an operation's schema comes from.
#[derive(Debug)]
pub enum SchemaRef {
    /// A schema registered in the `SchemaRegistry` under this name; emitted as
    /// a `$ref` to `components/schemas`.
    Component(String),
    /// An unregistered schema emitted inline.
    Inline(CompiledSchema),
}

impl SchemaRef {
    #[must_use]
    pub fn component(name: impl Into<String>) -> Self {
        Self::Component(name.into())
    }

    /// Inline schema generated from `T`.
    ///
    /// # Errors
    ///
    /// Returns a `SchemaError` if generation or compilation fails.
    pub fn inline<T: JsonSchema>() -> Result<Self, SchemaError> {
        CompiledSchema::for_type::<T>().map(Self::Inline)
    }
}

impl From<CompiledSchema> for SchemaRef {
    fn from(schema: CompiledSchema) -> Self {
        Self::Inline(schema)
    }
}

/// One documented response. A response without a body (e.g. 204) has no schema.
#[derive(Debug)]
pub struct Response {
    pub status: u16,
    pub description: String,
    pub body: Option<SchemaRef>,
}

impl Response {
    #[must_use]
    pub fn new(status: u16, description: impl Into<String>) -> Self {
        Self {
            status,
            description: description.into(),
            body: None,
        }
    }

    #[must_use]
    pub fn json(mut self, body: SchemaRef) -> Self {
        self.body = Some(body);
        self
    }
}

/// A single operation: method and path template plus its request and
/// response schemas.
///
/// `query` and `params` must be object schemas; each property becomes a
/// parameter. Path parameters are always required.
#[derive(Debug)]
pub struct ApiPath {
    pub method: Method,
    pub path: String,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub query: Option<SchemaRef>,
    pub params: Option<SchemaRef>,
    pub body: Option<SchemaRef>,
    pub responses: Vec<Response>,
}

impl ApiPath {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            summary: None,
            tags: Vec::new(),
            query: None,
            params: None,
            body: None,
            responses: Vec::new(),
        }
    }

    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    #[must_use]
    pub fn query(mut self, schema: SchemaRef) -> Self {
        self.query = Some(schema);
        self
    }

    #[must_use]
    pub fn params(mut self, schema: SchemaRef) -> Self {
        self.params = Some(schema);
        self
    }

    #[must_use]
    pub fn body(mut self, schema: SchemaRef) -> Self {
        self.body = Some(schema);
        self
    }

    #[must_use]
    pub fn response(mut self, response: Response) -> Self {
        self.responses.push(response);
        self
    }

    /// `GET /api/v1/tickets` style label for logs and errors.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}
