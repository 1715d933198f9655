//! The tickets REST surface: registered components and operation list.

use acme_core::errors::ErrorResponse;
use acme_core::tickets::{CreateTicketRequest, Ticket, TicketStatus, UpdateTicketRequest};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::SchemaError;
use crate::openapi::{ApiPath, DocumentBuilder, Info, Method, Response, SchemaRef, Server};
use crate::registry::SchemaRegistry;
use crate::schema::{Schema, paginated};

pub const TAG: &str = "Tickets";
pub const COLLECTION_PATH: &str = "/api/v1/tickets";
pub const ITEM_PATH: &str = "/api/v1/tickets/{id}";
/// Upper bound on `limit` for the list endpoint.
pub const MAX_LIST_LIMIT: u32 = 100;

/// Query string of `GET /api/v1/tickets`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ListTicketsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = MAX_LIST_LIMIT))]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
}

/// Path parameters of `/api/v1/tickets/{id}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TicketIdParams {
    pub id: Uuid,
}

/// Default document metadata for the tickets API.
#[must_use]
pub fn default_info() -> Info {
    Info {
        title: "Acme Tickets API".into(),
        version: "1.0.0".into(),
        description: Some("API for managing tickets in the Acme platform".into()),
    }
}

#[must_use]
pub fn default_servers() -> Vec<Server> {
    vec![
        Server {
            url: "https://api.acme.com".into(),
            description: Some("Production server".into()),
        },
        Server {
            url: "https://api.staging.acme.com".into(),
            description: Some("Staging server".into()),
        },
    ]
}

/// Components referenced by the ticket operations.
///
/// # Errors
///
/// Returns a `SchemaError` if a schema fails to compile or a name repeats.
pub fn ticket_registry() -> Result<SchemaRegistry, SchemaError> {
    let mut registry = SchemaRegistry::new();
    registry.register::<Ticket>("Ticket")?;
    registry.register::<TicketStatus>("TicketStatus")?;
    registry.register::<CreateTicketRequest>("CreateTicketRequest")?;
    registry.register::<UpdateTicketRequest>("UpdateTicketRequest")?;
    registry.register::<ErrorResponse>("ErrorResponse")?;
    Ok(registry)
}

fn error_body() -> SchemaRef {
    SchemaRef::component("ErrorResponse")
}

fn ticket_body() -> SchemaRef {
    SchemaRef::component("Ticket")
}

/// The five ticket operations.
///
/// # Errors
///
/// Returns a `SchemaError` if an inline schema fails to compile.
pub fn ticket_paths() -> Result<Vec<ApiPath>, SchemaError> {
    let page = paginated(&Schema::<Ticket>::named("Ticket")?)?;

    Ok(vec![
        ApiPath::new(Method::Get, COLLECTION_PATH)
            .summary("List tickets")
            .tag(TAG)
            .query(SchemaRef::inline::<ListTicketsQuery>()?)
            .response(Response::new(200, "List of tickets").json(page.into_compiled().into()))
            .response(Response::new(400, "Invalid query parameters").json(error_body())),
        ApiPath::new(Method::Post, COLLECTION_PATH)
            .summary("Create a ticket")
            .tag(TAG)
            .body(SchemaRef::component("CreateTicketRequest"))
            .response(Response::new(201, "Ticket created").json(ticket_body()))
            .response(Response::new(400, "Invalid request body").json(error_body())),
        ApiPath::new(Method::Get, ITEM_PATH)
            .summary("Get a ticket by ID")
            .tag(TAG)
            .params(SchemaRef::inline::<TicketIdParams>()?)
            .response(Response::new(200, "Ticket found").json(ticket_body()))
            .response(Response::new(404, "Ticket not found").json(error_body())),
        ApiPath::new(Method::Patch, ITEM_PATH)
            .summary("Update a ticket")
            .tag(TAG)
            .params(SchemaRef::inline::<TicketIdParams>()?)
            .body(SchemaRef::component("UpdateTicketRequest"))
            .response(Response::new(200, "Ticket updated").json(ticket_body()))
            .response(Response::new(400, "Invalid request body").json(error_body()))
            .response(Response::new(404, "Ticket not found").json(error_body())),
        ApiPath::new(Method::Delete, ITEM_PATH)
            .summary("Delete a ticket")
            .tag(TAG)
            .params(SchemaRef::inline::<TicketIdParams>()?)
            .response(Response::new(204, "Ticket deleted"))
            .response(Response::new(404, "Ticket not found").json(error_body())),
    ])
}

/// Build the complete tickets OpenAPI document.
///
/// # Errors
///
/// Returns a `SchemaError` if registration or assembly fails.
pub fn tickets_document(info: Info, servers: Vec<Server>) -> Result<Value, SchemaError> {
    let registry = ticket_registry()?;
    let mut builder = DocumentBuilder::new(&registry, info).servers(servers);
    for path in ticket_paths()? {
        builder = builder.path(path);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[test]
    fn registry_holds_ticket_components() {
        assert_eq!(
            ticket_registry().unwrap().list(),
            vec![
                "CreateTicketRequest",
                "ErrorResponse",
                "Ticket",
                "TicketStatus",
                "UpdateTicketRequest"
            ]
        );
    }

    #[test]
    fn every_operation_is_tagged_and_summarised() {
        for path in ticket_paths().unwrap() {
            assert_eq!(path.tags, vec![TAG], "{}", path.label());
            assert!(path.summary.is_some(), "{}", path.label());
        }
    }

    #[rstest]
    #[case(json!({}), true)]
    #[case(json!({ "page": 2, "limit": 100, "status": "open" }), true)]
    #[case(json!({ "limit": 101 }), false)]
    #[case(json!({ "limit": 0 }), false)]
    #[case(json!({ "page": 0 }), false)]
    #[case(json!({ "status": "pending" }), false)]
    fn list_query_bounds(#[case] input: Value, #[case] valid: bool) {
        let schema = Schema::<ListTicketsQuery>::new().unwrap();
        assert_eq!(schema.safe_parse(&input).is_success(), valid);
    }

    #[test]
    fn limit_cap_comes_from_constant() {
        let document = crate::schema::generate::<ListTicketsQuery>().unwrap();
        assert_eq!(document["properties"]["limit"]["maximum"], json!(MAX_LIST_LIMIT));
    }

    #[test]
    fn id_param_must_be_uuid() {
        let schema = Schema::<TicketIdParams>::new().unwrap();
        assert!(schema.safe_parse(&json!({ "id": "123e4567-e89b-12d3-a456-426614174000" })).is_success());

        let outcome = schema.safe_parse(&json!({ "id": "123" }));
        assert_eq!(outcome.errors()[0].field, "id");
    }

    #[test]
    fn document_uses_given_metadata() {
        let document = tickets_document(default_info(), default_servers()).unwrap();
        assert_eq!(document["info"]["title"], json!("Acme Tickets API"));
        assert_eq!(document["servers"][1]["url"], json!("https://api.staging.acme.com"));
    }
}
