//! Behavioural properties of contract validation through `Schema<T>`.

use acme_core::auth::{LoginRequest, RefreshTokenRequest, SignupRequest, UserResponse};
use acme_core::base::{BaseEntity, Priority, Status};
use acme_core::errors::{ErrorCode, ErrorResponse, ValidationErrorResponse};
use acme_core::pagination::{CursorPaginationQuery, PaginationQuery, SortOrder};
use acme_core::tickets::{CreateTicketRequest, Ticket, UpdateTicketRequest};
use acme_schema::{SafeParse, Schema, SchemaError, SchemaRegistry, paginated};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

const ID: &str = "123e4567-e89b-12d3-a456-426614174000";
const STAMP: &str = "2024-01-01T00:00:00Z";

fn ticket_json(title: &str) -> Value {
    json!({
        "id": ID,
        "createdAt": STAMP,
        "updatedAt": STAMP,
        "title": title,
        "description": "Printer on floor 3 is jammed",
        "status": "open",
        "priority": "high"
    })
}

fn fields<T>(outcome: &SafeParse<T>) -> Vec<&str> {
    outcome.errors().iter().map(|e| e.field.as_str()).collect()
}

// --- auth ---

#[test]
fn valid_signup_is_returned_unchanged() {
    let schema = Schema::<SignupRequest>::new().unwrap();
    let input = json!({ "email": "user@example.com", "password": "password123", "name": "Test User" });

    let parsed = schema.parse(&input).unwrap();
    assert_eq!(serde_json::to_value(&parsed).unwrap(), input);
}

#[test]
fn signup_with_malformed_email_fails_on_email() {
    let schema = Schema::<SignupRequest>::new().unwrap();
    let outcome = schema.safe_parse(&json!({
        "email": "invalid-email",
        "password": "password123",
        "name": "Test User"
    }));

    assert!(!outcome.is_success());
    assert_eq!(fields(&outcome), vec!["email"]);
}

#[test]
fn signup_with_short_password_fails_on_password() {
    let schema = Schema::<SignupRequest>::new().unwrap();
    let outcome = schema.safe_parse(&json!({
        "email": "user@example.com",
        "password": "short",
        "name": "Test User"
    }));

    assert_eq!(fields(&outcome), vec!["password"]);
}

#[test]
fn parse_reports_every_violation() {
    let schema = Schema::<SignupRequest>::new().unwrap();
    let error = schema
        .parse(&json!({ "email": "nope", "password": "short", "name": "" }))
        .unwrap_err();

    let SchemaError::ValidationFailed { issues, .. } = &error else {
        panic!("expected ValidationFailed, got {error:?}");
    };
    let mut failed: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
    failed.sort_unstable();
    assert_eq!(failed, vec!["email", "name", "password"]);
}

#[test]
fn login_requires_nonempty_password() {
    let schema = Schema::<LoginRequest>::new().unwrap();
    assert!(schema.safe_parse(&json!({ "email": "user@example.com", "password": "x" })).is_success());
    assert!(!schema.safe_parse(&json!({ "email": "user@example.com", "password": "" })).is_success());
}

#[rstest]
#[case(ID, true)]
#[case("not-a-uuid", false)]
#[case("", false)]
fn refresh_token_must_be_uuid(#[case] token: &str, #[case] valid: bool) {
    let schema = Schema::<RefreshTokenRequest>::new().unwrap();
    assert_eq!(schema.safe_parse(&json!({ "refreshToken": token })).is_success(), valid);
}

#[test]
fn user_response_rejects_invalid_email() {
    let schema = Schema::<UserResponse>::new().unwrap();
    let outcome = schema.safe_parse(&json!({
        "id": ID,
        "createdAt": STAMP,
        "updatedAt": STAMP,
        "email": "not-an-email",
        "name": "Test User",
        "enabled": true
    }));
    assert_eq!(fields(&outcome), vec!["email"]);
}

// --- base ---

#[test]
fn base_entity_rejects_invalid_uuid_and_missing_timestamp() {
    let schema = Schema::<BaseEntity>::new().unwrap();
    let outcome = schema.safe_parse(&json!({ "id": "123", "createdAt": STAMP }));

    let mut failed = fields(&outcome);
    failed.sort_unstable();
    assert_eq!(failed, vec!["id", "updatedAt"]);
}

#[test]
fn shared_enums_accept_members() {
    assert!(Schema::<Status>::new().unwrap().safe_parse(&json!("archived")).is_success());
    assert!(Schema::<Priority>::new().unwrap().safe_parse(&json!("critical")).is_success());
}

#[test]
fn shared_enums_reject_non_members() {
    assert!(!Schema::<Status>::new().unwrap().safe_parse(&json!("paused")).is_success());
    assert!(!Schema::<Priority>::new().unwrap().safe_parse(&json!("urgent")).is_success());
}

// --- tickets ---

#[test]
fn create_ticket_defaults_priority_to_medium() {
    let schema = Schema::<CreateTicketRequest>::new().unwrap();
    let parsed = schema
        .parse(&json!({ "title": "New ticket", "description": "Description" }))
        .unwrap();
    assert_eq!(parsed.priority, Priority::Medium);
}

#[test]
fn explicit_priority_is_kept() {
    let schema = Schema::<CreateTicketRequest>::new().unwrap();
    let parsed = schema
        .parse(&json!({ "title": "New ticket", "description": "d", "priority": "low" }))
        .unwrap();
    assert_eq!(parsed.priority, Priority::Low);
}

#[rstest]
#[case::empty(0, false)]
#[case::one_char(1, true)]
#[case::max_len(200, true)]
#[case::too_long(201, false)]
fn ticket_title_length(#[case] len: usize, #[case] valid: bool) {
    let schema = Schema::<Ticket>::new().unwrap();
    let outcome = schema.safe_parse(&ticket_json(&"a".repeat(len)));
    assert_eq!(outcome.is_success(), valid);
    if !valid {
        assert_eq!(fields(&outcome), vec!["title"]);
    }
}

#[rstest]
#[case(json!({}))]
#[case(json!({ "title": "Renamed" }))]
#[case(json!({ "status": "resolved" }))]
#[case(json!({ "priority": "critical", "description": "more detail" }))]
#[case(json!({ "title": "All", "description": "d", "status": "closed", "priority": "low" }))]
fn update_ticket_accepts_any_subset(#[case] input: Value) {
    let schema = Schema::<UpdateTicketRequest>::new().unwrap();
    let parsed = schema.parse(&input).unwrap();
    assert_eq!(serde_json::to_value(&parsed).unwrap(), input);
}

#[test]
fn empty_update_is_empty() {
    let schema = Schema::<UpdateTicketRequest>::new().unwrap();
    assert!(schema.parse(&json!({})).unwrap().is_empty());
}

#[test]
fn update_ticket_still_checks_present_fields() {
    let schema = Schema::<UpdateTicketRequest>::new().unwrap();
    let outcome = schema.safe_parse(&json!({ "title": "", "status": "reopened" }));

    let mut failed = fields(&outcome);
    failed.sort_unstable();
    assert_eq!(failed, vec!["status", "title"]);
}

#[rstest]
#[case(json!({ "title": null }), "title")]
#[case(json!({ "status": null }), "status")]
#[case(json!({ "description": "ok", "priority": null }), "priority")]
fn update_ticket_rejects_null(#[case] input: Value, #[case] field: &str) {
    let schema = Schema::<UpdateTicketRequest>::new().unwrap();
    assert_eq!(fields(&schema.safe_parse(&input)), vec![field]);
}

// --- pagination ---

#[test]
fn empty_pagination_query_gets_defaults() {
    let schema = Schema::<PaginationQuery>::new().unwrap();
    let parsed = schema.parse(&json!({})).unwrap();
    assert_eq!(parsed, PaginationQuery { page: 1, limit: 20, sort_order: SortOrder::Asc });
}

#[rstest]
#[case(json!({ "page": 0 }), "page")]
#[case(json!({ "limit": 0 }), "limit")]
#[case(json!({ "sortOrder": "sideways" }), "sortOrder")]
#[case(json!({ "page": 5_000_000_000_u64 }), "page")]
#[case(json!({ "limit": 1.5 }), "limit")]
#[case(json!({ "page": -1 }), "page")]
fn pagination_query_violations(#[case] input: Value, #[case] field: &str) {
    let schema = Schema::<PaginationQuery>::new().unwrap();
    assert_eq!(fields(&schema.safe_parse(&input)), vec![field]);
}

#[test]
fn integral_float_page_is_accepted() {
    let schema = Schema::<PaginationQuery>::new().unwrap();
    let parsed = schema.parse(&json!({ "page": 2.0 })).unwrap();
    assert_eq!(parsed.page, 2);
}

#[test]
fn registry_agrees_with_typed_parse_on_overflow() {
    let registry = SchemaRegistry::catalog().unwrap();
    let outcome = registry
        .safe_parse("PaginationQuery", &json!({ "page": 5_000_000_000_u64 }))
        .unwrap();
    assert!(!outcome.is_success());
    assert_eq!(fields(&outcome), vec!["page"]);
}

#[test]
fn empty_cursor_query_gets_default_limit() {
    let schema = Schema::<CursorPaginationQuery>::new().unwrap();
    let parsed = schema.parse(&json!({})).unwrap();
    assert_eq!(parsed.limit, 20);
    assert_eq!(parsed.cursor, None);
}

#[rstest]
#[case(json!({ "limit": 0 }), "limit")]
#[case(json!({ "cursor": null }), "cursor")]
#[case(json!({ "cursor": 7 }), "cursor")]
fn cursor_query_violations(#[case] input: Value, #[case] field: &str) {
    let schema = Schema::<CursorPaginationQuery>::new().unwrap();
    assert_eq!(fields(&schema.safe_parse(&input)), vec![field]);
}

#[test]
fn cursor_query_keeps_given_cursor() {
    let schema = Schema::<CursorPaginationQuery>::new().unwrap();
    let parsed = schema.parse(&json!({ "cursor": "abc", "limit": 5 })).unwrap();
    assert_eq!(parsed.cursor.as_deref(), Some("abc"));
    assert_eq!(parsed.limit, 5);
}

fn meta() -> Value {
    json!({
        "page": 1,
        "limit": 20,
        "total": 2,
        "totalPages": 1,
        "hasNextPage": false,
        "hasPreviousPage": false
    })
}

#[test]
fn paginated_wrapper_is_valid_iff_items_are_valid() {
    let tickets = paginated(&Schema::<Ticket>::new().unwrap()).unwrap();

    let good = json!({ "data": [ticket_json("First"), ticket_json("Second")], "meta": meta() });
    assert!(tickets.safe_parse(&good).is_success());

    let bad = json!({ "data": [ticket_json("First"), ticket_json("")], "meta": meta() });
    let outcome = tickets.safe_parse(&bad);
    assert_eq!(fields(&outcome), vec!["data[1].title"]);
}

#[test]
fn empty_page_is_valid() {
    let tickets = paginated(&Schema::<Ticket>::new().unwrap()).unwrap();
    let parsed = tickets.parse(&json!({ "data": [], "meta": meta() })).unwrap();
    assert!(parsed.data.is_empty());
}

#[test]
fn paginated_wrapper_requires_meta() {
    let tickets = paginated(&Schema::<Ticket>::new().unwrap()).unwrap();
    let outcome = tickets.safe_parse(&json!({ "data": [] }));
    assert_eq!(fields(&outcome), vec!["meta"]);
}

#[test]
fn oversized_total_fails_at_meta_total() {
    let tickets = paginated(&Schema::<Ticket>::new().unwrap()).unwrap();
    let mut meta = meta();
    meta["total"] = json!(1e20);
    let outcome = tickets.safe_parse(&json!({ "data": [], "meta": meta }));
    assert_eq!(fields(&outcome), vec!["meta.total"]);
}

// --- errors ---

#[rstest]
fn every_error_code_validates(
    #[values(
        "VALIDATION_ERROR",
        "NOT_FOUND",
        "UNAUTHORIZED",
        "FORBIDDEN",
        "CONFLICT",
        "INTERNAL_ERROR",
        "BAD_REQUEST",
        "RATE_LIMITED"
    )]
    code: &str,
) {
    let schema = Schema::<ErrorResponse>::new().unwrap();
    let input = json!({ "code": code, "message": "Something happened", "timestamp": STAMP });
    assert!(schema.safe_parse(&input).is_success(), "{code}");
}

#[test]
fn error_code_list_is_complete() {
    assert_eq!(ErrorCode::ALL.len(), 8);
}

#[test]
fn unknown_error_code_fails() {
    let schema = Schema::<ErrorResponse>::new().unwrap();
    let outcome = schema.safe_parse(&json!({ "code": "TEAPOT", "message": "m", "timestamp": STAMP }));
    assert_eq!(fields(&outcome), vec!["code"]);
}

#[test]
fn failure_becomes_validation_error_response() {
    let schema = Schema::<SignupRequest>::new().unwrap();
    let response = schema
        .safe_parse(&json!({ "email": "bad", "password": "password123", "name": "n" }))
        .into_error_response("Request body is invalid")
        .unwrap();

    assert_eq!(response.error.code, ErrorCode::ValidationError);
    assert_eq!(response.details[0].field, "email");

    let round = Schema::<ValidationErrorResponse>::new()
        .unwrap()
        .safe_parse(&serde_json::to_value(&response).unwrap());
    assert!(round.is_success());
}
