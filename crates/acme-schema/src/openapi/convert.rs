//! Mechanical conversion of schemars (Draft 2020-12) documents into
//! OpenAPI 3.0 schema objects.
//!
//! - local `$defs` are hoisted into `components/schemas` and `$ref`s rewritten
//! - `"type": [T, "null"]` and `anyOf: [X, {"type": "null"}]` become
//!   `nullable: true`
//! - `const` becomes a single-value `enum`
//! - `$ref` with sibling keywords is wrapped in `allOf`

use serde_json::{Map, Value};

const DEFS_PREFIX: &str = "#/$defs/";
pub(crate) const COMPONENTS_PREFIX: &str = "#/components/schemas/";

/// Keywords whose values are data, not subschemas.
const LITERAL_KEYWORDS: [&str; 5] = ["default", "enum", "const", "example", "examples"];

/// Root document split into its converted body and converted `$defs`.
#[derive(Debug)]
pub(crate) struct Converted {
    pub body: Value,
    pub definitions: Map<String, Value>,
}

/// Split a root schema document into an OpenAPI body and its definitions.
pub(crate) fn convert_document(document: &Value) -> Converted {
    let mut body = document.clone();
    let mut definitions = Map::new();

    if let Some(object) = body.as_object_mut() {
        object.remove("$schema");
        object.remove("$id");
        if let Some(Value::Object(defs)) = object.remove("$defs") {
            for (name, schema) in defs {
                definitions.insert(name, convert_schema(&schema));
            }
        }
    }

    Converted {
        body: convert_schema(&body),
        definitions,
    }
}

/// Convert one schema object (recursively) to its OpenAPI 3.0 form.
pub(crate) fn convert_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(object) => Value::Object(convert_object(object)),
        Value::Array(items) => Value::Array(items.iter().map(convert_schema).collect()),
        Value::Bool(true) => Value::Object(Map::new()),
        Value::Bool(false) => serde_json::json!({ "not": {} }),
        other => other.clone(),
    }
}

fn convert_object(object: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, value) in object {
        let converted = match key.as_str() {
            "properties" => convert_properties(value),
            "$ref" => rewrite_ref(value),
            literal if LITERAL_KEYWORDS.contains(&literal) => value.clone(),
            _ => convert_schema(value),
        };
        out.insert(key.clone(), converted);
    }

    if let Some(Value::Array(examples)) = out.remove("examples") {
        if let Some(first) = examples.into_iter().next() {
            out.insert("example".to_string(), first);
        }
    }
    if let Some(value) = out.remove("const") {
        out.insert("enum".to_string(), Value::Array(vec![value]));
    }

    collapse_null_type(&mut out);
    collapse_null_branch(&mut out, "anyOf");
    collapse_null_branch(&mut out, "oneOf");
    wrap_ref_siblings(out)
}

fn convert_properties(properties: &Value) -> Value {
    match properties {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(name, schema)| (name.clone(), convert_schema(schema)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn rewrite_ref(reference: &Value) -> Value {
    match reference.as_str().and_then(|r| r.strip_prefix(DEFS_PREFIX)) {
        Some(name) => Value::String(format!("{COMPONENTS_PREFIX}{name}")),
        None => reference.clone(),
    }
}

/// `"type": ["string", "null"]` → `"type": "string", "nullable": true`.
fn collapse_null_type(out: &mut Map<String, Value>) {
    let Some(Value::Array(types)) = out.get("type") else {
        return;
    };
    let has_null = types.iter().any(|t| t == "null");
    let rest: Vec<Value> = types.iter().filter(|t| *t != "null").cloned().collect();

    if rest.len() == 1 {
        out.insert("type".to_string(), rest.into_iter().next().unwrap_or(Value::Null));
    } else {
        out.insert("type".to_string(), Value::Array(rest));
    }
    if has_null {
        out.insert("nullable".to_string(), Value::Bool(true));
    }
}

/// `anyOf: [X, {"type": "null"}]` → `allOf: [X], nullable: true`.
fn collapse_null_branch(out: &mut Map<String, Value>, keyword: &str) {
    let Some(Value::Array(branches)) = out.get(keyword) else {
        return;
    };
    let is_null = |branch: &Value| branch.get("type").is_some_and(|t| t == "null");
    if !branches.iter().any(is_null) {
        return;
    }
    let rest: Vec<Value> = branches.iter().filter(|b| !is_null(*b)).cloned().collect();

    out.remove(keyword);
    out.insert("nullable".to_string(), Value::Bool(true));
    if rest.len() == 1 {
        out.insert("allOf".to_string(), Value::Array(rest));
    } else if !rest.is_empty() {
        out.insert(keyword.to_string(), Value::Array(rest));
    }
}

/// OpenAPI 3.0 ignores keywords next to `$ref`; move the reference into `allOf`.
fn wrap_ref_siblings(mut out: Map<String, Value>) -> Map<String, Value> {
    if out.len() > 1 {
        if let Some(reference) = out.remove("$ref") {
            let mut target = Map::new();
            target.insert("$ref".to_string(), reference);
            out.insert("allOf".to_string(), Value::Array(vec![Value::Object(target)]));
        }
    }
    out
}
