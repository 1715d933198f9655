//! Instance normalisation ahead of validation.
//!
//! Two rewrites, both driven by the schema:
//!
//! - defaults are read from the `default` keyword of each property schema
//!   (which schemars emits for `#[serde(default = ...)]` fields) and inserted
//!   when the property is absent
//! - integral floats (`2.0`) at `"type": "integer"` locations become integers,
//!   so a value the validator accepts also deserializes
//!
//! Normalisation runs before validation, so an inserted default is checked
//! like any caller-supplied value.

use serde_json::Value;

/// Bound on `$ref` / nesting traversal for self-referential schemas.
const MAX_DEPTH: usize = 64;

/// Insert declared defaults for every absent property and rewrite integral
/// floats, recursing into nested objects and array items. `root` is the root
/// schema used to resolve local `$ref`s.
pub(crate) fn normalize_instance(root: &Value, instance: &mut Value) {
    apply(root, root, instance, 0);
}

fn apply(root: &Value, node: &Value, instance: &mut Value, depth: usize) {
    if depth > MAX_DEPTH {
        return;
    }
    let Some(node) = node.as_object() else {
        return;
    };

    if expects_integer(node) {
        integralize(instance);
    }

    if let Some(target) = node
        .get("$ref")
        .and_then(Value::as_str)
        .and_then(|reference| resolve(root, reference))
    {
        apply(root, target, instance, depth + 1);
    }

    if let Some(parts) = node.get("allOf").and_then(Value::as_array) {
        for part in parts {
            apply(root, part, instance, depth + 1);
        }
    }

    match instance {
        Value::Object(fields) => {
            let Some(properties) = node.get("properties").and_then(Value::as_object) else {
                return;
            };
            for (name, property) in properties {
                if !fields.contains_key(name) {
                    // A null default means "absent" for an optional field.
                    if let Some(default) = property.get("default").filter(|d| !d.is_null()) {
                        fields.insert(name.clone(), default.clone());
                    }
                }
                if let Some(child) = fields.get_mut(name) {
                    apply(root, property, child, depth + 1);
                }
            }
        }
        Value::Array(items) => {
            if let Some(item_schema) = node.get("items") {
                for item in items {
                    apply(root, item_schema, item, depth + 1);
                }
            }
        }
        _ => {}
    }
}

fn expects_integer(node: &serde_json::Map<String, Value>) -> bool {
    match node.get("type") {
        Some(Value::String(kind)) => kind == "integer",
        Some(Value::Array(kinds)) => kinds.iter().any(|k| k == "integer"),
        _ => false,
    }
}

/// `2.0` -> `2`. Fractional, non-finite, and out-of-range values are left for
/// the validator to report.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn integralize(instance: &mut Value) {
    if !instance.is_f64() {
        return;
    }
    let Some(float) = instance.as_f64() else {
        return;
    };
    if !float.is_finite() || float.fract() != 0.0 {
        return;
    }
    if float >= 0.0 && float <= u64::MAX as f64 {
        *instance = Value::from(float as u64);
    } else if float < 0.0 && float >= i64::MIN as f64 {
        *instance = Value::from(float as i64);
    }
}

/// Resolve a document-local reference such as `#/$defs/Priority`.
fn resolve<'a>(root: &'a Value, reference: &str) -> Option<&'a Value> {
    reference
        .strip_prefix('#')
        .and_then(|pointer| root.pointer(pointer))
}
