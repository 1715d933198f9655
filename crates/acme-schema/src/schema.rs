//! Compiled schemas and the parse / safe-parse entry points.
//!
//! A [`CompiledSchema`] pairs a schemars-generated JSON Schema document with
//! its compiled `jsonschema` validator. Checking an input is a single pass:
//!
//! 1. clone the input, insert declared defaults for absent properties, and
//!    turn integral floats into integers where the schema expects integers
//! 2. run the validator and collect every violation as a [`FieldError`]
//! 3. on success, return the normalised (defaulted) value
//!
//! [`Schema<T>`] adds typed deserialization on top. The same document drives
//! validation and OpenAPI export, so there is one description per shape.
//!
//! Documents are generated with `Option<T>` mapped to plain `T` (an optional
//! field may be absent but not `null`), and every schemars integer format
//! carries explicit `minimum`/`maximum` bounds, so anything the validator
//! accepts also fits the Rust type.

use std::fmt;
use std::marker::PhantomData;

use acme_core::errors::{FieldError, ValidationErrorResponse};
use acme_core::pagination::PaginatedResponse;
use jsonschema::error::ValidationErrorKind;
use schemars::JsonSchema;
use schemars::generate::SchemaSettings;
use serde::de::DeserializeOwned;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use serde_path_to_error::Segment;

use crate::error::SchemaError;
use crate::field_path;
use crate::normalize::normalize_instance;

/// Bounds for the integer formats schemars emits for Rust primitives.
const INTEGER_FORMATS: [(&str, i64, u64); 8] = [
    ("uint8", 0, u8::MAX as u64),
    ("uint16", 0, u16::MAX as u64),
    ("uint32", 0, u32::MAX as u64),
    ("uint64", 0, u64::MAX),
    ("int8", i8::MIN as i64, i8::MAX as u64),
    ("int16", i16::MIN as i64, i16::MAX as u64),
    ("int32", i32::MIN as i64, i32::MAX as u64),
    ("int64", i64::MIN, i64::MAX as u64),
];

/// Keywords whose values are instance data rather than subschemas.
const LITERAL_KEYWORDS: [&str; 4] = ["default", "enum", "const", "examples"];

/// JSON Schema document for `T` as validated and exported by this crate.
///
/// # Errors
///
/// Returns `SchemaError::Serialize` if the schemars output cannot be
/// converted to JSON.
pub fn generate<T: JsonSchema>() -> Result<Value, SchemaError> {
    let generator = SchemaSettings::draft2020_12()
        .with(|settings| settings.option_add_null_type = false)
        .into_generator();
    let mut document = serde_json::to_value(generator.into_root_schema_for::<T>())?;
    bound_integer_formats(&mut document);
    Ok(document)
}

/// Add the numeric range implied by `format` wherever the schema leaves it
/// open. Explicit bounds (e.g. `range(min = 1)`) are kept.
fn bound_integer_formats(schema: &mut Value) {
    match schema {
        Value::Object(object) => {
            bound_object(object);
            for (key, child) in object.iter_mut() {
                if !LITERAL_KEYWORDS.contains(&key.as_str()) {
                    bound_integer_formats(child);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(bound_integer_formats),
        _ => {}
    }
}

fn bound_object(object: &mut Map<String, Value>) {
    let Some(format) = object.get("format").and_then(Value::as_str) else {
        return;
    };
    let Some(&(_, min, max)) = INTEGER_FORMATS.iter().find(|(name, ..)| *name == format) else {
        return;
    };
    object.entry("minimum").or_insert_with(|| Value::from(min));
    object.entry("maximum").or_insert_with(|| Value::from(max));
}

/// A named JSON Schema document together with its compiled validator.
pub struct CompiledSchema {
    name: String,
    document: Value,
    validator: jsonschema::Validator,
}

impl CompiledSchema {
    /// Generate and compile the schema for `T`, named after the type.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Generation` if the generated document does not
    /// compile.
    pub fn for_type<T: JsonSchema>() -> Result<Self, SchemaError> {
        Self::for_type_named::<T>(T::schema_name())
    }

    /// Generate and compile the schema for `T` under an explicit name.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Serialize` if the schemars output cannot be
    /// converted to JSON, or `SchemaError::Generation` if it does not compile.
    pub fn for_type_named<T: JsonSchema>(name: impl Into<String>) -> Result<Self, SchemaError> {
        Self::compile(name, generate::<T>()?)
    }

    /// Compile an already generated document.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Generation` if `jsonschema` rejects the document.
    pub fn compile(name: impl Into<String>, document: Value) -> Result<Self, SchemaError> {
        let name = name.into();
        let validator = jsonschema::options()
            .should_validate_formats(true)
            .build(&document)
            .map_err(|error| SchemaError::Generation(format!("{name}: {error}")))?;
        tracing::debug!(schema = %name, "compiled schema");
        Ok(Self {
            name,
            document,
            validator,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The JSON Schema document (Draft 2020-12) used for validation.
    #[must_use]
    pub const fn document(&self) -> &Value {
        &self.document
    }

    /// Substitute defaults, then validate.
    ///
    /// Returns the defaulted value, or every violation found. The input is
    /// never modified.
    ///
    /// # Errors
    ///
    /// Returns the complete list of field violations when validation fails.
    pub fn check(&self, input: &Value) -> Result<Value, Vec<FieldError>> {
        let mut instance = input.clone();
        normalize_instance(&self.document, &mut instance);

        let issues: Vec<FieldError> = self
            .validator
            .iter_errors(&instance)
            .map(|error| issue_from(&error))
            .collect();

        if issues.is_empty() {
            Ok(instance)
        } else {
            tracing::debug!(schema = %self.name, issues = issues.len(), "validation failed");
            Err(issues)
        }
    }

    /// Untyped safe-parse: the defaulted value or the violations.
    #[must_use]
    pub fn safe_parse_value(&self, input: &Value) -> SafeParse<Value> {
        self.check(input).into()
    }

    /// Untyped parse.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::ValidationFailed` listing every violation.
    pub fn parse_value(&self, input: &Value) -> Result<Value, SchemaError> {
        self.check(input).map_err(|issues| self.failure(issues))
    }

    fn failure(&self, issues: Vec<FieldError>) -> SchemaError {
        SchemaError::ValidationFailed {
            schema: self.name.clone(),
            issues,
        }
    }
}

impl fmt::Debug for CompiledSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledSchema")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

fn issue_from(error: &jsonschema::ValidationError<'_>) -> FieldError {
    let mut field = field_path::from_pointer(&error.instance_path.to_string());
    if let ValidationErrorKind::Required { property } = &error.kind {
        if let Some(name) = property.as_str() {
            field_path::push_segment(&mut field, name);
        }
    }
    FieldError::new(field, error.to_string())
}

/// Typed schema handle: validates untyped JSON and produces a `T`.
pub struct Schema<T> {
    compiled: CompiledSchema,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Schema<T>
where
    T: JsonSchema + DeserializeOwned,
{
    /// Build the schema for `T`.
    ///
    /// # Errors
    ///
    /// Returns a `SchemaError` if generation or compilation fails.
    pub fn new() -> Result<Self, SchemaError> {
        CompiledSchema::for_type::<T>().map(Self::from_compiled)
    }

    /// Build the schema for `T` under an explicit name.
    ///
    /// # Errors
    ///
    /// Returns a `SchemaError` if generation or compilation fails.
    pub fn named(name: impl Into<String>) -> Result<Self, SchemaError> {
        CompiledSchema::for_type_named::<T>(name).map(Self::from_compiled)
    }

    const fn from_compiled(compiled: CompiledSchema) -> Self {
        Self {
            compiled,
            _marker: PhantomData,
        }
    }

    /// Validate `input` and deserialize it, failing with every violation.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::ValidationFailed` listing each violated field.
    pub fn parse(&self, input: &Value) -> Result<T, SchemaError> {
        self.safe_parse(input)
            .into_result()
            .map_err(|issues| self.compiled.failure(issues))
    }

    /// Validate `input` and deserialize it without failing.
    #[must_use]
    pub fn safe_parse(&self, input: &Value) -> SafeParse<T> {
        match self.compiled.check(input) {
            Ok(value) => match serde_path_to_error::deserialize::<_, T>(value) {
                Ok(parsed) => SafeParse::Success(parsed),
                Err(error) => SafeParse::Failure(vec![deserialize_issue(&error)]),
            },
            Err(issues) => SafeParse::Failure(issues),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.compiled.name()
    }

    #[must_use]
    pub const fn document(&self) -> &Value {
        self.compiled.document()
    }

    #[must_use]
    pub const fn compiled(&self) -> &CompiledSchema {
        &self.compiled
    }

    /// Release the untyped schema, e.g. for registration.
    #[must_use]
    pub fn into_compiled(self) -> CompiledSchema {
        self.compiled
    }
}

/// A deserialization failure tagged with the path serde had reached.
fn deserialize_issue(error: &serde_path_to_error::Error<serde_json::Error>) -> FieldError {
    let mut field = String::new();
    for segment in error.path().iter() {
        match segment {
            Segment::Seq { index } => field_path::push_segment(&mut field, &index.to_string()),
            Segment::Map { key } => field_path::push_segment(&mut field, key),
            Segment::Enum { variant } => field_path::push_segment(&mut field, variant),
            _ => {}
        }
    }
    FieldError::new(field, error.inner().to_string())
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Schema").field(&self.compiled.name).finish()
    }
}

/// Wrap an item schema in the paginated envelope `{ data: [item], meta }`.
///
/// A `Schema<T>` is always generated from `T`, so the item's shape is fully
/// determined by its type; `item` contributes only its name, which the
/// wrapper is named after (`PaginatedResponse<Ticket>`). Each call builds a
/// new, independent schema; nothing is cached or shared between wrappers over
/// different item types.
///
/// # Errors
///
/// Returns a `SchemaError` if generation or compilation fails.
pub fn paginated<T>(item: &Schema<T>) -> Result<Schema<PaginatedResponse<T>>, SchemaError>
where
    T: JsonSchema + DeserializeOwned,
{
    Schema::named(format!("PaginatedResponse<{}>", item.name()))
}

/// Outcome of a safe-parse.
///
/// Serializes as `{ "success": true, "value": ... }` or
/// `{ "success": false, "errors": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SafeParse<T> {
    Success(T),
    Failure(Vec<FieldError>),
}

impl<T> SafeParse<T> {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Violations, empty on success.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Success(_) => &[],
            Self::Failure(errors) => errors,
        }
    }

    /// # Errors
    ///
    /// Returns the violations of a failed parse.
    pub fn into_result(self) -> Result<T, Vec<FieldError>> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(errors) => Err(errors),
        }
    }

    /// `VALIDATION_ERROR` envelope for a failed parse; `None` on success.
    #[must_use]
    pub fn into_error_response(self, message: impl Into<String>) -> Option<ValidationErrorResponse> {
        match self {
            Self::Success(_) => None,
            Self::Failure(errors) => Some(ValidationErrorResponse::new(message, errors)),
        }
    }
}

impl<T> From<Result<T, Vec<FieldError>>> for SafeParse<T> {
    fn from(result: Result<T, Vec<FieldError>>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(errors) => Self::Failure(errors),
        }
    }
}

impl<T: Serialize> Serialize for SafeParse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            Self::Success(value) => {
                map.serialize_entry("success", &true)?;
                map.serialize_entry("value", value)?;
            }
            Self::Failure(errors) => {
                map.serialize_entry("success", &false)?;
                map.serialize_entry("errors", errors)?;
            }
        }
        map.end()
    }
}
