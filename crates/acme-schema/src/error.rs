//! Schema validation error types.

use acme_core::errors::FieldError;
use thiserror::Error;

/// Errors from schema compilation, validation, the registry, and export.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Requested schema name was not found in the registry.
    #[error("Schema not found: {0}")]
    NotFound(String),

    /// A schema was registered twice under the same name.
    #[error("Schema already registered: {0}")]
    Duplicate(String),

    /// Input did not satisfy the schema. Every violation is listed.
    #[error("Validation failed for {schema}: {}", join_issues(.issues))]
    ValidationFailed {
        schema: String,
        issues: Vec<FieldError>,
    },

    /// Schema generation or compilation error.
    #[error("Schema generation error: {0}")]
    Generation(String),

    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl SchemaError {
    /// Field violations carried by a validation failure; empty otherwise.
    #[must_use]
    pub fn issues(&self) -> &[FieldError] {
        match self {
            Self::ValidationFailed { issues, .. } => issues,
            _ => &[],
        }
    }
}

fn join_issues(issues: &[FieldError]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn validation_failure_lists_every_issue() {
        let error = SchemaError::ValidationFailed {
            schema: "SignupRequest".into(),
            issues: vec![
                FieldError::new("email", "bad email"),
                FieldError::new("password", "too short"),
            ],
        };

        assert_eq!(
            error.to_string(),
            "Validation failed for SignupRequest: email: bad email; password: too short"
        );
        assert_eq!(error.issues().len(), 2);
    }

    #[test]
    fn other_variants_have_no_issues() {
        assert!(SchemaError::NotFound("x".into()).issues().is_empty());
    }
}
