//! OpenAPI 3.0 export built from the registered validation schemas.

mod convert;
mod document;
mod path;

use std::path::Path;

use serde_json::Value;

use crate::error::SchemaError;

pub use document::{DocumentBuilder, Info, OPENAPI_VERSION, Server};
pub use path::{ApiPath, Method, Response, SchemaRef};

/// Serialize `document` as pretty JSON (with a trailing newline) to `path`,
/// creating parent directories as needed.
///
/// # Errors
///
/// Returns `SchemaError::Serialize` or `SchemaError::Io`.
pub fn write_document(document: &Value, path: &Path) -> Result<(), SchemaError> {
    let io_error = |source| SchemaError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }

    let mut rendered = serde_json::to_string_pretty(document)?;
    rendered.push('\n');
    std::fs::write(path, rendered).map_err(io_error)?;

    tracing::info!(path = %path.display(), "wrote OpenAPI document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn writes_pretty_json_into_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/out/api.json");

        write_document(&json!({ "openapi": "3.0.0" }), &target).unwrap();

        let written = std::fs::read_to_string(&target).unwrap();
        assert_eq!(written, "{\n  \"openapi\": \"3.0.0\"\n}\n");
    }

    #[test]
    fn unwritable_target_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be overwritten as a file.
        let result = write_document(&json!({}), dir.path());
        assert!(matches!(result, Err(SchemaError::Io { .. })));
    }
}
