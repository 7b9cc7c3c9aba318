//! Embedded JSON Schema for catalog files.
//!
//! The schema ships inside the crate so every catalog is checked against the
//! same contract regardless of where it was loaded from. It is compiled once
//! per process and reused for every load.

use crate::error::CatalogError;
use anyhow::{Context, Result, anyhow};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::sync::OnceLock;

const CATALOG_SCHEMA: &str = include_str!("../schema/doc_catalog.schema.json");
const SCHEMA_VERSION_POINTER: &str = "/schema_version";

/// Result of compiling a JSON Schema.
pub(crate) struct SchemaLoadResult {
    pub schema_version: String,
    pub compiled: JSONSchema,
}

pub(crate) fn compile_schema(raw: &str, origin: &str) -> Result<SchemaLoadResult> {
    let schema: Value =
        serde_json::from_str(raw).with_context(|| format!("parsing schema {origin}"))?;
    let schema_version = extract_schema_version(&schema, SCHEMA_VERSION_POINTER)
        .ok_or_else(|| anyhow!("schema {origin} missing schema_version"))?;
    let compiled = JSONSchema::compile(&schema)
        .map_err(|err| anyhow!("compiling schema {origin}: {err}"))?;
    Ok(SchemaLoadResult {
        schema_version,
        compiled,
    })
}

fn catalog_schema() -> Result<&'static SchemaLoadResult, CatalogError> {
    static SCHEMA: OnceLock<Result<SchemaLoadResult, String>> = OnceLock::new();
    SCHEMA
        .get_or_init(|| {
            compile_schema(CATALOG_SCHEMA, "doc_catalog.schema.json")
                .inspect(|schema| {
                    tracing::debug!(version = %schema.schema_version, "catalog schema compiled");
                })
                .map_err(|err| format!("{err:#}"))
        })
        .as_ref()
        .map_err(|details| CatalogError::invalid_shape("doc_catalog.schema.json", details.clone()))
}

/// Check a raw catalog value against the embedded schema.
///
/// Every violation is collected so a broken catalog reports all of its
/// problems at once.
pub(crate) fn validate_catalog_value(value: &Value, origin: &str) -> Result<(), CatalogError> {
    let schema = catalog_schema()?;
    if let Err(errors) = schema.compiled.validate(value) {
        let details = errors
            .map(|err| format!("{}: {}", display_pointer(&err.instance_path.to_string()), err))
            .collect::<Vec<_>>()
            .join("\n");
        return Err(CatalogError::invalid_shape(origin, details));
    }
    Ok(())
}

fn display_pointer(pointer: &str) -> &str {
    if pointer.is_empty() { "/" } else { pointer }
}

fn extract_schema_version(schema: &Value, pointer: &str) -> Option<String> {
    let version = schema.pointer(pointer).and_then(Value::as_str)?;
    if version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Some(version.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn embedded_schema_compiles() {
        let schema = compile_schema(CATALOG_SCHEMA, "embedded").unwrap();
        assert_eq!(schema.schema_version, "doc_catalog_v1");
    }

    #[test]
    fn schema_without_version_is_rejected() {
        let err = compile_schema("{\"type\": \"object\"}", "bare")
            .err()
            .expect("missing version must fail");
        assert!(err.to_string().contains("schema_version"));
    }

    #[test]
    fn violations_name_the_offending_location() {
        let value = json!({
            "groups": [{"name": "default", "order": "1", "list": [
                {"order": "one", "desc": "Admin API"}
            ]}]
        });
        let err = validate_catalog_value(&value, "admin").unwrap_err();
        let text = err.to_string();
        assert!(err.is_shape_error());
        assert!(text.contains("/groups/0/list/0/order"), "{text}");
    }

    #[test]
    fn lenient_shapes_pass() {
        let value = json!({
            "key": "rpc",
            "sections": [{"order": "1", "desc": "Add dependency", "list": null}]
        });
        validate_catalog_value(&value, "rpc").unwrap();
    }
}
