//! Schema validation with path-carrying error reporting
//!
//! Input documents are checked in two stages: first against the embedded
//! JSON Schema, then by deserialization into the typed model. The first
//! structural violation aborts the whole load; there is no partial result.

use jsonschema::error::ValidationErrorKind;
use jsonschema::{validator_for, ValidationError as JsonSchemaError, Validator as JsonValidator};
use miette::Diagnostic;
use serde_json::{json, Value as JsonValue};
use thiserror::Error;

use crate::catalog::{Catalog, Tile};
use crate::schema::registry::SchemaRegistry;

/// The single error kind raised by catalog construction
///
/// Carries the offending document, the structural path inside it and the
/// expectation that did not hold. `Clone` so the cached failure can be
/// re-signaled unchanged on every later accessor call.
#[derive(Debug, Clone, Error, Diagnostic)]
#[error("{document}: validation failed at {path}: {expectation}")]
#[diagnostic(code(lehrplan::schema::validation))]
pub struct ValidationFailure {
    /// Input document that failed
    pub document: String,

    /// JSON pointer to the offending value, "(root)" for the document itself
    pub path: String,

    /// The contract that did not hold
    pub expectation: String,

    #[help]
    pub help: Option<String>,
}

impl ValidationFailure {
    pub(crate) fn new(
        document: &str,
        path: impl Into<String>,
        expectation: impl Into<String>,
    ) -> Self {
        Self {
            document: document.to_string(),
            path: path.into(),
            expectation: expectation.into(),
            help: None,
        }
    }
}

/// Validator holding the compiled document and tile schemas
pub struct Validator {
    root: JsonValidator,
    tile: JsonValidator,
}

impl Validator {
    /// Compile the embedded schema into a document and a tile validator
    ///
    /// The tile validator reuses the shared `$defs` so addition lists can
    /// be checked element by element against the same contract.
    pub fn new() -> Result<Self, ValidationFailure> {
        let raw = SchemaRegistry::get(SchemaRegistry::CATALOG).ok_or_else(|| {
            ValidationFailure::new(
                SchemaRegistry::CATALOG,
                "(schema)",
                "embedded schema is missing from the build",
            )
        })?;
        let schema: JsonValue = serde_json::from_str(&raw).map_err(|e| {
            ValidationFailure::new(
                SchemaRegistry::CATALOG,
                "(schema)",
                format!("schema is not well-formed JSON: {e}"),
            )
        })?;

        let root = validator_for(&schema).map_err(|e| {
            ValidationFailure::new(SchemaRegistry::CATALOG, "(schema)", e.to_string())
        })?;

        let tile_schema = json!({
            "$ref": "#/$defs/tile",
            "$defs": schema.get("$defs").cloned().unwrap_or_else(|| json!({})),
        });
        let tile = validator_for(&tile_schema).map_err(|e| {
            ValidationFailure::new(SchemaRegistry::CATALOG, "(schema)", e.to_string())
        })?;

        Ok(Self { root, tile })
    }

    /// Validate and deserialize a full catalog document
    pub fn parse_catalog(&self, raw: &str, document: &str) -> Result<Catalog, ValidationFailure> {
        let value = parse_json(raw, document)?;
        if let Err(error) = self.root.validate(&value) {
            return Err(describe_violation(document, &error));
        }
        serde_json::from_value(value).map_err(|e| {
            ValidationFailure::new(
                document,
                "(root)",
                format!("document does not match the typed model: {e}"),
            )
        })
    }

    /// Validate and deserialize a supplementary tile list
    ///
    /// Elements are checked one by one so the failure path names the
    /// category key and list index that broke the contract.
    pub fn parse_tiles(
        &self,
        list: &[JsonValue],
        document: &str,
        category_id: &str,
    ) -> Result<Vec<Tile>, ValidationFailure> {
        let mut tiles = Vec::with_capacity(list.len());
        for (index, value) in list.iter().enumerate() {
            if let Err(error) = self.tile.validate(value) {
                let mut failure = describe_violation(document, &error);
                let suffix = error.instance_path.to_string();
                failure.path = format!("/{category_id}/{index}{suffix}");
                return Err(failure);
            }
            let tile: Tile = serde_json::from_value(value.clone()).map_err(|e| {
                ValidationFailure::new(
                    document,
                    format!("/{category_id}/{index}"),
                    format!("tile does not match the typed model: {e}"),
                )
            })?;
            tiles.push(tile);
        }
        Ok(tiles)
    }
}

fn parse_json(raw: &str, document: &str) -> Result<JsonValue, ValidationFailure> {
    serde_json::from_str(raw).map_err(|e| {
        ValidationFailure::new(
            document,
            "(root)",
            format!("document is not well-formed JSON: {e}"),
        )
    })
}

/// Map a JSON Schema violation to the catalog error kind
fn describe_violation(document: &str, error: &JsonSchemaError) -> ValidationFailure {
    let path = error.instance_path.to_string();
    let path = if path.is_empty() {
        "(root)".to_string()
    } else {
        path
    };

    let expectation = match &error.kind {
        ValidationErrorKind::Required { property } => {
            format!("missing required field {}", render_value(property))
        }
        ValidationErrorKind::Type { kind } => {
            format!("expected value of type {kind:?}")
        }
        ValidationErrorKind::Enum { options } => {
            format!("value must be one of: {}", render_options(options))
        }
        _ => error.to_string(),
    };

    let help = match &error.kind {
        ValidationErrorKind::Required { property } => {
            Some(format!("Add the {} field", render_value(property)))
        }
        ValidationErrorKind::Enum { options } => {
            Some(format!("Valid values: {}", render_options(options)))
        }
        _ => None,
    };

    ValidationFailure {
        document: document.to_string(),
        path,
        expectation,
        help,
    }
}

fn render_value(value: &JsonValue) -> String {
    value
        .as_str()
        .map(|s| format!("'{s}'"))
        .unwrap_or_else(|| value.to_string())
}

fn render_options(options: &JsonValue) -> String {
    if let Some(array) = options.as_array() {
        array
            .iter()
            .map(|v| {
                v.as_str()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| v.to_string())
            })
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        options.to_string()
    }
}
