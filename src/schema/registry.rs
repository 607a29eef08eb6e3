//! Embedded JSON Schema documents

use rust_embed::Embed;

#[derive(Embed)]
#[folder = "schemas/"]
struct EmbeddedSchemas;

/// Access to the JSON Schemas bundled into the binary
pub struct SchemaRegistry;

impl SchemaRegistry {
    /// File name of the catalog document schema
    pub const CATALOG: &'static str = "catalog.schema.json";

    /// Fetch an embedded schema by file name
    pub fn get(name: &str) -> Option<String> {
        EmbeddedSchemas::get(name)
            .map(|file| String::from_utf8_lossy(file.data.as_ref()).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_schema_is_embedded() {
        let raw = SchemaRegistry::get(SchemaRegistry::CATALOG).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value["$defs"]["tile"].is_object());
    }

    #[test]
    fn test_unknown_schema_is_none() {
        assert!(SchemaRegistry::get("nope.schema.json").is_none());
    }
}
