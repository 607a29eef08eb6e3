//! Merge engine - combine the base catalog with supplementary tile lists
//!
//! The additions document carries optional per-category tile lists for the
//! upper secondary stage. Lists are validated tile by tile and appended to
//! their target category, skipping identifiers the base already owns.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::collections::HashSet;
use tracing::debug;

use crate::catalog::{Catalog, Category};
use crate::schema::{ValidationFailure, Validator};

/// Raw additions document, keyed by target category identifier
///
/// Keys other than the three known categories are ignored, matching the
/// document contract. Lists stay untyped here; the merge validates each
/// element against the tile contract before it is admitted.
#[derive(Debug, Default, Deserialize)]
pub struct AdditionsDocument {
    #[serde(default)]
    pub mechanik: Option<Vec<JsonValue>>,

    #[serde(default)]
    pub optik: Option<Vec<JsonValue>>,

    #[serde(default)]
    pub elektrizitaetslehre: Option<Vec<JsonValue>>,
}

impl AdditionsDocument {
    /// Parse the raw additions document
    pub fn parse(raw: &str, document: &str) -> Result<Self, ValidationFailure> {
        serde_json::from_str(raw).map_err(|e| {
            ValidationFailure::new(
                document,
                "(root)",
                format!("document is not well-formed JSON: {e}"),
            )
        })
    }

    fn lists(&self) -> [(&'static str, Option<&[JsonValue]>); 3] {
        [
            ("mechanik", self.mechanik.as_deref()),
            ("optik", self.optik.as_deref()),
            ("elektrizitaetslehre", self.elektrizitaetslehre.as_deref()),
        ]
    }
}

/// Merge the additions document into a validated base catalog
///
/// Categories keep their base order; a category synthesized for an unknown
/// target identifier is appended after all pre-existing ones. Deterministic
/// for identical inputs.
pub fn merge(
    base: Catalog,
    additions: &AdditionsDocument,
    validator: &Validator,
    document: &str,
) -> Result<Catalog, ValidationFailure> {
    let mut by_id: IndexMap<String, Category> = base
        .categories
        .into_iter()
        .map(|category| (category.id.clone(), category))
        .collect();

    for (category_id, list) in additions.lists() {
        merge_into(&mut by_id, category_id, list, validator, document)?;
    }

    Ok(Catalog {
        app: base.app,
        categories: by_id.into_values().collect(),
    })
}

fn merge_into(
    index: &mut IndexMap<String, Category>,
    category_id: &str,
    list: Option<&[JsonValue]>,
    validator: &Validator,
    document: &str,
) -> Result<(), ValidationFailure> {
    let Some(list) = list else {
        return Ok(());
    };
    if list.is_empty() {
        return Ok(());
    }

    let tiles = validator.parse_tiles(list, document, category_id)?;

    match index.get_mut(category_id) {
        Some(category) => {
            let existing: HashSet<String> =
                category.tiles.iter().map(|tile| tile.id.clone()).collect();
            let before = category.tiles.len();
            category
                .tiles
                .extend(tiles.into_iter().filter(|tile| !existing.contains(&tile.id)));
            debug!(
                category = category_id,
                appended = category.tiles.len() - before,
                "merged supplementary tiles"
            );
        }
        None => {
            // Fallback for a target the base does not know; not expected
            // with well-formed documents.
            debug!(category = category_id, "synthesized category for additions");
            index.insert(
                category_id.to_string(),
                Category {
                    id: category_id.to_string(),
                    title: capitalize_first(category_id),
                    route: format!("/{category_id}"),
                    tiles,
                },
            );
        }
    }

    Ok(())
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
