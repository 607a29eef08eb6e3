//! Integration tests for the lehrplan catalog
//!
//! These exercise the public API end to end: document validation, merging,
//! cached lookups and filtering, both over hand-built documents and over
//! the bundled ones.

use pretty_assertions::assert_eq;
use serde_json::json;

use lehrplan::catalog::Level;
use lehrplan::core::{filter_tiles, unique_grades, CatalogStore, FilterCriteria};

/// Helper to build a small base document
fn base_document() -> String {
    json!({
        "app": { "title": "Physik Lehrplan", "version": 1 },
        "categories": [
            {
                "id": "mechanik",
                "title": "Mechanik",
                "route": "/mechanik",
                "tiles": [
                    { "id": "t1", "title": "Hebelgesetz", "topics": ["Kraft", "Drehmoment"], "route": "/mechanik/t1" },
                    { "id": "t2", "title": "Kräfte", "topics": [], "route": "/mechanik/t2" },
                ]
            }
        ]
    })
    .to_string()
}

/// Helper to build an additions document with one duplicate and one new tile
fn additions_document() -> String {
    json!({
        "mechanik": [
            { "id": "t1", "title": "Hebelgesetz (neu)", "topics": [], "route": "/mechanik/t1" },
            { "id": "t3", "title": "Dynamik", "topics": [], "route": "/mechanik/t3",
              "level": "Sek II", "stage": "EF", "course": "EF" },
        ]
    })
    .to_string()
}

// ============================================================================
// Merge Semantics
// ============================================================================

#[test]
fn test_merge_deduplicates_and_appends() {
    let store = CatalogStore::new(base_document(), additions_document());
    let mechanik = store.category("mechanik").unwrap().unwrap();

    let titles: Vec<&str> = mechanik.tiles.iter().map(|t| t.title.as_str()).collect();
    // Base wins the duplicate id, the new tile is appended after base order.
    assert_eq!(titles, ["Hebelgesetz", "Kräfte", "Dynamik"]);
}

#[test]
fn test_merge_failure_is_sticky_across_accessors() {
    let broken_additions = json!({
        "mechanik": [ { "id": "kaputt", "title": "Kaputt" } ]
    })
    .to_string();
    let store = CatalogStore::new(base_document(), broken_additions);

    let first = store.categories().unwrap_err();
    let second = store.app_meta().unwrap_err();
    let third = store.tile("mechanik", "t1").unwrap_err();

    assert_eq!(first.to_string(), second.to_string());
    assert_eq!(first.to_string(), third.to_string());
    assert!(first.path.starts_with("/mechanik/0"));
}

#[test]
fn test_accessors_are_idempotent_after_success() {
    let store = CatalogStore::new(base_document(), additions_document());

    let first = store.all_tiles().unwrap();
    let second = store.all_tiles().unwrap();

    let ids = |tiles: &[lehrplan::core::CategorizedTile<'_>]| -> Vec<String> {
        tiles
            .iter()
            .map(|t| format!("{}/{}", t.category_id, t.tile.id))
            .collect()
    };
    assert_eq!(ids(&first), ids(&second));
}

// ============================================================================
// Bundled Documents
// ============================================================================

#[test]
fn test_bundled_catalog_structure() {
    let store = CatalogStore::bundled();

    let meta = store.app_meta().unwrap();
    assert_eq!(meta.title, "Physik Lehrplan");

    let ids: Vec<&str> = store
        .categories()
        .unwrap()
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(ids, ["mechanik", "optik", "elektrizitaetslehre"]);

    // Base tiles precede the merged Sek II additions.
    let mechanik = store.category("mechanik").unwrap().unwrap();
    let tile_ids: Vec<&str> = mechanik.tiles.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(
        tile_ids,
        [
            "geschwindigkeit",
            "kraefte",
            "hebelgesetz",
            "newtonsche-dynamik",
            "gravitation",
        ]
    );
}

#[test]
fn test_bundled_tile_lookup() {
    let store = CatalogStore::bundled();

    let tile = store.tile("optik", "wellenoptik").unwrap().unwrap();
    assert_eq!(tile.level, Some(Level::SekII));

    assert!(store.tile("optik", "nicht-da").unwrap().is_none());
    assert!(store.tile("akustik", "wellenoptik").unwrap().is_none());
}

#[test]
fn test_bundled_metadata_generations_are_normalized() {
    let store = CatalogStore::bundled();

    // Base document carries legacy-shape metadata.
    let hebelgesetz = store.tile("mechanik", "hebelgesetz").unwrap().unwrap();
    assert_eq!(
        hebelgesetz.kompetenzen[0].bereich,
        "Fakten wiedergeben und erläutern"
    );

    let geschwindigkeit = store.tile("mechanik", "geschwindigkeit").unwrap().unwrap();
    assert_eq!(
        geschwindigkeit.inhaltsfelder[0].title,
        "Bewegung und ihre Ursachen"
    );
    assert!(geschwindigkeit.inhaltsfelder[0].code.is_none());

    // Additions carry current-shape metadata.
    let dynamik = store.tile("mechanik", "newtonsche-dynamik").unwrap().unwrap();
    assert_eq!(dynamik.inhaltsfelder[0].code.as_deref(), Some("IF1"));
    assert_eq!(dynamik.kompetenzen[0].bereich, "Umgang mit Fachwissen");
}

#[test]
fn test_bundled_experiments_survive_validation() {
    let store = CatalogStore::bundled();
    let tile = store.tile("mechanik", "geschwindigkeit").unwrap().unwrap();

    let phyphox = tile.experiments[0].phyphox.as_ref().unwrap();
    assert_eq!(phyphox.sensors, vec!["GPS"]);
}

// ============================================================================
// Filtering Over The Catalog
// ============================================================================

#[test]
fn test_search_across_all_tiles() {
    let store = CatalogStore::bundled();
    let all = store.all_tiles().unwrap();

    let hits = filter_tiles(
        all.iter().map(|t| t.tile),
        &FilterCriteria::search("drehmoment"),
    );
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "hebelgesetz");
}

#[test]
fn test_level_filter_splits_bundled_catalog() {
    let store = CatalogStore::bundled();
    let all = store.all_tiles().unwrap();

    let sek_two = filter_tiles(
        all.iter().map(|t| t.tile),
        &FilterCriteria {
            selected_levels: vec![Level::SekII],
            ..Default::default()
        },
    );
    assert_eq!(sek_two.len(), 4);
    assert!(sek_two.iter().all(|t| t.grade.is_none()));

    let sek_one = filter_tiles(
        all.iter().map(|t| t.tile),
        &FilterCriteria {
            selected_levels: vec![Level::SekI],
            ..Default::default()
        },
    );
    assert_eq!(sek_one.len() + sek_two.len(), all.len());
}

#[test]
fn test_grade_pass_through_keeps_sek_two_tiles() {
    let store = CatalogStore::bundled();
    let all = store.all_tiles().unwrap();

    let hits = filter_tiles(
        all.iter().map(|t| t.tile),
        &FilterCriteria {
            selected_grades: vec![7],
            ..Default::default()
        },
    );

    // Grade 7 tiles plus every tile without a grade value.
    assert!(hits.iter().any(|t| t.id == "kraefte"));
    assert!(hits.iter().any(|t| t.id == "wellenoptik"));
    assert!(!hits.iter().any(|t| t.id == "geschwindigkeit"));
}

#[test]
fn test_unique_grades_over_bundled_catalog() {
    let store = CatalogStore::bundled();
    let all = store.all_tiles().unwrap();

    assert_eq!(unique_grades(all.iter().map(|t| t.tile)), vec![6, 7, 8, 10]);
}
