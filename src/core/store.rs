//! Cached catalog store
//!
//! A store validates and merges its two documents exactly once, on first
//! access, and memoizes the outcome. A failed construction is memoized the
//! same way and re-signaled unchanged by every later call. The store over
//! the embedded documents is a process-wide singleton.

use once_cell::sync::{Lazy, OnceCell};
use rust_embed::Embed;
use serde::Serialize;
use std::borrow::Cow;
use tracing::{debug, warn};

use crate::catalog::{AppMeta, Catalog, Category, Tile};
use crate::core::merge::{self, AdditionsDocument};
use crate::schema::{ValidationFailure, Validator};

const BASE_DOCUMENT: &str = "structure.json";
const ADDITIONS_DOCUMENT: &str = "sekII_additions.json";

#[derive(Embed)]
#[folder = "data/"]
struct BundledDocuments;

static BUNDLED: Lazy<CatalogStore> =
    Lazy::new(|| CatalogStore::new(embedded(BASE_DOCUMENT), embedded(ADDITIONS_DOCUMENT)));

fn embedded(name: &str) -> Cow<'static, str> {
    match BundledDocuments::get(name) {
        Some(file) => match file.data {
            Cow::Borrowed(bytes) => String::from_utf8_lossy(bytes),
            Cow::Owned(bytes) => Cow::Owned(String::from_utf8_lossy(&bytes).into_owned()),
        },
        None => {
            warn!(document = name, "bundled document missing from build");
            Cow::Borrowed("")
        }
    }
}

/// A tile annotated with its owning category's identifier
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CategorizedTile<'a> {
    pub category_id: &'a str,
    pub tile: &'a Tile,
}

/// Lazily constructed, write-once catalog over a pair of documents
///
/// Construction is idempotent under concurrent callers; the first one to
/// arrive builds, everyone else reuses the memoized result.
pub struct CatalogStore {
    base: Cow<'static, str>,
    additions: Cow<'static, str>,
    cell: OnceCell<Result<Catalog, ValidationFailure>>,
}

impl CatalogStore {
    /// Create a store over explicit documents
    ///
    /// This is the seam for tests and alternative document sources; normal
    /// consumers use [`CatalogStore::bundled`].
    pub fn new(
        base: impl Into<Cow<'static, str>>,
        additions: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            base: base.into(),
            additions: additions.into(),
            cell: OnceCell::new(),
        }
    }

    /// The process-wide store over the embedded documents
    pub fn bundled() -> &'static CatalogStore {
        &BUNDLED
    }

    /// The validated, merged catalog
    ///
    /// Built on first call; later calls return the memoized result, a
    /// failure included - there is no retry path.
    pub fn catalog(&self) -> Result<&Catalog, ValidationFailure> {
        self.cell
            .get_or_init(|| {
                let result = self.build();
                if let Err(failure) = &result {
                    warn!(%failure, "catalog construction failed");
                }
                result
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    fn build(&self) -> Result<Catalog, ValidationFailure> {
        let validator = Validator::new()?;
        let base = validator.parse_catalog(&self.base, BASE_DOCUMENT)?;
        let additions = AdditionsDocument::parse(&self.additions, ADDITIONS_DOCUMENT)?;
        let catalog = merge::merge(base, &additions, &validator, ADDITIONS_DOCUMENT)?;
        debug!(
            categories = catalog.categories.len(),
            tiles = catalog.tile_count(),
            "catalog constructed"
        );
        Ok(catalog)
    }

    /// All categories, merged order
    pub fn categories(&self) -> Result<&[Category], ValidationFailure> {
        Ok(&self.catalog()?.categories)
    }

    /// Look up a category by identifier
    pub fn category(&self, id: &str) -> Result<Option<&Category>, ValidationFailure> {
        Ok(self.catalog()?.categories.iter().find(|c| c.id == id))
    }

    /// Look up a tile inside a category; an absent category is also `None`
    pub fn tile(
        &self,
        category_id: &str,
        tile_id: &str,
    ) -> Result<Option<&Tile>, ValidationFailure> {
        Ok(self
            .category(category_id)?
            .and_then(|category| category.tile(tile_id)))
    }

    /// Every tile across every category, annotated with its owner
    ///
    /// Order is category order, then intra-category tile order.
    pub fn all_tiles(&self) -> Result<Vec<CategorizedTile<'_>>, ValidationFailure> {
        let catalog = self.catalog()?;
        Ok(catalog
            .categories
            .iter()
            .flat_map(|category| {
                category.tiles.iter().map(move |tile| CategorizedTile {
                    category_id: category.id.as_str(),
                    tile,
                })
            })
            .collect())
    }

    /// Application metadata
    pub fn app_meta(&self) -> Result<&AppMeta, ValidationFailure> {
        Ok(&self.catalog()?.app)
    }
}
