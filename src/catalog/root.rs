//! Root catalog document

use serde::{Deserialize, Serialize};

use crate::catalog::category::Category;

/// Application metadata carried by the root document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppMeta {
    /// Display title of the application
    pub title: String,

    /// Document version
    pub version: f64,
}

/// The full catalog: application metadata plus all categories
///
/// A catalog is only ever obtained through validation and merging; see
/// [`crate::core::store::CatalogStore`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Application metadata
    pub app: AppMeta,

    /// Categories in document order
    pub categories: Vec<Category>,
}

impl Catalog {
    /// Total number of tiles across all categories
    pub fn tile_count(&self) -> usize {
        self.categories.iter().map(|c| c.tiles.len()).sum()
    }
}
