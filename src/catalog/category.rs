//! Category entity type

use serde::{Deserialize, Serialize};

use crate::catalog::tile::Tile;

/// A top-level grouping of tiles (one physics subject area)
///
/// The identifier is unique across the catalog; a category exclusively owns
/// its tiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier (e.g. "mechanik")
    pub id: String,

    /// Display title
    pub title: String,

    /// Route the presentation layer navigates to
    pub route: String,

    /// Tiles in document order
    pub tiles: Vec<Tile>,
}

impl Category {
    /// Find a tile by identifier
    pub fn tile(&self, tile_id: &str) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.id == tile_id)
    }
}
