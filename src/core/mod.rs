//! Core module - catalog construction and queries

pub mod filter;
pub mod merge;
pub mod store;

pub use filter::{filter_tiles, unique_grades, FilterCriteria};
pub use merge::AdditionsDocument;
pub use store::{CatalogStore, CategorizedTile};
