//! Lehrplan-Katalog
//!
//! A validated, merged catalog of physics curriculum units. The base
//! catalog document and the Sek II additions document are bundled into the
//! binary, checked against their schema contract on first access and
//! merged into one immutable catalog that presentation layers query
//! through [`crate::core::CatalogStore`] and [`crate::core::filter_tiles`].

pub mod catalog;
pub mod core;
pub mod schema;
