//! Catalog data model
//!
//! The catalog is a tree of three levels:
//!
//! - [`Catalog`] - the root document with application metadata
//! - [`Category`] - a subject area (e.g. Mechanik) owning its tiles
//! - [`Tile`] - one curriculum unit with classification tags and
//!   curriculum metadata (Inhaltsfelder, Kompetenzen, Vereinbarungen)
//!
//! Curriculum metadata exists in two historical document generations; both
//! are accepted on deserialization and normalized into the single in-memory
//! shape defined here.

pub mod category;
pub mod root;
pub mod tile;

pub use category::Category;
pub use root::{AppMeta, Catalog};
pub use tile::{
    Course, Difficulty, Experiment, ExperimentType, Inhaltsfeld, Kompetenz, Level,
    PhyphoxExperiment, Stage, Tile, Vereinbarungen,
};
