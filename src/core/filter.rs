//! Filter engine - pure tile filtering
//!
//! All active criteria combine with logical AND; the output keeps the
//! input order. Filtering never consults the store, it operates on
//! whatever tile sequence the caller hands in.

use crate::catalog::{Course, Level, Tile};

/// Criteria for [`filter_tiles`]
///
/// Empty fields deactivate their filter.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Case-insensitive substring match against title, subtitle,
    /// description and topics
    pub search_query: String,

    /// Accepted grade numbers; tiles without a grade always pass
    pub selected_grades: Vec<u8>,

    /// Accepted levels; tiles without an explicit level fall back to the
    /// classification code
    pub selected_levels: Vec<Level>,

    /// Accepted course tags; tiles without a course are excluded while
    /// this filter is active
    pub selected_courses: Vec<Course>,
}

impl FilterCriteria {
    /// A criteria set with only a free-text query
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            search_query: query.into(),
            ..Self::default()
        }
    }
}

/// Filter tiles by the given criteria, preserving input order
pub fn filter_tiles<'a, I>(tiles: I, criteria: &FilterCriteria) -> Vec<&'a Tile>
where
    I: IntoIterator<Item = &'a Tile>,
{
    tiles
        .into_iter()
        .filter(|tile| matches(tile, criteria))
        .collect()
}

fn matches(tile: &Tile, criteria: &FilterCriteria) -> bool {
    if !criteria.search_query.is_empty() {
        let query = criteria.search_query.to_lowercase();
        let text_hit = tile.title.to_lowercase().contains(&query)
            || tile
                .subtitle
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(&query))
            || tile
                .description
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(&query))
            || tile
                .topics
                .iter()
                .any(|topic| topic.to_lowercase().contains(&query));
        if !text_hit {
            return false;
        }
    }

    if !criteria.selected_grades.is_empty() {
        // Tiles without a grade pass through untouched.
        if let Some(grade) = tile.grade {
            if !criteria.selected_grades.contains(&grade) {
                return false;
            }
        }
    }

    if !criteria.selected_levels.is_empty() {
        let level = tile
            .level
            .or_else(|| tile.code.as_deref().map(infer_level));
        match level {
            Some(level) if criteria.selected_levels.contains(&level) => {}
            _ => return false,
        }
    }

    if !criteria.selected_courses.is_empty() {
        match tile.course {
            Some(course) if criteria.selected_courses.contains(&course) => {}
            _ => return false,
        }
    }

    true
}

/// Infer the schooling stage from a classification code
///
/// Codes 6.x through 10.x are Sekundarstufe I, everything else counts as
/// Sekundarstufe II.
pub fn infer_level(code: &str) -> Level {
    let sek_one = code.starts_with("10.")
        || code
            .strip_prefix(['6', '7', '8', '9'])
            .is_some_and(|rest| rest.starts_with('.'));
    if sek_one {
        Level::SekI
    } else {
        Level::SekII
    }
}

/// Sorted, deduplicated list of the grades present in `tiles`
pub fn unique_grades<'a, I>(tiles: I) -> Vec<u8>
where
    I: IntoIterator<Item = &'a Tile>,
{
    let mut grades: Vec<u8> = tiles.into_iter().filter_map(|tile| tile.grade).collect();
    grades.sort_unstable();
    grades.dedup();
    grades
}
