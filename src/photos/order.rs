//! Listing order for `/api/photos`.

use std::cmp::Ordering;

use super::PhotoEntry;

/// Sort key requested through the `order` query parameter.
///
/// Unknown or missing values fall back to [`SortOrder::MtimeDesc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Newest first
    #[default]
    MtimeDesc,

    /// Oldest first
    MtimeAsc,

    /// Case-insensitive name, A to Z
    NameAsc,

    /// Case-insensitive name, Z to A
    NameDesc,
}

impl SortOrder {
    /// Parse a query value, falling back to the default for anything
    /// unrecognised.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("mtime_asc") => SortOrder::MtimeAsc,
            Some("name_asc") => SortOrder::NameAsc,
            Some("name_desc") => SortOrder::NameDesc,
            _ => SortOrder::MtimeDesc,
        }
    }

    /// The query value for this order.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::MtimeDesc => "mtime_desc",
            SortOrder::MtimeAsc => "mtime_asc",
            SortOrder::NameAsc => "name_asc",
            SortOrder::NameDesc => "name_desc",
        }
    }

    /// Sort photos in place. The sort is stable, so ties keep their scan order.
    pub fn sort(&self, photos: &mut [PhotoEntry]) {
        match self {
            SortOrder::MtimeDesc => photos.sort_by(|a, b| b.mtime.cmp(&a.mtime)),
            SortOrder::MtimeAsc => photos.sort_by(|a, b| a.mtime.cmp(&b.mtime)),
            SortOrder::NameAsc => photos.sort_by(compare_names),
            SortOrder::NameDesc => photos.sort_by(|a, b| compare_names(b, a)),
        }
    }
}

fn compare_names(a: &PhotoEntry, b: &PhotoEntry) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}
