//! Photo directory layer.
//!
//! The photos directory listing is the whole data model: nothing is cached or
//! persisted, every listing request walks the directory again.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              HTTP Handlers              │
//! └──────────┬─────────────────────┬────────┘
//!            │                     │
//!            ▼                     ▼
//! ┌─────────────────────┐   ┌─────────────┐
//! │   scan_photos()     │──▶│  SortOrder  │
//! │ (list, filter, stat)│   │   (sort)    │
//! └──────────┬──────────┘   └─────────────┘
//!            │
//!            ▼
//! ┌─────────────────────────────────────────┐
//! │   resolve_in_base() (path sanitizer)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`resolve_in_base`]: Resolves a file name to a direct child of the photos directory
//! - [`scan_photos`]: Lists allowed image files with their size and modification time
//! - [`SortOrder`]: The four listing orders accepted by `/api/photos`
//! - [`PhotoEntry`] / [`PhotoListing`]: The JSON shapes returned to the slideshow

mod order;
mod path;
mod scanner;

pub use order::SortOrder;
pub use path::resolve_in_base;
pub use scanner::{photo_url, scan_photos};

use serde::{Deserialize, Serialize};

/// File extensions (lowercase, without the dot) treated as images.
///
/// Anything else is invisible to the listing and refused by the photo route.
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// Check whether a file name carries an allowed image extension.
///
/// The comparison is case-insensitive; names without an extension (including
/// dotfiles such as `.jpg`) are rejected.
pub fn is_allowed_extension(name: &str) -> bool {
    std::path::Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// A single image file in the photos directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoEntry {
    /// Relative URL of the image, with a `v=<mtime>` cache-bust parameter
    pub url: String,

    /// File name inside the photos directory
    pub name: String,

    /// Modification time in Unix seconds
    pub mtime: i64,

    /// File size in bytes
    pub size: i64,
}

/// Response body of `GET /api/photos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoListing {
    /// Photos in the requested order
    pub photos: Vec<PhotoEntry>,

    /// Number of photos
    pub count: usize,
}

impl PhotoListing {
    /// Build a listing from already-ordered entries.
    pub fn new(photos: Vec<PhotoEntry>) -> Self {
        let count = photos.len();
        Self { photos, count }
    }
}
