//! Photo directory scanner.
//!
//! A scan is a single synchronous pass over the directory: list, filter by
//! extension, sanitize, stat. It is cheap enough to run on every listing
//! request, so nothing is cached.

use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use super::path::resolve_in_base;
use super::{is_allowed_extension, PhotoEntry};
use crate::error::ScanError;

/// List the allowed image files directly inside `dir`.
///
/// Subdirectories, files with other extensions and names that are not valid
/// UTF-8 are skipped. Entries that disappear (or turn into directories)
/// between the listing and the stat are treated as absent.
///
/// Entries are returned in directory order; use [`super::SortOrder`] to sort
/// them.
///
/// # Errors
///
/// Returns [`ScanError::ReadDir`] only when the directory itself cannot be
/// listed (missing, not a directory, permission denied).
pub fn scan_photos(dir: &Path) -> Result<Vec<PhotoEntry>, ScanError> {
    let read_dir = fs::read_dir(dir).map_err(|source| ScanError::ReadDir {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut photos = Vec::new();
    for entry in read_dir {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(dir = %dir.display(), "Skipping unreadable directory entry: {}", e);
                continue;
            }
        };

        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            debug!(name = ?file_name, "Skipping non UTF-8 file name");
            continue;
        };

        if !is_allowed_extension(name) {
            continue;
        }

        let Ok(full_path) = resolve_in_base(dir, name) else {
            continue;
        };

        // Follows symlinks, so a link to an image is listed like the image.
        let metadata = match fs::metadata(&full_path) {
            Ok(metadata) if !metadata.is_dir() => metadata,
            Ok(_) => continue,
            Err(e) => {
                debug!(name, "File vanished during scan: {}", e);
                continue;
            }
        };

        let mtime = metadata.modified().map(unix_seconds).unwrap_or(0);

        photos.push(PhotoEntry {
            url: photo_url(name, mtime),
            name: name.to_string(),
            mtime,
            size: metadata.len() as i64,
        });
    }

    Ok(photos)
}

/// Build the URL the slideshow uses to fetch a photo.
///
/// The name is percent-encoded and the modification time is appended as a
/// `v` parameter, so the URL changes whenever the file does.
pub fn photo_url(name: &str, mtime: i64) -> String {
    format!("/photos/{}?v={}", urlencoding::encode(name), mtime)
}

/// Convert a timestamp to whole Unix seconds, rounding toward negative
/// infinity for pre-epoch times.
fn unix_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => after.as_secs() as i64,
        Err(e) => {
            let before = e.duration();
            let secs = before.as_secs() as i64;
            if before.subsec_nanos() > 0 {
                -secs - 1
            } else {
                -secs
            }
        }
    }
}
