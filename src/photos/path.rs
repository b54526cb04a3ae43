//! Path sanitizer for photo file names.
//!
//! File names arrive from URLs and directory listings alike. Before anything
//! touches the filesystem the name is reduced to its final segment and joined
//! onto the photos directory, and the result must be a direct child of that
//! directory.

use std::path::{Component, Path, PathBuf};

use crate::error::PathError;

/// Resolve `name` to an absolute path directly inside `base`.
///
/// Any directory components in `name` are stripped first (both `/` and `\`
/// count as separators), so `../../etc/passwd` resolves to `base/passwd`.
/// The joined path is then normalised lexically and checked to be exactly one
/// level below `base`.
///
/// `base` is expected to be absolute. The filesystem is never consulted.
///
/// # Errors
///
/// - [`PathError::Empty`] if nothing remains after stripping directories
/// - [`PathError::EscapesBase`] if the result is not a direct child of `base`
///   (e.g. the name was `..` or `.`)
pub fn resolve_in_base(base: &Path, name: &str) -> Result<PathBuf, PathError> {
    let segment = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or("");
    if segment.is_empty() {
        return Err(PathError::Empty);
    }

    let base = normalize(base);
    let joined = normalize(&base.join(segment));

    let rel = joined
        .strip_prefix(&base)
        .map_err(|_| PathError::EscapesBase(name.to_string()))?;

    let mut components = rel.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(joined),
        _ => Err(PathError::EscapesBase(name.to_string())),
    }
}

/// Lexically normalise a path: drop `.` and fold `..` into its parent.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Popping past the root is a no-op, like the OS does.
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
