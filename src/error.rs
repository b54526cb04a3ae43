use std::path::PathBuf;

use thiserror::Error;

/// Errors detected while validating configuration at startup.
///
/// These are fatal: the binary logs them and exits with a non-zero status.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The photos directory setting is empty
    #[error("Photos directory is required. Set --photos-dir or PHOTOS_DIR")]
    EmptyPhotosDir,

    /// The photos directory could not be turned into an absolute path
    #[error("Failed to resolve photos directory {path}: {source}")]
    PhotosDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Header read timeout must be positive
    #[error("header_read_timeout must be greater than 0")]
    ZeroHeaderTimeout,
}

/// Rejections produced by the path sanitizer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Name is empty once directory components are stripped
    #[error("Empty file name")]
    Empty,

    /// Name resolves outside the base directory
    #[error("Path escapes base directory: {0}")]
    EscapesBase(String),
}

/// Errors that can occur when scanning the photos directory.
///
/// Only the top-level listing can fail; files that vanish between listing
/// and stat are skipped rather than reported.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The directory listing itself could not be read
    #[error("Failed to read photos directory {dir}: {source}")]
    ReadDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
