//! # Frameserve
//!
//! A self-hosted slideshow server for a single directory of photos.
//!
//! Point it at a directory, open it on a tablet or an old laptop, and it
//! becomes a digital photo frame. New files show up on the next refresh
//! without restarting anything.
//!
//! ## Features
//!
//! - **Flat directory**: jpg, jpeg, png, webp and gif files directly inside
//!   one directory, no database and no thumbnails
//! - **Cache-friendly URLs**: photo URLs carry the file's mtime, so browsers
//!   may cache them forever
//! - **Shared-token gate**: optional token exchanged once for a long-lived
//!   cookie, or sent as a bearer token
//! - **Self-contained UI**: slideshow page, script and stylesheet are compiled
//!   into the binary
//!
//! ## Architecture
//!
//! - [`photos`] - Directory scanning, ordering and path sanitisation
//! - [`server`] - Axum-based HTTP server, auth gate and routes
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use frameserve::{create_router, RouterConfig};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let router = create_router(
//!         "/srv/photos".into(),
//!         RouterConfig::new(Some("family-frame".to_string())),
//!     );
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//!     axum::serve(listener, router).await
//! }
//! ```

pub mod config;
pub mod error;
pub mod photos;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use error::{ConfigError, PathError, ScanError};
pub use photos::{
    is_allowed_extension, photo_url, resolve_in_base, scan_photos, PhotoEntry, PhotoListing,
    SortOrder, ALLOWED_EXTENSIONS,
};
pub use server::{create_router, serve, shutdown_signal, AppState, RouterConfig};
