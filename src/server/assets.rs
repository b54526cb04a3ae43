//! Bundled static assets (slideshow UI, info page, script and stylesheet).
//!
//! Everything under the crate's `static/` directory is compiled into the
//! binary and looked up by its exact path, keyed with the `static/` prefix
//! (e.g. `static/app.js`). There is no directory listing.

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

/// Embedded contents of `static/`.
#[derive(RustEmbed)]
#[folder = "static/"]
#[prefix = "static/"]
pub struct StaticAssets;

/// The slideshow document served at `/`.
pub const INDEX_DOCUMENT: &str = "static/index.html";

/// The usage document served at `/info`.
pub const INFO_DOCUMENT: &str = "static/info.html";

/// Cache policy for assets other than the two documents.
const ASSET_CACHE_CONTROL: &str = "public, max-age=86400";

/// Build a response for an embedded asset, or `None` if no such asset exists
/// (including any path not starting with `static/`).
pub fn embedded_response(path: &str) -> Option<Response> {
    if !path.starts_with("static/") || path.split('/').any(|segment| segment == "..") {
        return None;
    }
    let asset = StaticAssets::get(path)?;

    let cache_control = if path == INDEX_DOCUMENT || path == INFO_DOCUMENT {
        "no-store"
    } else {
        ASSET_CACHE_CONTROL
    };

    Some(
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, content_type_for(path)),
                (header::CACHE_CONTROL, HeaderValue::from_static(cache_control)),
            ],
            Body::from(asset.data),
        )
            .into_response(),
    )
}

/// Content type from the file extension; text types are marked UTF-8.
fn content_type_for(path: &str) -> HeaderValue {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let value = if mime.type_().as_str() == "text" || mime.subtype().as_str() == "javascript" {
        format!("{}; charset=utf-8", mime.essence_str())
    } else {
        mime.essence_str().to_string()
    };

    HeaderValue::from_str(&value)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"))
}
