//! HTTP request handlers for Frameserve.
//!
//! # Endpoints
//!
//! - `GET /` - Slideshow UI
//! - `GET /info` - Usage page
//! - `GET /static/{path}` - Bundled script, stylesheet and documents
//! - `GET /api/photos` - JSON listing of the photos directory
//! - `GET|HEAD /photos/{name}` - Raw image bytes
//! - `GET /healthz` - Health check

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{rejection::PathRejection, Path, RawQuery, Request, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::{debug, error, warn};
use url::form_urlencoded;

use crate::error::ScanError;
use crate::photos::{
    is_allowed_extension, resolve_in_base, scan_photos, PhotoListing, SortOrder,
};

use super::assets::{embedded_response, INDEX_DOCUMENT, INFO_DOCUMENT};

/// Cache policy for image bytes. Safe because the listing URL changes with
/// the file's mtime.
pub const PHOTO_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state.
///
/// Built once at startup and read-only afterwards.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Absolute path of the photos directory
    pub photos_dir: Arc<PathBuf>,
}

impl AppState {
    /// Create application state for an (absolute) photos directory.
    pub fn new(photos_dir: impl Into<PathBuf>) -> Self {
        Self {
            photos_dir: Arc::new(photos_dir.into()),
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Query parameters for the photos listing.
///
/// Parsed leniently: when a parameter repeats, the first value wins, and
/// nothing in the query string can make the request fail.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PhotosQueryParams {
    /// `mtime_desc` (default), `mtime_asc`, `name_asc` or `name_desc`
    pub order: Option<String>,
}

impl PhotosQueryParams {
    /// Extract the listing parameters from a raw query string.
    pub fn from_query(query: Option<&str>) -> Self {
        let order = query.and_then(|query| {
            form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| &**key == "order")
                .map(|(_, value)| value.into_owned())
        });

        Self { order }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "not_found", "scan_failed")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code (included for convenience)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorResponse {
    /// Create a new error response with status code.
    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: Some(status.as_u16()),
        }
    }
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Errors returned by handlers.
///
/// Everything that could reveal the shape of the filesystem (traversal
/// attempts, wrong extensions, missing files, directories) collapses into
/// [`ApiError::NotFound`].
#[derive(Debug)]
pub enum ApiError {
    /// Unknown route, asset or photo
    NotFound,

    /// The photos directory could not be listed
    Scan(ScanError),

    /// Unexpected failure (e.g. a panicked blocking task)
    Internal(String),
}

impl From<ScanError> for ApiError {
    fn from(err: ScanError) -> Self {
        ApiError::Scan(err)
    }
}

/// Convert ApiError to HTTP response.
///
/// Details of server-side failures are logged, never sent to the client.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "not_found", "Not found"),
            ApiError::Scan(err) => {
                error!(error_type = "scan_failed", "Scan error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "scan_failed",
                    "Failed to scan photos directory",
                )
            }
            ApiError::Internal(detail) => {
                error!(error_type = "internal", "Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error",
                )
            }
        };

        if status == StatusCode::NOT_FOUND {
            debug!(
                error_type = error_type,
                status = status.as_u16(),
                "Resource not found"
            );
        }

        let error_response = ErrorResponse::with_status(error_type, message, status);
        (status, Json(error_response)).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Serve the slideshow UI.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler() -> Result<Response, ApiError> {
    embedded_response(INDEX_DOCUMENT).ok_or(ApiError::NotFound)
}

/// Serve the usage page.
///
/// # Endpoint
///
/// `GET /info`
pub async fn info_handler() -> Result<Response, ApiError> {
    embedded_response(INFO_DOCUMENT).ok_or(ApiError::NotFound)
}

/// Serve a bundled asset by its exact path.
///
/// # Endpoint
///
/// `GET /static/{path}`
pub async fn static_handler(path: Result<Path<String>, PathRejection>) -> Result<Response, ApiError> {
    let Path(path) = path.map_err(|_| ApiError::NotFound)?;
    embedded_response(&format!("static/{}", path)).ok_or(ApiError::NotFound)
}

/// List the photos directory.
///
/// # Endpoint
///
/// `GET /api/photos`
///
/// # Query Parameters
///
/// - `order`: `mtime_desc` (default), `mtime_asc`, `name_asc`, `name_desc`;
///   anything else behaves like the default, and only the first `order`
///   counts
///
/// # Response
///
/// `200 OK` with `Cache-Control: no-store` and JSON body:
/// ```json
/// {
///   "photos": [
///     { "url": "/photos/b.png?v=200", "name": "b.png", "mtime": 200, "size": 5120 },
///     { "url": "/photos/a.jpg?v=100", "name": "a.jpg", "mtime": 100, "size": 2048 }
///   ],
///   "count": 2
/// }
/// ```
///
/// # Errors
///
/// - `500 Internal Server Error`: The directory could not be read
pub async fn photos_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    let query = PhotosQueryParams::from_query(query.as_deref());
    let order = SortOrder::parse(query.order.as_deref());

    let dir = Arc::clone(&state.photos_dir);
    let mut photos = tokio::task::spawn_blocking(move || scan_photos(&dir))
        .await
        .map_err(|e| ApiError::Internal(format!("scan task failed: {}", e)))??;

    order.sort(&mut photos);
    debug!(count = photos.len(), order = order.as_str(), "Listed photos");

    Ok((
        [(header::CACHE_CONTROL, "no-store")],
        Json(PhotoListing::new(photos)),
    )
        .into_response())
}

/// Serve the bytes of a single photo.
///
/// # Endpoint
///
/// `GET|HEAD /photos/{name}`
///
/// The name must be a bare file name with an allowed extension that resolves
/// to a regular file directly inside the photos directory. Range and
/// conditional requests are honoured.
///
/// # Headers
///
/// - `Content-Type`: guessed from the extension
/// - `Cache-Control: public, max-age=31536000, immutable`
///
/// # Errors
///
/// - `404 Not Found`: Bad name, wrong extension, missing file, or a directory
pub async fn photo_handler(
    State(state): State<AppState>,
    name: Result<Path<String>, PathRejection>,
    request: Request,
) -> Result<Response, ApiError> {
    let Path(name) = name.map_err(|_| ApiError::NotFound)?;

    // Bare file names only; no subdirectories.
    if name.is_empty() || name.contains('/') || name.contains('\\') {
        return Err(ApiError::NotFound);
    }

    if !is_allowed_extension(&name) {
        return Err(ApiError::NotFound);
    }

    let full_path = resolve_in_base(&state.photos_dir, &name).map_err(|e| {
        warn!(name = %name, "Rejected photo path: {}", e);
        ApiError::NotFound
    })?;

    match tokio::fs::metadata(&full_path).await {
        Ok(metadata) if !metadata.is_dir() => {}
        _ => return Err(ApiError::NotFound),
    }

    let response = match ServeFile::new(&full_path).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };

    let mut response = response.map(Body::new);
    let status = response.status();
    if status.is_success() || status == StatusCode::NOT_MODIFIED {
        response.headers_mut().insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(PHOTO_CACHE_CONTROL),
        );
    }

    Ok(response)
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /healthz`
///
/// # Response
///
/// `200 OK` with the plain-text body `ok`.
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "ok",
    )
}

/// Fallback for unmatched paths.
pub async fn not_found_handler() -> ApiError {
    ApiError::NotFound
}

// =============================================================================
// Tests
// =============================================================================
