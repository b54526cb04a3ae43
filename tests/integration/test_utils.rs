//! Test utilities for integration tests.
//!
//! This module provides a temporary photos directory with controllable file
//! contents and modification times, plus helpers for building requests and
//! reading responses.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, UNIX_EPOCH};

use axum::body::{Body, Bytes};
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;

use frameserve::{create_router, RouterConfig};

/// Token used by the auth tests.
pub const TEST_TOKEN: &str = "test-shared-token";

// =============================================================================
// Photo Directory Fixture
// =============================================================================

/// A temporary photos directory, removed on drop.
pub struct PhotoDir {
    dir: TempDir,
}

impl PhotoDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Add a file with the given contents and mtime (unix seconds).
    pub fn with_file(self, name: &str, contents: &[u8], mtime: u64) -> Self {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).unwrap();
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(UNIX_EPOCH + Duration::from_secs(mtime))
            .unwrap();
        self
    }

    /// Add a subdirectory.
    pub fn with_dir(self, name: &str) -> Self {
        fs::create_dir(self.dir.path().join(name)).unwrap();
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Router with auth and tracing disabled.
    pub fn router(&self) -> Router {
        create_router(
            self.path().to_path_buf(),
            RouterConfig::without_auth().with_tracing(false),
        )
    }

    /// Router gated by [`TEST_TOKEN`].
    pub fn router_with_token(&self) -> Router {
        create_router(
            self.path().to_path_buf(),
            RouterConfig::new(Some(TEST_TOKEN.to_string())).with_tracing(false),
        )
    }
}

/// The `a.jpg` / `b.png` / `c.txt` fixture used throughout.
pub fn sample_photos() -> PhotoDir {
    PhotoDir::new()
        .with_file("a.jpg", b"jpeg-bytes", 100)
        .with_file("b.png", b"png", 200)
        .with_file("c.txt", b"not a photo", 300)
}

/// A path that does not exist.
pub fn missing_dir() -> (TempDir, PathBuf) {
    let parent = TempDir::new().unwrap();
    let path = parent.path().join("not-there");
    (parent, path)
}

// =============================================================================
// Request / Response Helpers
// =============================================================================

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn get_with_header(uri: &str, name: &str, value: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(name, value)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_bytes(response: Response) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_string(response: Response) -> String {
    String::from_utf8(body_bytes(response).await.to_vec()).unwrap()
}

/// Value of a response header as a string, panicking if absent.
pub fn header<'a>(response: &'a Response, name: &str) -> &'a str {
    response
        .headers()
        .get(name)
        .unwrap_or_else(|| panic!("missing header {}", name))
        .to_str()
        .unwrap()
}

/// Assert that the fixed security header set is present.
pub fn assert_security_headers(response: &Response) {
    assert_eq!(header(response, "x-content-type-options"), "nosniff");
    assert_eq!(header(response, "x-frame-options"), "DENY");
    assert_eq!(header(response, "referrer-policy"), "no-referrer");
    assert_eq!(
        header(response, "permissions-policy"),
        "geolocation=(), microphone=(), camera=()"
    );
    assert_eq!(
        header(response, "content-security-policy"),
        "default-src 'self'; img-src 'self' data:; style-src 'self'; script-src 'self'"
    );
}
