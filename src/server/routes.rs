//! Router configuration for Frameserve.
//!
//! This module defines the HTTP routes and applies middleware for the
//! shared-token gate, security headers and request tracing.
//!
//! # Route Structure
//!
//! ```text
//! /healthz                - Health check (public)
//! /                       - Slideshow UI (protected)
//! /info                   - Usage page (protected)
//! /static/{*path}         - Bundled assets (protected)
//! /api/photos             - Photo listing (protected)
//! /photos/{*name}         - Photo bytes (protected)
//! anything else           - 404 (protected, so 401 without credentials)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use frameserve::server::routes::{create_router, RouterConfig};
//!
//! let config = RouterConfig::new(Some("my-shared-token".to_string()));
//! let router = create_router("/photos".into(), config);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::path::PathBuf;

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::auth::{auth_middleware, SharedTokenAuth};
use super::handlers::{
    health_handler, index_handler, info_handler, not_found_handler, photo_handler,
    photos_handler, static_handler, AppState,
};
use super::headers::security_headers_middleware;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Clone)]
pub struct RouterConfig {
    /// Shared access token (None = everything is public)
    pub auth_token: Option<String>,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl std::fmt::Debug for RouterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterConfig")
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("enable_tracing", &self.enable_tracing)
            .finish()
    }
}

impl RouterConfig {
    /// Create a new router configuration.
    ///
    /// An empty or whitespace-only token disables authentication, the same
    /// as `None`. Tracing is enabled by default.
    pub fn new(auth_token: Option<String>) -> Self {
        let auth_token = auth_token
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        Self {
            auth_token,
            enable_tracing: true,
        }
    }

    /// Create a configuration with authentication disabled.
    pub fn without_auth() -> Self {
        Self::new(None)
    }

    /// Whether requests must present the shared token.
    pub fn auth_enabled(&self) -> bool {
        self.auth_token.is_some()
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// This function builds the complete Axum router with:
/// - Public routes (health check)
/// - Gated routes (UI, assets, listing and photos), when a token is configured
/// - Security headers on every response
/// - Request tracing (optional)
///
/// # Arguments
///
/// * `photos_dir` - Absolute path of the photos directory
/// * `config` - Router configuration
pub fn create_router(photos_dir: PathBuf, config: RouterConfig) -> Router {
    let app_state = AppState::new(photos_dir);

    let app_routes = build_app_routes(app_state);

    let app_routes = match &config.auth_token {
        Some(token) => app_routes.layer(middleware::from_fn_with_state(
            SharedTokenAuth::new(token),
            auth_middleware,
        )),
        None => app_routes,
    };

    // Public routes (no auth required)
    let public_routes = Router::new().route("/healthz", get(health_handler));

    let router = Router::new()
        .merge(app_routes)
        .merge(public_routes)
        .layer(middleware::from_fn(security_headers_middleware));

    // Add tracing if enabled
    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Routes behind the token gate.
///
/// The fallback lives here so that unknown paths are gated as well.
fn build_app_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/info", get(info_handler))
        .route("/static/{*path}", get(static_handler))
        .route("/api/photos", get(photos_handler))
        .route("/photos/{*name}", get(photo_handler))
        .fallback(not_found_handler)
        .with_state(app_state)
}

// =============================================================================
// Tests
// =============================================================================
