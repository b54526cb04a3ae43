//! Shared-token authentication for Frameserve.
//!
//! A single secret protects every route except `/healthz`. A device proves it
//! knows the secret in one of three ways, checked in this order:
//!
//! 1. **Query exchange**: `?token=SECRET` (or `?t=SECRET`) on any URL. On a
//!    match the server sets a long-lived cookie and redirects (302) to the same
//!    URL with the token removed. A wrong query token does not reject the
//!    request outright; the cookie and header checks still run, so a device
//!    with a stale bookmarked token but a valid cookie keeps working.
//! 2. **Cookie**: `frameserve_auth=SECRET`.
//! 3. **Bearer header**: `Authorization: Bearer SECRET`.
//!
//! Anything else receives a 401 page explaining the one-time setup.
//!
//! # Security Properties
//!
//! - **Constant-time comparison**: Every candidate is length-checked and then
//!   compared with [`subtle::ConstantTimeEq`]
//! - **HttpOnly cookie**: The cookie is `HttpOnly`, `SameSite=Lax`, and
//!   `Secure` when the request arrived over HTTPS (directly or through a
//!   proxy setting `X-Forwarded-Proto: https`)
//!
//! # Example
//!
//! ```rust
//! use frameserve::server::auth::SharedTokenAuth;
//!
//! let auth = SharedTokenAuth::new("my-shared-token");
//! assert!(auth.verify("my-shared-token"));
//! assert!(!auth.verify("guess"));
//! ```

use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Request, State},
    http::{header, HeaderMap, StatusCode, Uri},
    middleware::Next,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};
use url::form_urlencoded;

use super::pages::unauthorized_html;

// =============================================================================
// Constants
// =============================================================================

/// Name of the cookie holding the shared token.
pub const AUTH_COOKIE_NAME: &str = "frameserve_auth";

/// Cookie lifetime: 365 days.
pub const AUTH_COOKIE_MAX_AGE_SECS: i64 = 365 * 24 * 60 * 60;

/// Query parameters accepted for the one-time token exchange, in priority
/// order.
pub const TOKEN_QUERY_PARAMS: [&str; 2] = ["token", "t"];

// =============================================================================
// Types
// =============================================================================

/// Authentication error types.
#[derive(Debug, Clone)]
pub enum AuthError {
    /// No credential matched the configured token
    Unauthorized {
        /// Path of the rejected request, echoed on the 401 page
        path: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::Unauthorized { path } => write!(f, "Unauthorized request for {}", path),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let AuthError::Unauthorized { path } = &self;

        debug!(
            error_type = "unauthorized",
            status = StatusCode::UNAUTHORIZED.as_u16(),
            "Authentication failed: {}",
            self
        );

        (
            StatusCode::UNAUTHORIZED,
            [(header::CACHE_CONTROL, "no-store")],
            Html(unauthorized_html(path)),
        )
            .into_response()
    }
}

// =============================================================================
// Shared Token Authentication
// =============================================================================

/// The process-wide shared token.
///
/// Cheap to clone; the token is stored once behind an `Arc`.
#[derive(Clone)]
pub struct SharedTokenAuth {
    token: Arc<str>,
}

impl std::fmt::Debug for SharedTokenAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedTokenAuth")
            .field("token", &"<redacted>")
            .finish()
    }
}

impl SharedTokenAuth {
    /// Create an authenticator for the given token.
    pub fn new(token: impl AsRef<str>) -> Self {
        Self {
            token: Arc::from(token.as_ref()),
        }
    }

    /// Check a candidate against the configured token in constant time.
    pub fn verify(&self, candidate: &str) -> bool {
        constant_time_eq(self.token.as_bytes(), candidate.as_bytes())
    }

    /// Build the cookie handed out after a successful query exchange.
    pub fn auth_cookie(&self, secure: bool) -> Cookie<'static> {
        Cookie::build((AUTH_COOKIE_NAME, self.token.to_string()))
            .path("/")
            .max_age(cookie::time::Duration::seconds(AUTH_COOKIE_MAX_AGE_SECS))
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(secure)
            .build()
    }
}

/// Compare two byte strings without leaking where they differ.
///
/// Lengths are compared first; only the contents comparison is constant-time.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

// =============================================================================
// Request Inspection
// =============================================================================

/// Extract the token offered in the query string, if any.
///
/// `token` wins over `t`; blank values count as absent.
pub fn query_token(query: &str) -> Option<String> {
    TOKEN_QUERY_PARAMS.iter().find_map(|wanted| {
        form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| &**key == *wanted)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.trim().is_empty())
    })
}

/// Remove every `token` / `t` pair from a query string, keeping the others in
/// order.
pub fn strip_token_params(query: &str) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if TOKEN_QUERY_PARAMS.contains(&&*key) {
            continue;
        }
        serializer.append_pair(&key, &value);
    }
    serializer.finish()
}

/// Parse an `Authorization: Bearer <token>` header value.
///
/// The scheme is case-insensitive and surrounding whitespace is ignored.
pub fn parse_bearer(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.trim().eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Whether the client reached us over HTTPS, directly or via a proxy.
pub fn is_https_request(uri: &Uri, headers: &HeaderMap) -> bool {
    if uri.scheme_str() == Some("https") {
        return true;
    }

    headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|proto| proto.trim().eq_ignore_ascii_case("https"))
        .unwrap_or(false)
}

// =============================================================================
// Axum Middleware
// =============================================================================

/// Axum middleware enforcing the shared token.
///
/// Install it on every protected route; `/healthz` is kept outside of it by
/// the router.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, middleware};
/// use frameserve::server::auth::{SharedTokenAuth, auth_middleware};
///
/// let auth = SharedTokenAuth::new("token");
/// let app = Router::new()
///     .route("/api/photos", get(photos_handler))
///     .layer(middleware::from_fn_with_state(auth, auth_middleware));
/// ```
pub async fn auth_middleware(
    State(auth): State<SharedTokenAuth>,
    OriginalUri(original_uri): OriginalUri,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let path = original_uri.path();

    // 1. One-time exchange through the query string
    if let Some(offered) = query_token(original_uri.query().unwrap_or("")) {
        if auth.verify(&offered) {
            let secure = is_https_request(&original_uri, request.headers());
            let jar = jar.add(auth.auth_cookie(secure));

            let query = strip_token_params(original_uri.query().unwrap_or(""));
            let location = if query.is_empty() {
                path.to_string()
            } else {
                format!("{}?{}", path, query)
            };

            debug!(path, secure, "Token exchanged for auth cookie");
            return Ok((jar, (StatusCode::FOUND, [(header::LOCATION, location)])).into_response());
        }

        warn!(path, "Invalid token in query string");
    }

    // 2. Cookie from a previous exchange
    if let Some(cookie) = jar.get(AUTH_COOKIE_NAME) {
        if auth.verify(cookie.value()) {
            return Ok(next.run(request).await);
        }
        debug!(path, "Stale auth cookie");
    }

    // 3. Bearer token
    let bearer_valid = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_bearer)
        .map(|bearer| auth.verify(bearer));
    match bearer_valid {
        Some(true) => return Ok(next.run(request).await),
        Some(false) => warn!(path, "Invalid bearer token"),
        None => {}
    }

    Err(AuthError::Unauthorized {
        path: path.to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
