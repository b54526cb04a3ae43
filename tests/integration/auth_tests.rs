//! Authentication integration tests.
//!
//! Tests verify:
//! - Requests without credentials get the 401 setup page
//! - Query tokens are exchanged for a cookie with a clean redirect
//! - Cookie and bearer credentials are accepted
//! - Wrong credentials are rejected, but a wrong query token still falls
//!   through to the cookie check
//! - `/healthz` is never gated

use axum::http::StatusCode;
use axum::Router;
use tower::ServiceExt;

use frameserve::{create_router, RouterConfig};

use super::test_utils::{
    assert_security_headers, body_string, get, get_with_header, header, sample_photos, PhotoDir,
    TEST_TOKEN,
};

fn auth_cookie() -> String {
    format!("frameserve_auth={}", TEST_TOKEN)
}

fn bearer() -> String {
    format!("Bearer {}", TEST_TOKEN)
}

async fn status_of(router: &Router, request: axum::http::Request<axum::body::Body>) -> StatusCode {
    router.clone().oneshot(request).await.unwrap().status()
}

// =============================================================================
// Missing Credentials
// =============================================================================

#[tokio::test]
async fn test_no_credentials_is_unauthorized() {
    let dir = sample_photos();
    let router = dir.router_with_token();

    for uri in ["/", "/info", "/api/photos", "/photos/a.jpg", "/static/app.js"] {
        let response = router.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "expected 401 for {}", uri);
    }
}

#[tokio::test]
async fn test_unauthorized_page() {
    let dir = PhotoDir::new();
    let response = dir.router_with_token().oneshot(get("/info")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(header(&response, "cache-control"), "no-store");
    assert!(header(&response, "content-type").starts_with("text/html"));
    assert_security_headers(&response);

    let body = body_string(response).await;
    assert!(body.contains("/info?token=YOURTOKEN"));
    assert!(!body.contains(TEST_TOKEN));
}

#[tokio::test]
async fn test_unknown_path_requires_auth() {
    let dir = PhotoDir::new();
    let router = dir.router_with_token();

    assert_eq!(status_of(&router, get("/nope")).await, StatusCode::UNAUTHORIZED);
    assert_eq!(
        status_of(&router, get_with_header("/nope", "cookie", &auth_cookie())).await,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_healthz_is_public() {
    let dir = PhotoDir::new();
    let response = dir.router_with_token().oneshot(get("/healthz")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_healthz_ignores_wrong_credentials() {
    let dir = PhotoDir::new();
    let router = dir.router_with_token();

    let response = router
        .clone()
        .oneshot(get_with_header("/healthz", "authorization", "Bearer wrong"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");

    let status = status_of(&router, get_with_header("/healthz", "cookie", "frameserve_auth=wrong")).await;
    assert_eq!(status, StatusCode::OK);

    let status = status_of(&router, get("/healthz?token=wrong")).await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Query Token Exchange
// =============================================================================

#[tokio::test]
async fn test_query_token_sets_cookie_and_redirects() {
    let dir = PhotoDir::new();
    let uri = format!("/?token={}", TEST_TOKEN);
    let response = dir.router_with_token().oneshot(get(&uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(header(&response, "location"), "/");

    let cookie = header(&response, "set-cookie");
    assert!(cookie.starts_with(&auth_cookie()));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=31536000"));
    assert!(!cookie.contains("Secure"));
}

#[tokio::test]
async fn test_exchanged_cookie_grants_access() {
    let dir = sample_photos();
    let router = dir.router_with_token();

    let uri = format!("/api/photos?token={}", TEST_TOKEN);
    let response = router.clone().oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    let location = header(&response, "location").to_string();

    // Send back only the name=value pair, as a browser would.
    let set_cookie = header(&response, "set-cookie");
    let cookie = set_cookie.split(';').next().unwrap().trim().to_string();

    let response = router
        .clone()
        .oneshot(get_with_header(&location, "cookie", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("\"count\":2"));

    let status = status_of(&router, get_with_header("/photos/a.jpg", "cookie", &cookie)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_short_query_param() {
    let dir = PhotoDir::new();
    let uri = format!("/info?t={}", TEST_TOKEN);
    let response = dir.router_with_token().oneshot(get(&uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(header(&response, "location"), "/info");
}

#[tokio::test]
async fn test_redirect_keeps_other_params() {
    let dir = PhotoDir::new();
    let uri = format!("/?seconds=20&token={}&shuffle=1&t=junk", TEST_TOKEN);
    let response = dir.router_with_token().oneshot(get(&uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(header(&response, "location"), "/?seconds=20&shuffle=1");
}

#[tokio::test]
async fn test_secure_cookie_behind_https_proxy() {
    let dir = PhotoDir::new();
    let uri = format!("/?token={}", TEST_TOKEN);
    let response = dir
        .router_with_token()
        .oneshot(get_with_header(&uri, "x-forwarded-proto", "HTTPS"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert!(header(&response, "set-cookie").contains("Secure"));
}

#[tokio::test]
async fn test_wrong_query_token_is_unauthorized() {
    let dir = PhotoDir::new();
    let router = dir.router_with_token();

    assert_eq!(status_of(&router, get("/?token=wrong")).await, StatusCode::UNAUTHORIZED);
    assert_eq!(status_of(&router, get("/?t=wrong")).await, StatusCode::UNAUTHORIZED);
    assert_eq!(status_of(&router, get("/?token=")).await, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_query_token_falls_through_to_cookie() {
    let dir = sample_photos();
    let response = dir
        .router_with_token()
        .oneshot(get_with_header("/api/photos?token=stale", "cookie", &auth_cookie()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Cookie and Bearer
// =============================================================================

#[tokio::test]
async fn test_cookie_grants_access() {
    let dir = sample_photos();
    let router = dir.router_with_token();

    for uri in ["/", "/api/photos", "/photos/a.jpg", "/static/app.css"] {
        let status = status_of(&router, get_with_header(uri, "cookie", &auth_cookie())).await;
        assert_eq!(status, StatusCode::OK, "expected 200 for {}", uri);
    }
}

#[tokio::test]
async fn test_wrong_cookie_is_unauthorized() {
    let dir = PhotoDir::new();
    let router = dir.router_with_token();

    let status = status_of(&router, get_with_header("/", "cookie", "frameserve_auth=nope")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bearer_grants_access() {
    let dir = sample_photos();
    let router = dir.router_with_token();

    let status = status_of(&router, get_with_header("/api/photos", "authorization", &bearer())).await;
    assert_eq!(status, StatusCode::OK);

    let lenient = format!("  bearer   {}  ", TEST_TOKEN);
    let status = status_of(&router, get_with_header("/api/photos", "authorization", &lenient)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_wrong_bearer_is_unauthorized() {
    let dir = PhotoDir::new();
    let router = dir.router_with_token();

    let status = status_of(&router, get_with_header("/", "authorization", "Bearer nope")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let basic = format!("Basic {}", TEST_TOKEN);
    let status = status_of(&router, get_with_header("/", "authorization", &basic)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Disabled Auth
// =============================================================================

#[tokio::test]
async fn test_blank_token_disables_auth() {
    let dir = sample_photos();
    let router = create_router(
        dir.path().to_path_buf(),
        RouterConfig::new(Some("   ".to_string())).with_tracing(false),
    );

    assert_eq!(status_of(&router, get("/api/photos")).await, StatusCode::OK);
}

#[tokio::test]
async fn test_token_params_ignored_without_auth() {
    let dir = PhotoDir::new();
    let router = dir.router();

    assert_eq!(status_of(&router, get("/?token=anything")).await, StatusCode::OK);
}
