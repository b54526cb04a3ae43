//! HTTP server layer for Frameserve.
//!
//! This module provides the slideshow UI, the photo listing API and the raw
//! photo endpoint, all behind an optional shared-token gate.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │      GET /   /info   /static/*   /api/photos   /photos/*        │
//! │                                                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────────┐  │
//! │  │  handlers   │  │    auth     │  │        routes           │  │
//! │  │ (requests)  │  │(shared token│  │  (router config)        │  │
//! │  │             │  │  + cookie)  │  │                         │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────────┘  │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────────┐  │
//! │  │   assets    │  │   headers   │  │       listener          │  │
//! │  │ (embedded)  │  │ (CSP etc.)  │  │ (accept loop, timeouts) │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod assets;
pub mod auth;
pub mod handlers;
pub mod headers;
pub mod listener;
pub mod pages;
pub mod routes;

pub use auth::{auth_middleware, AuthError, SharedTokenAuth, AUTH_COOKIE_NAME};
pub use handlers::{
    health_handler, index_handler, info_handler, photo_handler, photos_handler, static_handler,
    ApiError, AppState, ErrorResponse, PhotosQueryParams,
};
pub use listener::{serve, shutdown_signal};
pub use routes::{create_router, RouterConfig};
