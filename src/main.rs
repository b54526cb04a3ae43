//! Frameserve - a slideshow server for a directory of photos.
//!
//! This binary parses the configuration, builds the router and serves it
//! until interrupted.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use frameserve::{
    config::Config,
    server::{create_router, serve, shutdown_signal, RouterConfig},
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Initialize logging
    init_logging(config.verbose);

    run_serve(config).await
}

// =============================================================================
// Serve Command
// =============================================================================

async fn run_serve(config: Config) -> ExitCode {
    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let photos_dir = match config.resolve_photos_dir() {
        Ok(dir) => dir,
        Err(e) => {
            error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Frameserve v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Photos directory: {}", photos_dir.display());
    info!("  Header read timeout: {}s", config.header_read_timeout);

    // The listing answers 500 until the directory shows up, but the server
    // itself can start.
    match std::fs::metadata(&photos_dir) {
        Ok(metadata) if metadata.is_dir() => {}
        Ok(_) => warn!("  {} is not a directory", photos_dir.display()),
        Err(e) => warn!("  Photos directory is not readable yet: {}", e),
    }

    // Auth status with warning if disabled
    let auth_token = config.auth_token().map(str::to_string);
    if auth_token.is_some() {
        info!("  Auth: shared token required");
    } else {
        warn!("  Auth: DISABLED - anyone who can reach this server sees your photos");
        warn!("        Enable with --auth-token=<token> or AUTH_TOKEN=<token>");
    }

    let router_config = RouterConfig::new(auth_token).with_tracing(!config.no_tracing);
    let router = create_router(photos_dir, router_config);

    // Bind and serve
    let addr = config.bind_address();

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    info!("Server listening on: http://{}", addr);

    if let Err(e) = serve(
        listener,
        router,
        config.header_read_timeout(),
        shutdown_signal(),
    )
    .await
    {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing subscriber.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "frameserve=debug,tower_http=debug"
    } else {
        "frameserve=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
