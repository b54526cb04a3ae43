//! Configuration management for Frameserve.
//!
//! Every option can be given on the command line or through the environment:
//!
//! - `HOST` - Server bind address (default: 0.0.0.0)
//! - `PORT` - Server port (default: 80)
//! - `PHOTOS_DIR` - Directory holding the photos (default: /photos)
//! - `AUTH_TOKEN` - Shared access token; unset or empty disables auth
//! - `HEADER_READ_TIMEOUT` - Seconds allowed for reading request headers (default: 5)
//!
//! # Example
//!
//! ```ignore
//! use frameserve::config::Config;
//!
//! let config = Config::parse();
//! config.validate()?;
//! let photos_dir = config.resolve_photos_dir()?;
//! println!("Serving {} on {}", photos_dir.display(), config.bind_address());
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::ConfigError;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 80;

/// Default photos directory.
pub const DEFAULT_PHOTOS_DIR: &str = "/photos";

/// Default header read timeout in seconds.
pub const DEFAULT_HEADER_READ_TIMEOUT: u64 = 5;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Frameserve - a slideshow server for a directory of photos.
///
/// Serves a full-screen slideshow of the images in a directory, refreshing
/// as files are added or removed. Access can be limited with a shared token.
#[derive(Parser, Debug, Clone)]
#[command(name = "frameserve")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PORT")]
    pub port: u16,

    /// Seconds a client has to send its request headers.
    #[arg(long, default_value_t = DEFAULT_HEADER_READ_TIMEOUT, env = "HEADER_READ_TIMEOUT")]
    pub header_read_timeout: u64,

    // =========================================================================
    // Photos
    // =========================================================================
    /// Directory containing the images to show.
    ///
    /// Only files directly inside it are served; subdirectories are ignored.
    #[arg(long, default_value = DEFAULT_PHOTOS_DIR, env = "PHOTOS_DIR")]
    pub photos_dir: PathBuf,

    // =========================================================================
    // Authentication Configuration
    // =========================================================================
    /// Shared access token.
    ///
    /// When set, every route except /healthz requires the token, given once
    /// as `?token=...` (exchanged for a cookie), or as a Bearer header.
    #[arg(long, env = "AUTH_TOKEN", hide_env_values = true)]
    pub auth_token: Option<String>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.photos_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPhotosDir);
        }

        if self.header_read_timeout == 0 {
            return Err(ConfigError::ZeroHeaderTimeout);
        }

        Ok(())
    }

    /// Resolve the photos directory to an absolute path.
    ///
    /// Resolution is lexical; the directory does not have to exist yet.
    pub fn resolve_photos_dir(&self) -> Result<PathBuf, ConfigError> {
        if self.photos_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPhotosDir);
        }

        std::path::absolute(&self.photos_dir).map_err(|source| ConfigError::PhotosDir {
            path: self.photos_dir.clone(),
            source,
        })
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The configured token with surrounding whitespace removed, or `None`
    /// when auth is disabled.
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    /// Header read timeout as a [`Duration`].
    pub fn header_read_timeout(&self) -> Duration {
        Duration::from_secs(self.header_read_timeout)
    }
}

// =============================================================================
// Tests
// =============================================================================
