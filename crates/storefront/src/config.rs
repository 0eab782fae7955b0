//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `CLOSEOUT_HOST` - Bind address (default: 127.0.0.1)
//! - `CLOSEOUT_PORT` - Listen port (default: 3000)
//! - `CLOSEOUT_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>)
//! - `CLOSEOUT_ORDER_FORM_URL` - Externally hosted order intake form
//! - `CLOSEOUT_CONTENT_DIR` - Catalog content directory (default: crates/storefront/content)
//! - `CLOSEOUT_STATIC_DIR` - Static asset directory (default: crates/storefront/static)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Order form opened by the order request control unless overridden.
pub const DEFAULT_ORDER_FORM_URL: &str = "https://forms.gle/vccFdaietcoSHRUH8";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// External order form, always an absolute http(s) URL
    pub order_form_url: Url,
    /// Directory holding `catalog/*.yaml`
    pub content_dir: PathBuf,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = get("CLOSEOUT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("CLOSEOUT_HOST".to_string(), e.to_string()))?;
        let port = get("CLOSEOUT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("CLOSEOUT_PORT".to_string(), e.to_string()))?;
        let base_url = get("CLOSEOUT_BASE_URL", "http://localhost:3000");
        let order_form_url = parse_form_url(&get("CLOSEOUT_ORDER_FORM_URL", DEFAULT_ORDER_FORM_URL))?;

        Ok(Self {
            host,
            port,
            base_url,
            order_form_url,
            content_dir: get("CLOSEOUT_CONTENT_DIR", "crates/storefront/content").into(),
            static_dir: get("CLOSEOUT_STATIC_DIR", "crates/storefront/static").into(),
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` flag.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

/// Validate the order form link: absolute and http(s).
fn parse_form_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| {
        ConfigError::InvalidEnvVar("CLOSEOUT_ORDER_FORM_URL".to_string(), reason)
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}
