//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>)
//! - `CATALOG_API_URL` - Product catalog API base URL (default: <https://fakestoreapi.com>)
//! - `CATALOG_CACHE_TTL_SECS` - Catalog response cache TTL (default: 300)
//! - `SEARCH_DEBOUNCE_MS` - Search input quiescence window (default: 300)
//! - `MAX_QUANTITY_PER_ITEM` - Per-line cart limit enforced by the cart routes (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `LOG_FORMAT` - `json` for structured log lines (read by the binary, default: text)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_CATALOG_API_URL: &str = "https://fakestoreapi.com";

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
    /// Product catalog API configuration
    pub catalog: CatalogConfig,
    /// Search behavior
    pub search: SearchConfig,
    /// Cart policy applied by the cart routes
    pub cart: CartConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Product catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog API
    pub api_url: Url,
    /// How long fetched catalog responses stay cached
    pub cache_ttl: Duration,
}

/// Search configuration.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Quiescence window before debounced input runs a search
    pub debounce: Duration,
}

/// Cart policy configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Maximum units of one product per cart line
    pub max_quantity_per_item: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_CATALOG_API_URL).expect("default catalog URL is valid"),
            cache_ttl: Duration::from_secs(300),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: crate::search::DEFAULT_DEBOUNCE,
        }
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            max_quantity_per_item: 10,
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            catalog: CatalogConfig::default(),
            search: SearchConfig::default(),
            cart: CartConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env("STOREFRONT_PORT", "3000")?;
        let base_url = get_env_or_default("STOREFRONT_BASE_URL", "http://localhost:3000");

        let catalog = CatalogConfig::from_env()?;
        let search = SearchConfig::from_env()?;
        let cart = CartConfig::from_env()?;

        Ok(Self {
            host,
            port,
            base_url,
            catalog,
            search,
            cart,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl CatalogConfig {
    /// Load the catalog section from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for a malformed URL or TTL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = get_env_or_default("CATALOG_API_URL", DEFAULT_CATALOG_API_URL);
        let api_url = Url::parse(&api_url)
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_API_URL".to_string(), e.to_string()))?;
        if api_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidEnvVar(
                "CATALOG_API_URL".to_string(),
                "must be an absolute http(s) URL".to_string(),
            ));
        }
        let ttl_secs: u64 = parse_env("CATALOG_CACHE_TTL_SECS", "300")?;

        Ok(Self {
            api_url,
            cache_ttl: Duration::from_secs(ttl_secs),
        })
    }
}

impl SearchConfig {
    /// Load the search section from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for a malformed window.
    pub fn from_env() -> Result<Self, ConfigError> {
        let debounce_ms: u64 = parse_env("SEARCH_DEBOUNCE_MS", "300")?;
        Ok(Self {
            debounce: Duration::from_millis(debounce_ms),
        })
    }
}

impl CartConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let max_quantity_per_item: u32 = parse_env("MAX_QUANTITY_PER_ITEM", "10")?;
        validate_max_quantity(max_quantity_per_item)?;
        Ok(Self {
            max_quantity_per_item,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn validate_max_quantity(value: u32) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidEnvVar(
            "MAX_QUANTITY_PER_ITEM".to_string(),
            "must be at least 1".to_string(),
        ));
    }
    Ok(())
}
