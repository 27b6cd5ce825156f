//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STS_HOST` - Bind address (default: 127.0.0.1)
//! - `STS_PORT` - Listen port (default: 3000)
//! - `STS_DATA_DIR` - Directory for persisted cart, language and order state
//!   (default: `.sts`)
//! - `STS_CATALOG_PATH` - JSON product list replacing the built-in catalog
//! - `STS_SEARCH_DEBOUNCE_MS` - Search debounce in milliseconds (default: 300)
//! - `STS_SEARCH_THRESHOLD` - Maximum fuzzy error ratio, 0 to 1 (default: 0.4)
//! - `STS_WHATSAPP_NUMBER` - Digits of the number receiving orders
//!   (default: 96178904118)
//! - `STS_ADMIN_EMAIL` - Demo admin email (default: admin@sts.com)
//! - `STS_ADMIN_PASSWORD` - Demo admin password (default: admin123)
//! - `STS_ADMIN_ACCESS_CODE` - Code required to reach the admin login
//!   (default: STS2025)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

use sts_core::Email;

use crate::search::SearchConfig;
use crate::services::auth::AdminGate;

const DEFAULT_WHATSAPP_NUMBER: &str = "96178904118";

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
    /// Directory backing the file store
    pub data_dir: PathBuf,
    /// Optional catalog file
    pub catalog_path: Option<PathBuf>,
    /// Search ranking and debounce settings
    pub search: SearchConfig,
    /// Number receiving order notifications, digits only
    pub whatsapp_number: String,
    /// Demo admin account
    pub admin: AdminConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Demo admin account.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct AdminConfig {
    pub email: Email,
    pub password: SecretString,
    pub access_code: String,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("access_code", &"[REDACTED]")
            .finish()
    }
}

impl AdminConfig {
    /// Build the sign-in gate for this account.
    #[must_use]
    pub fn gate(&self) -> AdminGate {
        AdminGate::new(
            self.email.clone(),
            self.password.clone(),
            self.access_code.clone(),
        )
    }
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

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);

        let host = env
            .or_default("STS_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("STS_HOST".to_string(), e.to_string()))?;
        let port = env
            .or_default("STS_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("STS_PORT".to_string(), e.to_string()))?;
        let data_dir = PathBuf::from(env.or_default("STS_DATA_DIR", ".sts"));
        let catalog_path = env.optional("STS_CATALOG_PATH").map(PathBuf::from);

        let search = SearchConfig {
            threshold: parse_threshold(&env.or_default("STS_SEARCH_THRESHOLD", "0.4"))?,
            debounce: env
                .or_default("STS_SEARCH_DEBOUNCE_MS", "300")
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| {
                    ConfigError::InvalidEnvVar("STS_SEARCH_DEBOUNCE_MS".to_string(), e.to_string())
                })?,
        };

        let whatsapp_number = env.or_default("STS_WHATSAPP_NUMBER", DEFAULT_WHATSAPP_NUMBER);
        if whatsapp_number.is_empty() || !whatsapp_number.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidEnvVar(
                "STS_WHATSAPP_NUMBER".to_string(),
                "must contain digits only".to_string(),
            ));
        }

        let admin = AdminConfig {
            email: Email::parse(&env.or_default("STS_ADMIN_EMAIL", "admin@sts.com")).map_err(
                |e| ConfigError::InvalidEnvVar("STS_ADMIN_EMAIL".to_string(), e.to_string()),
            )?,
            password: SecretString::from(env.or_default("STS_ADMIN_PASSWORD", "admin123")),
            access_code: env.or_default("STS_ADMIN_ACCESS_CODE", "STS2025"),
        };

        Ok(Self {
            host,
            port,
            data_dir,
            catalog_path,
            search,
            whatsapp_number,
            admin,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional variable. Empty values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

fn parse_threshold(raw: &str) -> Result<f64, ConfigError> {
    let invalid =
        |reason: String| ConfigError::InvalidEnvVar("STS_SEARCH_THRESHOLD".to_string(), reason);
    let value = raw.parse::<f64>().map_err(|e| invalid(e.to_string()))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid(format!("must be between 0 and 1 (got {value})")));
    }
    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.data_dir, PathBuf::from(".sts"));
        assert_eq!(config.catalog_path, None);
        assert_eq!(config.search, SearchConfig::default());
        assert_eq!(config.whatsapp_number, "96178904118");
        assert_eq!(config.admin.email.as_str(), "admin@sts.com");
        assert_eq!(config.admin.password.expose_secret(), "admin123");
        assert_eq!(config.admin.access_code, "STS2025");
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STS_PORT", "8080"),
            ("STS_DATA_DIR", "/var/lib/sts"),
            ("STS_CATALOG_PATH", "catalog.json"),
            ("STS_SEARCH_THRESHOLD", "0.25"),
            ("STS_SEARCH_DEBOUNCE_MS", "50"),
            ("SENTRY_DSN", ""),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/sts"));
        assert_eq!(config.catalog_path, Some(PathBuf::from("catalog.json")));
        assert!((config.search.threshold - 0.25).abs() < f64::EPSILON);
        assert_eq!(config.search.debounce, Duration::from_millis(50));
        assert_eq!(config.sentry_dsn, None);
    }

    #[test]
    fn test_invalid_values() {
        for (key, value) in [
            ("STS_PORT", "70000"),
            ("STS_HOST", "localhost:1"),
            ("STS_SEARCH_THRESHOLD", "1.5"),
            ("STS_SEARCH_THRESHOLD", "abc"),
            ("STS_SEARCH_DEBOUNCE_MS", "-1"),
            ("STS_WHATSAPP_NUMBER", "+961 78"),
            ("STS_ADMIN_EMAIL", "admin"),
        ] {
            assert!(
                matches!(load(&[(key, value)]), Err(ConfigError::InvalidEnvVar(ref k, _)) if k == key),
                "{key}={value}"
            );
        }
    }

    #[test]
    fn test_admin_config_debug_redacts_secrets() {
        let config = load(&[("STS_ADMIN_PASSWORD", "super_secret_password")]).unwrap();
        let debug_output = format!("{:?}", config.admin);

        assert!(debug_output.contains("admin@sts.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_password"));
        assert!(!debug_output.contains("STS2025"));
    }
}
