//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Seconds a cart snapshot stays cached; 0 disables cache writes
    pub cache_ttl: u64,
    /// Name of the secondary key component. Setting it turns on scoped carts;
    /// the name itself is only reported at startup, partitions are always
    /// `user#scope`.
    pub scope_key: Option<String>,
    /// Scope applied when a request names none
    pub default_scope: String,
    /// Maximum number of snapshots the in-process cache holds
    pub cache_max_entries: usize,
    /// Seconds between sweeps of expired snapshots
    pub cleanup_interval: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Optional JSON file of products loaded into the catalog at startup
    pub catalog_seed_file: Option<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CART_CACHE_TTL` - Snapshot TTL in seconds (default: 3600)
    /// - `CART_SCOPE_KEY` - Secondary key component name; enables scoped carts (default: unset)
    /// - `CART_DEFAULT_SCOPE` - Scope used when none is supplied (default: "default")
    /// - `CACHE_MAX_ENTRIES` - Snapshot cache capacity (default: 10000)
    /// - `CLEANUP_INTERVAL` - Expired snapshot sweep interval in seconds (default: 60)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CATALOG_SEED_FILE` - Product JSON loaded at startup (default: unset)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            cache_ttl: parse_var("CART_CACHE_TTL").unwrap_or(defaults.cache_ttl),
            scope_key: non_empty_var("CART_SCOPE_KEY"),
            default_scope: non_empty_var("CART_DEFAULT_SCOPE").unwrap_or(defaults.default_scope),
            cache_max_entries: parse_var("CACHE_MAX_ENTRIES")
                .unwrap_or(defaults.cache_max_entries),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            catalog_seed_file: non_empty_var("CATALOG_SEED_FILE"),
        }
    }

    /// Whether carts are partitioned by scope as well as by user.
    pub fn scoped_carts(&self) -> bool {
        self.scope_key.is_some()
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl: 3600,
            scope_key: None,
            default_scope: "default".to_string(),
            cache_max_entries: 10_000,
            cleanup_interval: 60,
            server_port: 3000,
            catalog_seed_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_ttl, 3600);
        assert!(config.scope_key.is_none());
        assert_eq!(config.default_scope, "default");
        assert_eq!(config.cache_max_entries, 10_000);
        assert_eq!(config.cleanup_interval, 60);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        for name in [
            "CART_CACHE_TTL",
            "CART_SCOPE_KEY",
            "CART_DEFAULT_SCOPE",
            "CACHE_MAX_ENTRIES",
            "CLEANUP_INTERVAL",
            "SERVER_PORT",
            "CATALOG_SEED_FILE",
        ] {
            env::remove_var(name);
        }

        let config = Config::from_env();
        assert_eq!(config.cache_ttl, 3600);
        assert!(config.scope_key.is_none());
        assert_eq!(config.default_scope, "default");
        assert_eq!(config.server_port, 3000);
        assert!(config.catalog_seed_file.is_none());
    }

    #[test]
    fn test_scope_key_enables_scoped_carts() {
        assert!(!Config::default().scoped_carts());

        let config = Config {
            scope_key: Some("channel".to_string()),
            ..Config::default()
        };
        assert!(config.scoped_carts());
    }
}
