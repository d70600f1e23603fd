//! Shop server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use fakeshop_core::DEFAULT_CART_TTL_SECS;

/// Shop server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopConfig {
    /// HTTP listen port (`FAKESHOP_PORT`, else `PORT`)
    pub port: u16,

    /// Interface to bind
    pub bind: String,

    /// Inventory catalog (TOML, `[[product]]` tables)
    pub stock_file: PathBuf,

    /// Promotion catalog (TOML, `[[promotion]]` tables)
    pub promotions_file: PathBuf,

    /// Lifetime stamped on new carts, in seconds
    pub cart_ttl_secs: i64,
}

impl Default for ShopConfig {
    fn default() -> Self {
        ShopConfig {
            port: 8888,
            bind: "0.0.0.0".to_string(),
            stock_file: PathBuf::from("config/stock.toml"),
            promotions_file: PathBuf::from("config/promotions.toml"),
            cart_ttl_secs: DEFAULT_CART_TTL_SECS,
        }
    }
}

impl ShopConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup. `load` uses the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ShopConfig::default();

        let config = ShopConfig {
            port: match ["FAKESHOP_PORT", "PORT"]
                .into_iter()
                .find_map(|key| lookup(key).map(|raw| (key, raw)))
            {
                Some((key, raw)) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(key.to_string()))?,
                None => defaults.port,
            },

            bind: lookup("FAKESHOP_BIND").unwrap_or(defaults.bind),

            stock_file: lookup("FAKESHOP_STOCK_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.stock_file),

            promotions_file: lookup("FAKESHOP_PROMOTIONS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.promotions_file),

            cart_ttl_secs: match lookup("FAKESHOP_CART_TTL_SECS") {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("FAKESHOP_CART_TTL_SECS".to_string()))?,
                None => defaults.cart_ttl_secs,
            },
        };

        if config.cart_ttl_secs <= 0 {
            return Err(ConfigError::InvalidValue("FAKESHOP_CART_TTL_SECS".to_string()));
        }

        Ok(config)
    }

    /// `bind:port`, ready for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }

    pub fn cart_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.cart_ttl_secs)
    }
}

/// Configuration error types.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
